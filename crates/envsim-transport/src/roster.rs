//! Drone roster loading — mirrors `asset/drone_manager.py::DroneManager`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::drone_io::{DroneIo, DISTURB_ORG, POS_ORG};
use crate::error::{Result, RosterError};

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    robots: Vec<RobotEntry>,
}

#[derive(Debug, Deserialize)]
struct RobotEntry {
    name: Option<String>,
    #[serde(default)]
    shm_pdu_readers: Vec<OrgEntry>,
    #[serde(default)]
    shm_pdu_writers: Vec<OrgEntry>,
}

#[derive(Debug, Deserialize)]
struct OrgEntry {
    org_name: Option<String>,
}

/// The roster of drones the scheduler fans out to each tick, in the
/// order they appear in the config file.
pub struct DroneManager {
    pub drones: Vec<DroneIo>,
}

impl DroneManager {
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RosterError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let roster: RosterFile =
            serde_json::from_str(&text).map_err(|source| RosterError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let mut drones = Vec::new();
        for robot in roster.robots {
            let Some(name) = robot.name.filter(|n| !n.is_empty()) else {
                continue;
            };

            let reader_orgs: HashSet<_> = robot
                .shm_pdu_readers
                .iter()
                .filter_map(|r| r.org_name.clone())
                .collect();
            let writer_orgs: HashSet<_> = robot
                .shm_pdu_writers
                .iter()
                .filter_map(|w| w.org_name.clone())
                .collect();

            if !reader_orgs.contains(POS_ORG) {
                tracing::warn!(robot = %name, org = POS_ORG, "robot has no reader for this org");
            }
            if !writer_orgs.contains(DISTURB_ORG) {
                tracing::warn!(robot = %name, org = DISTURB_ORG, "robot has no writer for this org");
            }

            drones.push(DroneIo::new(name));
        }

        Ok(Self { drones })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_named_robots_preserving_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("roster.json");
        std::fs::write(
            &config,
            r#"{
                "robots": [
                    {"name": "Drone1", "shm_pdu_readers": [{"org_name": "pos"}], "shm_pdu_writers": [{"org_name": "disturb"}]},
                    {"name": "Drone2", "shm_pdu_readers": [], "shm_pdu_writers": []},
                    {"shm_pdu_readers": []}
                ]
            }"#,
        )
        .unwrap();

        let manager = DroneManager::from_config(&config).unwrap();
        let names: Vec<_> = manager.drones.iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Drone1", "Drone2"]);
    }
}
