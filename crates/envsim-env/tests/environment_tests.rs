//! End-to-end: compile a scene, load it through the facade, query it.

use envsim_common::Point3;
use envsim_compiler::compile_scene;
use envsim_env::Environment;

fn load(scene_json: &str, dir: &std::path::Path) -> Environment {
    let descriptor = serde_json::from_str(scene_json).unwrap();
    let compiled = compile_scene(descriptor).unwrap();
    envsim_compiler::write_tables(dir, &compiled).unwrap();
    Environment::from_files(dir, 1, 8).unwrap()
}

#[test]
fn bvh_lookup_miss_outside_the_only_area() {
    // spec.md scenario 5: a point clearly outside the single compiled
    // area must resolve to no property, not an error.
    let dir = tempfile::tempdir().unwrap();
    let env = load(test_utils::scenes::single_area_scene(), dir.path());
    let (area_id, property) = env.get_property_at(Point3::new(10.0, 10.0, 10.0));
    assert!(area_id.is_none());
    assert!(property.is_none());
    let (area_id, property) = env.get_property_at(Point3::new(0.5, 0.5, 0.5));
    assert!(area_id.is_some());
    assert!(property.is_some());
}

#[test]
fn inspect_area_exposes_resolved_wind_and_gps() {
    let dir = tempfile::tempdir().unwrap();
    let env = load(test_utils::scenes::gps_composition_scene(), dir.path());
    let resolved = env
        .inspect_area(&envsim_common::AreaId::new("area_0_0"))
        .unwrap();
    assert!((resolved.property.gps_strength - 0.65).abs() < 1e-6);
}

#[test]
fn integrity_report_is_clean_after_a_normal_compile() {
    let dir = tempfile::tempdir().unwrap();
    let env = load(test_utils::scenes::priority_ordering_scene(), dir.path());
    let report = env.validate_integrity();
    assert!(report.is_clean());
}
