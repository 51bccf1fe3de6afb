//! Scene descriptor fixtures for compiler/environment integration tests.

/// A minimal scene with no zones: base wind `[1,0,0]`, a 10x10x5 extent
/// tiled into 5m cells (spec.md scenario 1, "Trivial grid").
pub fn trivial_grid_scene() -> &'static str {
    r#"{
        "base": {
            "wind": {"vector_ms": [1.0, 0.0, 0.0]},
            "temperature_C": 20.0,
            "pressure_atm": 1.0,
            "gps_strength": 1.0
        },
        "grid": {
            "extent_m": [10.0, 10.0, 5.0],
            "cell_m": [5.0, 5.0, 5.0]
        },
        "zones": []
    }"#
}

/// Same grid as [`trivial_grid_scene`] plus an absolute-wind circle zone
/// over `area_0_0` (spec.md scenario 2).
pub fn absolute_zone_scene() -> &'static str {
    r#"{
        "base": {
            "wind": {"vector_ms": [1.0, 0.0, 0.0]},
            "temperature_C": 20.0,
            "pressure_atm": 1.0
        },
        "grid": {
            "extent_m": [10.0, 10.0, 5.0],
            "cell_m": [5.0, 5.0, 5.0]
        },
        "zones": [
            {
                "name": "override",
                "shape": {"type": "circle", "center_xy": [2.5, 2.5], "radius": 1.0},
                "effect": {"type": "absolute", "wind_ms": [0.0, 5.0, 0.0]},
                "priority": 10
            }
        ]
    }"#
}

/// Two overlapping rect zones over `area_0_0` with different priorities
/// (spec.md scenario 3, "Priority ordering").
pub fn priority_ordering_scene() -> &'static str {
    r#"{
        "base": {
            "wind": {"vector_ms": [1.0, 0.0, 0.0]},
            "temperature_C": 20.0,
            "pressure_atm": 1.0
        },
        "grid": {
            "extent_m": [10.0, 10.0, 5.0],
            "cell_m": [5.0, 5.0, 5.0]
        },
        "zones": [
            {
                "name": "z1_scale",
                "shape": {"type": "rect", "center_xy": [2.5, 2.5], "size_xy": [5.0, 5.0]},
                "effect": {"type": "scale", "factor": 2.0},
                "priority": 5
            },
            {
                "name": "z2_add",
                "shape": {"type": "rect", "center_xy": [2.5, 2.5], "size_xy": [5.0, 5.0]},
                "effect": {"type": "add", "delta_ms": [1.0, 1.0, 0.0]},
                "priority": 10
            }
        ]
    }"#
}

/// A single zone with GPS modifiers over `area_0_0` (spec.md scenario 4,
/// "GPS composition"). Base `gps_strength = 0.8`.
pub fn gps_composition_scene() -> &'static str {
    r#"{
        "base": {
            "wind": {"vector_ms": [1.0, 0.0, 0.0]},
            "temperature_C": 20.0,
            "pressure_atm": 1.0,
            "gps_strength": 0.8
        },
        "grid": {
            "extent_m": [10.0, 10.0, 5.0],
            "cell_m": [5.0, 5.0, 5.0]
        },
        "zones": [
            {
                "name": "gps_zone",
                "shape": {"type": "rect", "center_xy": [2.5, 2.5], "size_xy": [5.0, 5.0]},
                "effect": {"type": "scale", "factor": 1.0},
                "priority": 0,
                "gps_add": 0.5,
                "gps_scale": 0.5
            }
        ]
    }"#
}

/// Same grid as [`trivial_grid_scene`] but with the base wind given as
/// `dir_deg`/`speed_ms` instead of a raw vector.
pub fn polar_wind_scene() -> &'static str {
    r#"{
        "base": {
            "wind": {"dir_deg": 90.0, "speed_ms": 2.0},
            "temperature_C": 20.0,
            "pressure_atm": 1.0
        },
        "grid": {
            "extent_m": [10.0, 10.0, 5.0],
            "cell_m": [5.0, 5.0, 5.0]
        },
        "zones": []
    }"#
}

/// A single-area scene (spec.md scenario 5, "BVH lookup miss").
pub fn single_area_scene() -> &'static str {
    r#"{
        "base": {
            "wind": {"vector_ms": [0.0, 0.0, 0.0]},
            "temperature_C": 15.0,
            "pressure_atm": 1.0
        },
        "grid": {
            "extent_m": [1.0, 1.0, 1.0],
            "cell_m": [1.0, 1.0, 1.0]
        },
        "zones": []
    }"#
}
