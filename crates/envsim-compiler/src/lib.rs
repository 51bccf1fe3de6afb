//! Turns a scene descriptor into the area/property/link tables the
//! environment facade loads, following the reference implementation's
//! `CreatorBuilder` chain.

pub mod builder;
pub mod error;
pub mod io;
pub mod scene;

pub use builder::{compile_scene, CompiledScene, SceneBuilder};
pub use error::{CompileError, Result};
pub use io::{compile_file, load_scene, write_tables};
pub use scene::{BaseSpec, GridDescriptor, SceneDescriptor, WindSpec};
