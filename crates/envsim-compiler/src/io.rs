//! Reading the scene descriptor and writing the three output tables.

use std::path::Path;

use envsim_common::{AreaPropertiesFile, LinksFile, SpaceAreasFile};

use crate::builder::CompiledScene;
use crate::error::{CompileError, Result};
use crate::scene::SceneDescriptor;

pub fn load_scene(path: impl AsRef<Path>) -> Result<SceneDescriptor> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CompileError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Writes `space_areas.json`, `area_properties.json`, and `links.json`
/// into `outdir`, creating it if necessary.
pub fn write_tables(outdir: impl AsRef<Path>, compiled: &CompiledScene) -> Result<()> {
    let outdir = outdir.as_ref();
    std::fs::create_dir_all(outdir).map_err(|source| CompileError::WriteFile {
        path: outdir.display().to_string(),
        source,
    })?;

    write_json(
        outdir.join("space_areas.json"),
        &SpaceAreasFile::from_areas(&compiled.areas),
    )?;
    write_json(
        outdir.join("area_properties.json"),
        &AreaPropertiesFile::from_properties(&compiled.properties),
    )?;
    write_json(
        outdir.join("links.json"),
        &LinksFile::from_links(&compiled.links),
    )?;

    Ok(())
}

fn write_json(path: impl AsRef<Path>, value: &impl serde::Serialize) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).map_err(|source| CompileError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}

/// Loads, compiles, and writes a scene in one call, matching the
/// reference implementation's `main()` flow. Logs the output directory
/// and table sizes at info level.
pub fn compile_file(infile: impl AsRef<Path>, outdir: impl AsRef<Path>) -> Result<CompiledScene> {
    let infile = infile.as_ref();
    let outdir = outdir.as_ref();
    tracing::info!(infile = %infile.display(), "loading scene descriptor");
    let descriptor = load_scene(infile)?;
    let compiled = crate::builder::compile_scene(descriptor)?;
    tracing::info!(
        areas = compiled.areas.len(),
        properties = compiled.properties.len(),
        links = compiled.links.len(),
        outdir = %outdir.display(),
        "writing compiled tables"
    );
    write_tables(outdir, &compiled)?;
    Ok(compiled)
}
