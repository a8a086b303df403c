//! File helpers around [`parse_document`] and [`serialize_document`]

use std::fs;
use std::path::Path;

use log::info;

use crate::error::LoadError;
use crate::parser::parse_document;
use crate::scene::Scene;
use crate::serializer::serialize_document;

/// Read a UTF-8 `.stdl` file and parse it
pub fn load_file(path: impl AsRef<Path>) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let scene = parse_document(&source)?;
    info!("loaded {} ({} roots)", path.display(), scene.roots.len());
    Ok(scene)
}

/// Write the canonical form of `scene`, creating or truncating the file
pub fn save_file(scene: &Scene, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    fs::write(path, serialize_document(scene))?;
    info!("saved {}", path.display());
    Ok(())
}
