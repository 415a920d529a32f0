// Saving and loading a shelved collection as JSON.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::catalog::Collection;
use crate::error::{LibraryError, Result};

/// File written by a sort session when no output path is given.
pub const DEFAULT_INVENTORY: &str = "inventory.json";

/// Write `collection` to `path`, replacing any existing file. Output is
/// indented by a single space per level.
pub fn save_collection(path: &Path, collection: &Collection) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    collection
        .serialize(&mut serializer)
        .map_err(|source| LibraryError::Encode {
            target: path.display().to_string(),
            source,
        })?;
    fs::write(path, buf).map_err(|source| io_error(path, source))?;
    info!(path = %path.display(), books = collection.len(), "Collection saved");
    Ok(())
}

/// Read a collection previously written by [`save_collection`].
///
/// # Errors
///
/// [`LibraryError::NotFound`] for a missing file, [`LibraryError::Decode`]
/// when the contents are not a valid collection.
pub fn load_collection(path: &Path) -> Result<Collection> {
    let data = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LibraryError::NotFound(format!(
            "Could not read {}; try running --sort",
            path.display()
        )),
        _ => io_error(path, source),
    })?;
    let collection: Collection =
        serde_json::from_str(&data).map_err(|source| LibraryError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), books = collection.len(), "Collection loaded");
    Ok(collection)
}

fn io_error(path: &Path, source: io::Error) -> LibraryError {
    LibraryError::Io {
        path: PathBuf::from(path),
        source,
    }
}
