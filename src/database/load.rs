//! Load sighting files written by the declaration-discovery tool.
//!
//! Each file holds the declarations seen while compiling one translation
//! unit:
//!
//! ```json
//! { "declarations": [ { "kind": "function", "name": "f", ... } ] }
//! ```

use super::Database;
use crate::config::Visibility;
use crate::error::DatabaseError;
use crate::model::{Entity, EntityKind};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct SightingFile {
    #[serde(default)]
    declarations: Vec<Entity>,
}

/// Parse one sighting file.
pub fn read_sightings(path: &Path) -> Result<Vec<Entity>, DatabaseError> {
    let content = fs::read_to_string(path).map_err(|source| DatabaseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sightings(&content).map_err(|source| DatabaseError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_sightings(content: &str) -> Result<Vec<Entity>, serde_json::Error> {
    Ok(serde_json::from_str::<SightingFile>(content)?.declarations)
}

/// Build a finalized database from sighting files, inserted in the given
/// order, applying the visibility policy to every sighting.
pub fn build(files: &[PathBuf], visibility: &Visibility) -> Result<Database, DatabaseError> {
    let mut db = Database::new();
    for path in files {
        let sightings = read_sightings(path)?;
        tracing::debug!(path = %path.display(), count = sightings.len(), "Loaded sightings");
        for mut entity in sightings {
            if visibility.hides(&entity) {
                entity.header_mut().hidden = true;
            }
            db.insert(entity)?;
        }
    }
    // Namespaces implied by a member's path were never sightings themselves.
    db.hide_where(|entity| entity.kind() == EntityKind::Namespace && visibility.hides(entity));
    db.finalize();
    Ok(db)
}
