//! Catalog Operations - loading, saving and resolving models
//!
//! Name tables are flat `key=value` files. A value is either decimal or
//! `0x`-prefixed hex; hex values above `0x7FFFFFFF` wrap into the negative
//! range the way the host stores hashes. A bare key is hashed by the model
//! loader.

use super::catalog_data::{InvalidHashList, ModelCatalog, NameTable};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::host::{ModelLoader, ModelRef};
use crate::persistence::{PersistenceError, PersistenceResult};
use std::path::Path;

// ============================================================================
// NAME TABLES
// ============================================================================

/// Parse one hash value, decimal or `0x` hex
pub fn parse_hash_value(text: &str) -> Option<i32> {
    let text = text.trim();
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"));
    match hex {
        Some(digits) => u32::from_str_radix(digits, 16).ok().map(|v| v as i32),
        None => text.parse::<i32>().ok(),
    }
}

/// Parse a name table
///
/// # Arguments
/// * `text` - File contents
/// * `loader` - Hashes keys that carry no value
///
/// # Returns
/// The table, or `MalformedFile` naming the first unparsable value
pub fn parse_name_table(text: &str, loader: &dyn ModelLoader) -> PersistenceResult<NameTable> {
    let mut table = NameTable::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (name, hash) = match line.split_once('=') {
            Some((name, value)) => {
                let hash = parse_hash_value(value).ok_or_else(|| PersistenceError::MalformedFile {
                    line: index + 1,
                    reason: format!("'{}' is not a model hash", value.trim()),
                })?;
                (name.trim(), hash)
            }
            None => (line, loader.hash_of_name(line)),
        };

        table.insert(name, hash);
    }

    Ok(table)
}

/// Load a name table from disk
pub fn load_name_table(path: &Path, loader: &dyn ModelLoader) -> PersistenceResult<NameTable> {
    if !path.exists() {
        return Err(PersistenceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let table = parse_name_table(&text, loader)?;
    log::debug!(
        "[Catalog] Loaded {} models from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Render a table back to `key=value` lines
pub fn render_name_table(table: &NameTable) -> String {
    table
        .iter()
        .map(|(name, hash)| format!("{}={}\r\n", name, hash))
        .collect()
}

pub fn save_name_table(path: &Path, table: &NameTable) -> PersistenceResult<()> {
    std::fs::write(path, render_name_table(table))?;
    Ok(())
}

/// Load the prop, vehicle and ped tables named in the config.
/// A missing table is logged and left empty so the editor still starts.
pub fn load_catalog(config: &EditorConfig, loader: &dyn ModelLoader) -> EditorResult<ModelCatalog> {
    let mut catalog = ModelCatalog::default();

    for (path, table) in [
        (&config.object_list_path, &mut catalog.props),
        (&config.vehicle_list_path, &mut catalog.vehicles),
        (&config.ped_list_path, &mut catalog.peds),
    ] {
        match load_name_table(path, loader) {
            Ok(loaded) => *table = loaded,
            Err(PersistenceError::FileNotFound { path }) => {
                log::warn!("[Catalog] {} not found, table left empty", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    log::info!(
        "[Catalog] {} props, {} vehicles, {} peds",
        catalog.props.len(),
        catalog.vehicles.len(),
        catalog.peds.len()
    );
    Ok(catalog)
}

/// Keep only the entries whose model actually loads
pub fn prune_name_table(
    table: &NameTable,
    loader: &mut dyn ModelLoader,
    attempts: u32,
) -> NameTable {
    let mut valid = NameTable::new();
    for (name, hash) in table.iter() {
        if loader.is_valid(hash) && wait_for_model(loader, hash, attempts) {
            valid.insert(name, hash);
        }
    }
    log::info!(
        "[Catalog] {} of {} models are loadable",
        valid.len(),
        table.len()
    );
    valid
}

// ============================================================================
// INVALID HASHES
// ============================================================================

impl InvalidHashList {
    /// Load the list; a missing file yields an empty list bound to `path`
    pub fn load(path: &Path) -> PersistenceResult<Self> {
        let mut list = InvalidHashList {
            path: Some(path.to_path_buf()),
            ..Default::default()
        };
        if !path.exists() {
            return Ok(list);
        }

        let text = std::fs::read_to_string(path)?;
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let hash = line
                .parse::<i32>()
                .map_err(|e| PersistenceError::MalformedFile {
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            list.insert(hash);
        }
        Ok(list)
    }

    fn insert(&mut self, hash: i32) -> bool {
        if self.hashes.insert(hash) {
            self.order.push(hash);
            true
        } else {
            false
        }
    }

    /// Record a hash that failed to resolve and persist the list
    pub fn record(&mut self, hash: i32) -> PersistenceResult<()> {
        if self.insert(hash) {
            self.save()?;
        }
        Ok(())
    }

    /// One hash per line, CRLF terminated
    pub fn render(&self) -> String {
        self.order.iter().map(|hash| format!("{}\r\n", hash)).collect()
    }

    pub fn save(&self) -> PersistenceResult<()> {
        if let Some(path) = &self.path {
            std::fs::write(path, self.render())?;
        }
        Ok(())
    }
}

// ============================================================================
// MODEL RESOLUTION
// ============================================================================

fn wait_for_model(loader: &mut dyn ModelLoader, hash: i32, attempts: u32) -> bool {
    loader.request(hash);
    for _ in 0..attempts {
        if loader.is_loaded(hash) {
            return true;
        }
        loader.yield_frame();
    }
    loader.is_loaded(hash)
}

/// Resolve a model hash to something the host can spawn
///
/// # Arguments
/// * `invalid` - Known-bad hashes; updated when a new bad hash is found
/// * `loader` - Host model streaming
/// * `hash` - Model to resolve
/// * `attempts` - Frames to wait for the model to become resident
///
/// # Returns
/// A `ModelRef`, or `InvalidModel` when the hash names no asset.
/// A model that is still streaming after `attempts` frames is returned anyway;
/// the spawn that follows reports the failure.
pub fn resolve_model(
    invalid: &mut InvalidHashList,
    loader: &mut dyn ModelLoader,
    hash: i32,
    attempts: u32,
) -> EditorResult<ModelRef> {
    if invalid.contains(hash) {
        return Err(EditorError::InvalidModel { hash });
    }

    if !loader.is_valid(hash) {
        log::warn!("[Catalog] Model {} is invalid, remembering it", hash);
        if let Err(e) = invalid.record(hash) {
            log::error!("[Catalog] Could not persist invalid hash list: {}", e);
        }
        return Err(EditorError::InvalidModel { hash });
    }

    if !wait_for_model(loader, hash, attempts) {
        log::warn!(
            "[Catalog] Model {} not loaded after {} frames",
            hash,
            attempts
        );
    }

    Ok(ModelRef::resolved(hash))
}
