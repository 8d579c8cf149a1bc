//! Map File Operations - format dispatch and file handling

use super::export_operations::{render_csharp, render_raw};
use super::trainer_operations::{parse_trainer, render_trainer};
use super::xml_operations::{parse_xml, render_xml};
use super::{Format, PersistenceError, PersistenceResult};
use crate::catalog::ModelCatalog;
use crate::entity::Map;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Render a map in any format
pub fn render_map(map: &Map, format: Format, catalog: &ModelCatalog) -> PersistenceResult<String> {
    match format {
        Format::Xml => render_xml(map),
        Format::SimpleTrainer => Ok(render_trainer(map)),
        Format::CSharpCode => Ok(render_csharp(map)),
        Format::Raw => Ok(render_raw(map, catalog)),
    }
}

/// Parse a map in a loadable format
pub fn parse_map(text: &str, format: Format) -> PersistenceResult<Map> {
    match format {
        Format::Xml => parse_xml(text),
        Format::SimpleTrainer => parse_trainer(text),
        Format::CSharpCode | Format::Raw => Err(PersistenceError::UnsupportedFormat(format)),
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Append the format's extension unless the path already ends in it
pub fn path_with_extension(path: &Path, format: Format) -> PathBuf {
    let extension = format.default_extension();
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false);

    if has_extension {
        path.to_path_buf()
    } else {
        append_extension(path, extension)
    }
}

/// Find the file to load. A missing path is retried once with the
/// format's extension appended.
pub fn resolve_load_path(path: &Path, format: Format) -> PersistenceResult<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let candidate = append_extension(path, format.default_extension());
    if candidate.is_file() {
        log::debug!(
            "[MapFile] {} not found, using {}",
            path.display(),
            candidate.display()
        );
        return Ok(candidate);
    }

    Err(PersistenceError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Write a map to exactly `path`. The file is replaced atomically so a failed
/// save never leaves a half-written map behind.
pub fn save_map(
    path: &Path,
    map: &Map,
    format: Format,
    catalog: &ModelCatalog,
) -> PersistenceResult<()> {
    let text = render_map(map, format, catalog)?;

    let temp_path = append_extension(path, "tmp");
    std::fs::write(&temp_path, text)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    log::info!(
        "[MapFile] Saved {} objects to {} ({})",
        map.placed_objects().count(),
        path.display(),
        format
    );
    Ok(())
}

/// Load a map, recording where it came from in its metadata
pub fn load_map(path: &Path, format: Format) -> PersistenceResult<Map> {
    if !format.supports_loading() {
        return Err(PersistenceError::UnsupportedFormat(format));
    }

    let resolved = resolve_load_path(path, format)?;
    let text = std::fs::read_to_string(&resolved)?;
    let mut map = parse_map(&text, format)?;
    map.metadata.filename = Some(resolved.clone());

    log::info!(
        "[MapFile] Loaded {} objects and {} markers from {}",
        map.objects.len(),
        map.markers.len(),
        resolved.display()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityDescriptor;
    use glam::Vec3;

    fn one_prop() -> Map {
        let mut map = Map::new();
        map.objects
            .push(EntityDescriptor::prop(3, Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO));
        map
    }

    #[test]
    fn test_extension_helpers() {
        assert_eq!(
            path_with_extension(Path::new("maps/city"), Format::Xml),
            PathBuf::from("maps/city.xml")
        );
        assert_eq!(
            path_with_extension(Path::new("maps/city.XML"), Format::Xml),
            PathBuf::from("maps/city.XML")
        );
        assert_eq!(
            path_with_extension(Path::new("maps/city.v2"), Format::SimpleTrainer),
            PathBuf::from("maps/city.v2.ini")
        );
    }

    #[test]
    fn test_load_falls_back_to_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = ModelCatalog::default();
        save_map(&dir.path().join("city.xml"), &one_prop(), Format::Xml, &catalog).expect("saved");

        let map = load_map(&dir.path().join("city"), Format::Xml).expect("loaded via fallback");
        assert_eq!(map.objects.len(), 1);
        assert_eq!(map.metadata.filename, Some(dir.path().join("city.xml")));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = load_map(&dir.path().join("nowhere"), Format::SimpleTrainer);
        match result {
            Err(PersistenceError::FileNotFound { path }) => {
                assert_eq!(path, dir.path().join("nowhere"))
            }
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_write_only_formats() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("export.cs");
        save_map(&path, &one_prop(), Format::CSharpCode, &ModelCatalog::default()).expect("saved");
        assert!(path.exists());
        assert!(!append_extension(&path, "tmp").exists());

        assert!(matches!(
            load_map(&path, Format::CSharpCode),
            Err(PersistenceError::UnsupportedFormat(Format::CSharpCode))
        ));
    }

    #[test]
    fn test_trainer_file_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("props.ini");
        save_map(&path, &one_prop(), Format::SimpleTrainer, &ModelCatalog::default())
            .expect("saved");

        let map = load_map(&path, Format::SimpleTrainer).expect("loaded");
        assert_eq!(map.objects[0].model_hash, 3);
    }
}
