//! Persistence Module - map files in every supported format
//!
//! `Xml` round-trips a whole `Map`. `SimpleTrainer` is the INI layout of an
//! external trainer and only carries props. `CSharpCode` and `Raw` are one-way
//! exports. Every format that writes positions drops origin-placed objects.

// Data modules
pub mod map_document_data;

// Operations modules
pub mod export_operations;
pub mod map_file_operations;
pub mod trainer_operations;
pub mod xml_operations;

pub use map_file_operations::{
    load_map, parse_map, path_with_extension, render_map, resolve_load_path, save_map,
};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Malformed map file at line {line}: {reason}")]
    MalformedFile { line: usize, reason: String },
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("{0} files can only be written, not loaded")]
    UnsupportedFormat(Format),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Map file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Xml,
    SimpleTrainer,
    CSharpCode,
    Raw,
}

impl Format {
    pub const ALL: [Format; 4] = [
        Format::Xml,
        Format::SimpleTrainer,
        Format::CSharpCode,
        Format::Raw,
    ];

    /// Extension appended when a path has none
    pub fn default_extension(self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::SimpleTrainer => "ini",
            Format::CSharpCode => "cs",
            Format::Raw => "txt",
        }
    }

    pub fn supports_loading(self) -> bool {
        matches!(self, Format::Xml | Format::SimpleTrainer)
    }

    /// Guess a format from a file extension
    pub fn from_extension(extension: &str) -> Option<Format> {
        Format::ALL
            .into_iter()
            .find(|f| f.default_extension().eq_ignore_ascii_case(extension))
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Xml => "Xml",
            Format::SimpleTrainer => "SimpleTrainer",
            Format::CSharpCode => "CSharpCode",
            Format::Raw => "Raw",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    /// Accepts the format name or its extension, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Format::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .or_else(|| Format::from_extension(s))
            .ok_or_else(|| format!("unknown map format '{}'", s))
    }
}
