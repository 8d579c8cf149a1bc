//! Session Module - one open map in the editor
//!
//! Ties the registry, the catalog and the codecs to a host and turns
//! save/load outcomes into user notices.

pub mod session_data;
pub mod session_operations;

pub use session_data::{EditorSession, LoadReport, Notice, NoticeLevel};
