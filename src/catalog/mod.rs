//! Catalog Module - model name tables and model resolution

pub mod catalog_data;
pub mod catalog_operations;

pub use catalog_data::{InvalidHashList, ModelCatalog, NameTable};
pub use catalog_operations::{
    load_catalog, load_name_table, parse_hash_value, parse_name_table, prune_name_table,
    render_name_table, resolve_model, save_name_table,
};
