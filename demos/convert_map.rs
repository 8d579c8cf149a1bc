//! Convert a map between formats
//!
//! Loads a map into a headless session and saves it again, so the output is
//! exactly what the editor would write after loading the input.
//!
//! ```text
//! cargo run --example convert_map -- city.xml city.ini
//! cargo run --example convert_map -- city.ini export.cs CSharpCode
//! ```

use anyhow::{bail, Context, Result};
use chrono::Utc;
use map_editor::{constants, EditorConfig, EditorSession, Format, HeadlessHost};
use std::path::{Path, PathBuf};

fn format_of(path: &Path, explicit: Option<&str>) -> Result<Format> {
    if let Some(name) = explicit {
        return name
            .parse::<Format>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Unknown output format");
    }
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Format::from_extension)
        .with_context(|| format!("Cannot tell the format of {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: convert_map <input> <output> [format]");
    }
    let input = PathBuf::from(&args[0]);
    let output = PathBuf::from(&args[1]);

    let input_format = format_of(&input, None)?;
    let output_format = format_of(&output, args.get(2).map(String::as_str))?;

    let config = EditorConfig::load(Path::new(constants::files::CONFIG_FILE))
        .context("Failed to read editor config")?;
    let mut session = EditorSession::open(HeadlessHost::new(), config, Utc::now())
        .context("Failed to open editor session")?;

    let report = session
        .load(&input, input_format)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    println!(
        "Loaded {}: {} objects, {} markers, {} skipped",
        report.path.display(),
        report.spawned,
        report.markers,
        report.skipped()
    );

    let saved = session
        .save(&output, output_format)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("[OK] Wrote {} ({})", saved.display(), output_format);

    Ok(())
}
