pub mod export;
pub mod input;

pub use export::{
    delimiter_byte, export_columns, export_group_stats, export_records, write_group_stats,
    write_records, StatsTable,
};
pub use input::{load_rows, parse_csv_rows, parse_json_rows, InputFormat};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
