//! Persistence of rendered reports and recap exports.
//!
//! Supports plain text documents, CSV export and JSON export.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, TrackerError};
use crate::registry::RecapRow;

/// Writes `content` to `path`, creating missing parent directories and
/// truncating any existing file.
///
/// The file handle is closed on every return path. The write is not atomic:
/// a failure part way through can leave a truncated file behind.
pub fn save_text(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut file = File::create(path).map_err(|e| TrackerError::io(path, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| TrackerError::io(path, e))?;

    info!(path = %path.display(), bytes = content.len(), "Document saved");
    Ok(())
}

/// Writes recap rows to a CSV file with a header row, replacing any existing file.
pub fn write_recap_csv(path: impl AsRef<Path>, rows: &[RecapRow]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let file = File::create(path).map_err(|e| TrackerError::io(path, e))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| TrackerError::io(path, e))?;

    info!(path = %path.display(), rows = rows.len(), "Recap CSV written");
    Ok(())
}

/// JSON envelope for an exported recap.
#[derive(Serialize)]
pub struct RecapExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub students: &'a [RecapRow],
}

/// Serializes recap rows as pretty-printed JSON stamped with the current time.
pub fn recap_json(rows: &[RecapRow]) -> Result<String> {
    let export = RecapExport {
        generated_at: Utc::now(),
        students: rows,
    };
    serde_json::to_string_pretty(&export)
        .map_err(|e| TrackerError::Validation(format!("recap could not be serialized: {e}")))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!(dir = %parent.display(), "Creating output directory");
        }
        fs::create_dir_all(parent).map_err(|e| TrackerError::io(parent, e))?;
    }
    Ok(())
}
