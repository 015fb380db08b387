//! Period file codec
//!
//! Reading fails soft: a missing, unreadable, or corrupt file contributes an
//! empty record list rather than an error, so one bad file never takes down
//! a cross-file scan. Writing is strict and atomic: the full array is
//! serialized pretty-printed (2-space indent, human-diffable, the format
//! existing data is in) to a temp file which is then renamed over the target.

use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::{InvoiceRecord, StoreResult};

/// Load all records from a period file.
///
/// Returns an empty list when the file does not exist, cannot be read, or
/// does not parse as a JSON array of records.
pub async fn load_records(path: &Path) -> Vec<InvoiceRecord> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Period file unreadable, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<InvoiceRecord>>(&content) {
        Ok(records) => {
            debug!(path = %path.display(), count = records.len(), "Period file loaded");
            records
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Period file corrupt, treating as empty");
            Vec::new()
        }
    }
}

/// Write the full record array to a period file.
///
/// Ensures the parent directory exists, then writes via temp file + rename
/// so a crash mid-write never leaves a truncated file behind.
pub async fn save_records(path: &Path, records: &[InvoiceRecord]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(records)?;

    let tmp = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp, path).await?;

    debug!(path = %path.display(), count = records.len(), "Period file saved");
    Ok(())
}
