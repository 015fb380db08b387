//! The invoice record store
//!
//! Stateless between calls: all state lives in the period files and is
//! re-read from disk on every operation. The only in-memory state is a lock
//! map serializing each file's load-modify-save cycle, which together with
//! the codec's atomic writes keeps concurrent writers from corrupting a
//! period file (the original application simply overwrote and raced).
//!
//! Failure policy: per-file read/parse problems are soft (that file
//! contributes nothing and the scan continues). A missing root directory is
//! an empty store; any other root enumeration failure, and every save
//! failure, surfaces as an error.

use chrono::{DateTime, Local};
use dawai_api::{ConfirmationGate, InvoiceListing};
use dawai_util::InvoiceId;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::{codec, InvoiceQuery, InvoiceRecord, PathResolver, StoreResult};

/// A period file discovered during a cross-file scan.
struct PeriodFile {
    path: PathBuf,
    name: String,
}

/// File-partitioned invoice store rooted at an injected directory.
pub struct InvoiceStore {
    resolver: PathResolver,
    gate: Arc<dyn ConfirmationGate>,
    locks: Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>,
}

impl InvoiceStore {
    /// Create a store over `root`. The directory is created lazily on the
    /// first write; a store over a nonexistent root reads as empty.
    pub fn new(root: impl Into<PathBuf>, gate: Arc<dyn ConfirmationGate>) -> Self {
        let resolver = PathResolver::new(root);
        info!(root = %resolver.root().display(), "Invoice store initialized");

        Self {
            resolver,
            gate,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store at the default data directory
    /// (`$DAWAI_DATA_DIR`, then `~/dawaiInvoices`).
    pub fn at_default_root(gate: Arc<dyn ConfirmationGate>) -> Self {
        Self::new(dawai_util::default_data_dir(), gate)
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    // Create

    /// Create a new invoice from caller-supplied fields.
    ///
    /// Assigns `id = invoice-<unix_ms>` and `createdAt` from the current
    /// time, appends to today's period file, and returns the new id.
    pub async fn create_invoice(&self, fields: Map<String, Value>) -> StoreResult<InvoiceId> {
        self.create_invoice_at(fields, dawai_util::now()).await
    }

    /// Create with an explicit clock, so callers and tests control the
    /// calendar day the record lands in.
    pub async fn create_invoice_at(
        &self,
        fields: Map<String, Value>,
        now: DateTime<Local>,
    ) -> StoreResult<InvoiceId> {
        let path = self.resolver.period_file_path(now.date_naive());
        let lock = self.file_lock(&path);
        let _guard = lock.lock().await;

        let mut records = codec::load_records(&path).await;
        let millis = dawai_util::epoch_millis(&now);
        let id = InvoiceId::generate(millis);
        records.push(InvoiceRecord::new(id.clone(), millis, fields));
        codec::save_records(&path, &records).await?;

        debug!(id = %id, path = %path.display(), "Invoice created");
        Ok(id)
    }

    // Read

    /// Find a record by id across every period file. First match wins; ids
    /// are unique store-wide so enumeration order does not matter.
    pub async fn read_invoice(&self, id: &InvoiceId) -> StoreResult<Option<InvoiceRecord>> {
        for file in self.period_files().await? {
            let records = codec::load_records(&file.path).await;
            if let Some(record) = records.into_iter().find(|r| &r.id == id) {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    // Update

    /// Replace a record by id, or insert it into today's file (upsert).
    ///
    /// On a hit the stored record is REPLACED wholesale: fields the caller
    /// omits, including `createdAt`, are gone. The record stays in the file
    /// it was created in; only the upsert-on-miss path touches today's file.
    pub async fn write_invoice(&self, id: &InvoiceId, fields: Map<String, Value>) -> StoreResult<()> {
        self.write_invoice_at(id, fields, dawai_util::now()).await
    }

    /// Upsert with an explicit clock for the on-miss insert path.
    pub async fn write_invoice_at(
        &self,
        id: &InvoiceId,
        fields: Map<String, Value>,
        now: DateTime<Local>,
    ) -> StoreResult<()> {
        for file in self.period_files().await? {
            let lock = self.file_lock(&file.path);
            let _guard = lock.lock().await;

            let mut records = codec::load_records(&file.path).await;
            if let Some(index) = records.iter().position(|r| &r.id == id) {
                records[index] = InvoiceRecord::from_fields(id.clone(), fields);
                codec::save_records(&file.path, &records).await?;
                debug!(id = %id, path = %file.path.display(), "Invoice replaced in place");
                return Ok(());
            }
        }

        // Unknown id: append to today's file
        let path = self.resolver.period_file_path(now.date_naive());
        let lock = self.file_lock(&path);
        let _guard = lock.lock().await;

        let mut records = codec::load_records(&path).await;
        records.push(InvoiceRecord::from_fields(id.clone(), fields));
        codec::save_records(&path, &records).await?;

        debug!(id = %id, path = %path.display(), "Invoice upserted into today's file");
        Ok(())
    }

    /// Shallow-merge fields into an existing record, preserving id and
    /// `createdAt` unless the caller resupplies the latter.
    ///
    /// The explicit alternate to [`write_invoice`]'s full-replace semantics.
    /// Never upserts; returns `Ok(false)` when the id is unknown.
    ///
    /// [`write_invoice`]: InvoiceStore::write_invoice
    pub async fn merge_invoice(
        &self,
        id: &InvoiceId,
        fields: Map<String, Value>,
    ) -> StoreResult<bool> {
        for file in self.period_files().await? {
            let lock = self.file_lock(&file.path);
            let _guard = lock.lock().await;

            let mut records = codec::load_records(&file.path).await;
            if let Some(record) = records.iter_mut().find(|r| &r.id == id) {
                record.merge_fields(fields);
                codec::save_records(&file.path, &records).await?;
                debug!(id = %id, path = %file.path.display(), "Invoice merged in place");
                return Ok(true);
            }
        }

        Ok(false)
    }

    // Delete

    /// Delete a record by id, gated on interactive confirmation.
    ///
    /// The gate is consulted first; any outcome other than an explicit
    /// confirmation returns `Ok(false)` without touching the filesystem.
    /// The emptied period file is kept (as an empty array), never removed.
    pub async fn delete_invoice(&self, id: &InvoiceId) -> StoreResult<bool> {
        let outcome = self.gate.confirm_delete(id);
        if !outcome.is_confirmed() {
            debug!(id = %id, ?outcome, "Deletion not confirmed, nothing done");
            return Ok(false);
        }

        for file in self.period_files().await? {
            let lock = self.file_lock(&file.path);
            let _guard = lock.lock().await;

            let mut records = codec::load_records(&file.path).await;
            let before = records.len();
            records.retain(|r| &r.id != id);
            if records.len() != before {
                codec::save_records(&file.path, &records).await?;
                debug!(id = %id, path = %file.path.display(), "Invoice deleted");
                return Ok(true);
            }
        }

        Ok(false)
    }

    // List

    /// List records across all period files, filtered by `query`.
    ///
    /// A date filter narrows the scan to files named for that day; the
    /// patient-name and mobile filters apply per record.
    pub async fn get_invoices(&self, query: &InvoiceQuery) -> StoreResult<Vec<InvoiceListing>> {
        let expected_name = query.date.map(|d| self.resolver.period_file_name(d));

        let mut listings = Vec::new();
        for file in self.period_files().await? {
            if let Some(expected) = &expected_name {
                if &file.name != expected {
                    continue;
                }
            }

            for record in codec::load_records(&file.path).await {
                if query.matches(&record) {
                    listings.push(InvoiceListing {
                        title: record.id.to_string(),
                        last_edit_time: record.created_at.unwrap_or(0),
                        data: record.to_value(),
                    });
                }
            }
        }

        Ok(listings)
    }

    // Internals

    /// Enumerate every `.json` file under every period directory.
    ///
    /// Order is filesystem-dependent. A missing root is an empty store;
    /// unreadable period directories are skipped with a warning.
    async fn period_files(&self) -> StoreResult<Vec<PeriodFile>> {
        let root = self.resolver.root();
        let mut root_entries = match fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(dir_entry) = root_entries.next_entry().await? {
            let is_dir = match dir_entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    warn!(path = %dir_entry.path().display(), error = %e, "Cannot stat entry, skipping");
                    continue;
                }
            };
            if !is_dir {
                continue;
            }

            let month_path = dir_entry.path();
            let mut month_entries = match fs::read_dir(&month_path).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %month_path.display(), error = %e, "Period directory unreadable, skipping");
                    continue;
                }
            };

            loop {
                match month_entries.next_entry().await {
                    Ok(Some(file_entry)) => {
                        let name = file_entry.file_name().to_string_lossy().into_owned();
                        if !name.ends_with(".json") {
                            continue;
                        }
                        files.push(PeriodFile {
                            path: file_entry.path(),
                            name,
                        });
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(path = %month_path.display(), error = %e, "Period directory enumeration failed, skipping rest");
                        break;
                    }
                }
            }
        }

        Ok(files)
    }

    fn file_lock(&self, path: &Path) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dawai_api::MockGate;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn local(millis: i64) -> DateTime<Local> {
        Local.timestamp_millis_opt(millis).unwrap()
    }

    #[tokio::test]
    async fn empty_root_reads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(dir.path().join("never-created"), Arc::new(MockGate::confirming()));

        assert!(store.read_invoice(&InvoiceId::new("invoice-1")).await.unwrap().is_none());
        assert!(store.get_invoices(&InvoiceQuery::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_appends_to_existing_day_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(dir.path(), Arc::new(MockGate::confirming()));

        let now = local(1_718_000_000_000);
        store
            .create_invoice_at(fields(json!({"patientName": "Asha Rao"})), now)
            .await
            .unwrap();
        store
            .create_invoice_at(fields(json!({"patientName": "Ravi Shah"})), now + chrono::Duration::milliseconds(5))
            .await
            .unwrap();

        let path = store.resolver.period_file_path(now.date_naive());
        let records = codec::load_records(&path).await;
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn a_non_json_file_in_a_period_dir_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(dir.path(), Arc::new(MockGate::confirming()));

        let now = local(1_718_000_000_000);
        let id = store.create_invoice_at(Map::new(), now).await.unwrap();

        let month_dir = dir.path().join(store.resolver.period_dir_name(now.date_naive()));
        std::fs::write(month_dir.join("notes.txt"), "not an invoice file").unwrap();

        assert!(store.read_invoice(&id).await.unwrap().is_some());
        assert_eq!(store.get_invoices(&InvoiceQuery::new()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stray_file_at_root_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(dir.path(), Arc::new(MockGate::confirming()));

        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("README.json"), "[]").unwrap();

        assert!(store.get_invoices(&InvoiceQuery::new()).await.unwrap().is_empty());
    }
}
