//! Period directory and file naming
//!
//! The on-disk layout is shared with existing data and is bit-compatible:
//! a month directory `MM-YY` containing one `DD-MM.json` file per day.
//! Names are derived from the LOCAL calendar; no timezone normalization.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Resolves period paths under an injected store root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Month directory name, e.g. `06-24` for June 2024.
    pub fn period_dir_name(&self, date: NaiveDate) -> String {
        date.format("%m-%y").to_string()
    }

    /// Day file name, e.g. `10-06.json` for the 10th of June.
    pub fn period_file_name(&self, date: NaiveDate) -> String {
        format!("{}.json", date.format("%d-%m"))
    }

    /// Full path of the period file for a calendar day.
    pub fn period_file_path(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(self.period_dir_name(date))
            .join(self.period_file_name(date))
    }
}
