//! Parallel validation of many files
//!
//! Files are independent, so each one is opened and scanned on the rayon
//! pool. Results come back in the order the paths were given.

use std::path::{Path, PathBuf};

use fseq_core::{ValidationReport, Validator};
use rayon::prelude::*;

use crate::error::Result;
use crate::file_backend::SequenceFile;

/// Result for one path of a batch
#[derive(Debug)]
pub struct FileOutcome<T> {
    pub path: PathBuf,
    pub result: Result<T>,
}

impl<T> FileOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Open every file and apply `f` to it in parallel
///
/// Files that fail to open yield an I/O error in their slot and do not
/// stop the rest of the batch.
pub fn map_files<P, T, F>(paths: &[P], f: F) -> Vec<FileOutcome<T>>
where
    P: AsRef<Path> + Sync,
    T: Send,
    F: Fn(&SequenceFile) -> Result<T> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = SequenceFile::open(path).and_then(|file| f(&file));
            if let Err(error) = &result {
                tracing::debug!(path = %path.display(), %error, "file rejected");
            }
            FileOutcome {
                path: path.to_path_buf(),
                result,
            }
        })
        .collect()
}

/// Validate every file against the same limits
pub fn validate_files<P>(paths: &[P], validator: &Validator) -> Vec<FileOutcome<ValidationReport>>
where
    P: AsRef<Path> + Sync,
{
    let outcomes = map_files(paths, |file| Ok(file.validate(validator)?));
    let valid = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    tracing::debug!(files = outcomes.len(), valid, "batch validated");
    outcomes
}
