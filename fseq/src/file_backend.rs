//! Sequence files on disk
//!
//! With the `mmap` feature the file is memory mapped, otherwise it is read
//! into memory. Either way validation sees one contiguous byte slice.

use std::fs::File;
use std::path::{Path, PathBuf};

use fseq_core::{SequenceHeader, SequenceSource, ValidationResult, Validator};
#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};

use crate::error::{Error, Result};

enum FileData {
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// A sequence file opened for validation
pub struct SequenceFile {
    path: PathBuf,
    data: FileData,
}

impl SequenceFile {
    /// Open a sequence file
    ///
    /// Only fails on I/O. A malformed file opens fine and is rejected by
    /// [`validate`](Self::validate).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::io(path))?;
        let data = Self::load(&file).map_err(Error::io(path))?;

        let sequence = Self {
            path: path.to_path_buf(),
            data,
        };
        tracing::debug!(path = %path.display(), size = sequence.size(), "opened sequence file");
        Ok(sequence)
    }

    #[cfg(feature = "mmap")]
    fn load(file: &File) -> std::io::Result<FileData> {
        // Empty files cannot be mapped on every platform
        if file.metadata()?.len() == 0 {
            return Ok(FileData::Owned(Vec::new()));
        }
        // SAFETY: the mapping is read-only and owned by this value. Every
        // access goes through the bounds-checked slice from `as_bytes`.
        let mmap = unsafe { MmapOptions::new().map(file)? };
        Ok(FileData::Mapped(mmap))
    }

    #[cfg(not(feature = "mmap"))]
    fn load(mut file: &File) -> std::io::Result<FileData> {
        use std::io::Read;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(FileData::Owned(bytes))
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Raw header fields, without checking them against any limits
    pub fn header(&self) -> fseq_core::Result<SequenceHeader> {
        SequenceHeader::from_bytes(self.as_bytes())
    }

    /// Validate the whole file
    pub fn validate(&self, validator: &Validator) -> ValidationResult {
        validator.validate_source(self)
    }
}

impl SequenceSource for SequenceFile {
    fn as_bytes(&self) -> &[u8] {
        match &self.data {
            #[cfg(feature = "mmap")]
            FileData::Mapped(mmap) => &mmap[..],
            FileData::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Open and validate one file, folding I/O and validation errors together
pub fn validate_file<P: AsRef<Path>>(
    path: P,
    validator: &Validator,
) -> Result<fseq_core::ValidationReport> {
    let file = SequenceFile::open(path)?;
    Ok(file.validate(validator)?)
}
