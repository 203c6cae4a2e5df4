use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Writer, WriterBuilder};

use crate::storage::StorageError;

const SKIP_HEADER: [&str; 3] = ["line", "reason", "content"];

/// Pipe-delimited side file receiving the raw content of unparseable input lines.
///
/// Append-only; each entry is flushed as soon as it is written. Content is written
/// byte for byte as it appeared in the input, never quoted.
pub struct SkipLedger {
    path: PathBuf,
    writer: Writer<File>
}

impl SkipLedger {
    pub fn create(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|error| StorageError::io(parent, error))?;
        }

        let file = File::create(path).map_err(|error| StorageError::io(path, error))?;
        let writer = WriterBuilder::new()
            .delimiter(b'|')
            .quote_style(QuoteStyle::Never)
            .has_headers(false)
            .from_writer(file);

        let mut ledger = Self {
            path: path.to_path_buf(),
            writer
        };

        ledger.write(SKIP_HEADER.map(str::as_bytes))?;

        Ok(ledger)
    }

    pub fn append(&mut self, line: u64, reason: &str, content: &[u8]) -> Result<(), StorageError> {
        let line = line.to_string();

        self.write([line.as_bytes(), reason.as_bytes(), content])
    }

    fn write(&mut self, fields: [&[u8]; 3]) -> Result<(), StorageError> {
        self.writer.write_record(fields)
            .map_err(|source| StorageError::Csv { path: self.path.clone(), source })?;

        self.writer.flush().map_err(|error| StorageError::io(&self.path, error))
    }
}
