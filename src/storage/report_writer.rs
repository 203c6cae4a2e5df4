use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::{debug, warn};

use crate::models::ReportingRecord;
use crate::storage::{SinkError, StorageError};

const REPORT_HEADER: [&str; 8] = [
    "dataYear",
    "dataMonth",
    "accountId",
    "phoneNumber",
    "dataUsage",
    "callDuration",
    "smsCount",
    "billingTotal"
];

/// CSV report of the records that met the spending threshold.
///
/// Chunks are staged with `stage` and made permanent with `commit`; `rollback`
/// truncates the file back to the end of the last committed chunk.
pub struct ReportWriter {
    path: PathBuf,
    file: File,
    committed_length: u64
}

impl ReportWriter {
    /// Creates (or truncates) the report file and writes its header.
    pub fn create(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|error| StorageError::io(parent, error))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|error| StorageError::io(path, error))?;

        let header = encode(std::iter::once(REPORT_HEADER.map(String::from)))
            .map_err(|source| StorageError::Csv { path: path.to_path_buf(), source })?;

        file.write_all(&header).map_err(|error| StorageError::io(path, error))?;
        file.flush().map_err(|error| StorageError::io(path, error))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            committed_length: header.len() as u64
        })
    }

    /// Appends the chunk's lines. On failure the partially written bytes are removed.
    pub fn stage(&mut self, reports: &[ReportingRecord]) -> Result<(), SinkError> {
        if reports.is_empty() {
            return Ok(())
        }

        let bytes = encode(reports.iter().map(ReportingRecord::to_fields))?;

        let written = self.file.write_all(&bytes)
            .and_then(|_| self.file.flush())
            .and_then(|_| self.file.sync_data());

        if let Err(error) = written {
            self.rollback()?;
            return Err(error.into())
        }

        Ok(())
    }

    pub fn commit(&mut self) -> Result<(), SinkError> {
        self.committed_length = self.file.stream_position()?;
        debug!("Report {} committed at {} bytes", self.path.display(), self.committed_length);

        Ok(())
    }

    pub fn rollback(&mut self) -> Result<(), SinkError> {
        warn!("Rolling report {} back to {} bytes", self.path.display(), self.committed_length);

        self.file.set_len(self.committed_length)
            .and_then(|_| self.file.seek(SeekFrom::Start(self.committed_length)).map(|_| ()))
            .map_err(|error| SinkError::Fatal(format!("Report rollback failed: {error}")))
    }
}

fn encode<I>(rows: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: AsRef<[u8]>
{
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    for row in rows {
        writer.write_record(row)?;
    }

    writer.into_inner().map_err(|error| csv::Error::from(error.into_error()))
}
