use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};

use crate::models::{BillingRecord, FIELD_NAMES};
use crate::storage::StorageError;

/// An input line that could not be turned into a `BillingRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// 1-based physical line number, blank lines included.
    pub line: u64,
    pub reason: String,
    /// The line exactly as read, without its line terminator.
    pub content: Vec<u8>
}

#[derive(Debug)]
pub enum ReadFailure {
    Parse(ParseFailure),
    Io {
        line: u64,
        source: std::io::Error
    }
}

/// Pulls billing records from a delimited file, one physical line at a time.
///
/// Blank lines are skipped but still counted, so reported line numbers match the file.
pub struct BillingReader {
    input: BufReader<File>,
    buffer: Vec<u8>,
    line: u64,
    skip_header: bool,
    exhausted: bool
}

impl BillingReader {
    pub fn open(path: &Path, has_header: bool) -> Result<Self, StorageError> {
        let file = File::open(path).map_err(|error| StorageError::io(path, error))?;

        Ok(Self {
            input: BufReader::new(file),
            buffer: Vec::new(),
            line: 0,
            skip_header: has_header,
            exhausted: false
        })
    }

    /// Reads the next non-blank line into `buffer`, without its terminator.
    fn read_line(&mut self) -> Result<bool, std::io::Error> {
        loop {
            self.buffer.clear();

            if self.input.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(false)
            }

            self.line += 1;

            if self.buffer.last() == Some(&b'\n') {
                self.buffer.pop();
            }

            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }

            if self.buffer.iter().all(u8::is_ascii_whitespace) {
                continue
            }

            if self.skip_header {
                self.skip_header = false;
                continue
            }

            return Ok(true)
        }
    }

    fn parse_current(&self) -> Result<BillingRecord, ParseFailure> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(self.buffer.as_slice());

        let mut record = ByteRecord::new();

        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => return Err(self.failure("line holds no fields".to_string())),
            Err(error) => return Err(self.failure(error.to_string()))
        }

        if record.len() != FIELD_NAMES.len() {
            return Err(self.failure(format!("expected {} fields, found {}", FIELD_NAMES.len(), record.len())))
        }

        record.deserialize::<BillingRecord>(None)
            .map_err(|error| self.failure(describe(&error)))
    }

    fn failure(&self, reason: String) -> ParseFailure {
        ParseFailure {
            line: self.line,
            reason,
            content: self.buffer.clone()
        }
    }
}

impl Iterator for BillingReader {
    type Item = Result<BillingRecord, ReadFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None
        }

        match self.read_line() {
            Ok(true) => Some(self.parse_current().map_err(ReadFailure::Parse)),
            Ok(false) => {
                self.exhausted = true;
                None
            }
            Err(source) => {
                self.exhausted = true;
                Some(Err(ReadFailure::Io { line: self.line + 1, source }))
            }
        }
    }
}

fn describe(error: &csv::Error) -> String {
    match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => {
                let name = FIELD_NAMES.get(field as usize).copied().unwrap_or("unknown");
                format!("field {name}: {}", err.kind())
            }
            None => err.kind().to_string()
        },
        _ => error.to_string()
    }
}
