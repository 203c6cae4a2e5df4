use crate::engine::reader::ReadFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDecision {
    Skip,
    Fatal
}

/// Decides whether a read failure can be skipped.
///
/// Skipping is only possible when the run has a skip file to route the line to;
/// without one every malformed line is fatal. I/O failures of the input are never skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipPolicy {
    limit: Option<u64>
}

impl SkipPolicy {
    pub fn new(skip_file_configured: bool, skip_limit: u64) -> Self {
        Self {
            limit: skip_file_configured.then_some(skip_limit)
        }
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn classify(&self, failure: &ReadFailure, skipped_so_far: u64) -> SkipDecision {
        match (failure, self.limit) {
            (ReadFailure::Parse(_), Some(limit)) if skipped_so_far < limit => SkipDecision::Skip,
            _ => SkipDecision::Fatal
        }
    }
}
