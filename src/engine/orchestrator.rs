use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn};

use crate::config::JobSettings;
use crate::engine::preparation::stage_input;
use crate::engine::retry::{LoggingRetryObserver, RetryObserver, RetryPolicy};
use crate::engine::skip_policy::{SkipDecision, SkipPolicy};
use crate::engine::reader::{BillingReader, ReadFailure};
use crate::engine::PipelineError;
use crate::models::Chunk;
use crate::parameters::{JobParameters, ParametersValidator, RunParameters, ValidationError};
use crate::processor::{BillingProcessor, Verdict};
use crate::storage::{BillingSink, BillingStore, ChunkSink, ReportWriter, SkipLedger, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Streaming,
    Committing,
    Completed,
    Failed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    /// Records parsed successfully.
    pub read: u64,
    pub kept: u64,
    pub dropped: u64,
    pub skipped: u64,
    pub chunks_committed: u64,
    /// Rows persisted to `BILLING_DATA` by committed chunks.
    pub rows_written: u64,
    /// Report lines persisted by committed chunks.
    pub rows_reported: u64
}

/// Aggregate outcome of a run that passed validation.
#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    pub counts: RunCounts,
    pub failure: Option<PipelineError>
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

impl Display for RunReport {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let counts = &self.counts;

        write!(
            formatter,
            "status={:?} read={} kept={} dropped={} skipped={} chunks={} rows={} reported={}",
            self.status,
            counts.read,
            counts.kept,
            counts.dropped,
            counts.skipped,
            counts.chunks_committed,
            counts.rows_written,
            counts.rows_reported
        )?;

        if let Some(failure) = &self.failure {
            write!(formatter, " cause=\"{failure}\"")?;
        }

        Ok(())
    }
}

/// Resources owned by a run; dropping them releases every file and connection.
struct RunResources<S> {
    reader: BillingReader,
    sink: S,
    skip_ledger: Option<SkipLedger>
}

/// Drives a billing run: validation, then chunked read, process and commit.
///
/// Each call to `run` is a fresh run. Records are handled strictly in input order and a
/// chunk is committed before the next one starts filling. A failed run leaves every
/// previously committed chunk in place.
pub struct ChunkOrchestrator {
    settings: Arc<JobSettings>,
    processor: BillingProcessor,
    retry_policy: RetryPolicy,
    observer: Arc<dyn RetryObserver>,
    cancellation: CancellationToken,
    state: RunState
}

impl ChunkOrchestrator {
    pub fn new(settings: Arc<JobSettings>) -> Self {
        let processor = BillingProcessor::new(Arc::new(settings.pricing), settings.spending_threshold);
        let retry_policy = RetryPolicy::new(settings.max_retries, settings.retry_backoff());

        Self {
            settings,
            processor,
            retry_policy,
            observer: Arc::new(LoggingRetryObserver),
            cancellation: CancellationToken::new(),
            state: RunState::Idle
        }
    }

    pub fn with_retry_observer(mut self, observer: Arc<dyn RetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the job against the configured SQLite database and the report file named
    /// by `output.file`.
    ///
    /// # Errors
    /// Returns the `ValidationError` when the parameters are rejected; nothing is opened in that case.
    /// Failures after validation are reported through `RunReport::failure`.
    pub fn run(&mut self, parameters: &JobParameters) -> Result<RunReport, ValidationError> {
        let settings = self.settings.clone();

        self.run_with(parameters, |run_parameters| {
            let store = BillingStore::open(&settings.database, settings.commit_timeout())?;
            let report = ReportWriter::create(&run_parameters.output_file)?;

            Ok(BillingSink::new(store, Some(report)))
        })
    }

    /// Same as `run`, with the primary sink supplied by `open_sink` once validation passed.
    pub fn run_with<S, F>(&mut self, parameters: &JobParameters, open_sink: F) -> Result<RunReport, ValidationError>
    where
        S: ChunkSink,
        F: FnOnce(&RunParameters) -> Result<S, StorageError>
    {
        self.state = RunState::Idle;
        self.transition(RunState::Validating);

        let run_parameters = match ParametersValidator::validate(parameters) {
            Ok(run_parameters) => run_parameters,
            Err(error) => {
                error!("Job parameters rejected: {error}");
                self.transition(RunState::Failed);
                return Err(error)
            }
        };

        let span = info_span!("billing_job", year = run_parameters.data_year, month = run_parameters.data_month);
        let _guard = span.enter();

        let mut counts = RunCounts::default();
        let result = self.open_resources(&run_parameters, open_sink)
            .and_then(|mut resources| self.stream(&mut resources, &mut counts));

        let report = match result {
            Ok(()) => {
                self.transition(RunState::Completed);
                RunReport { status: RunStatus::Completed, counts, failure: None }
            }
            Err(failure) => {
                error!("Run failed: {failure}");
                self.transition(RunState::Failed);
                RunReport { status: RunStatus::Failed, counts, failure: Some(failure) }
            }
        };

        info!("{report}");

        Ok(report)
    }

    fn open_resources<S, F>(&self, run_parameters: &RunParameters, open_sink: F) -> Result<RunResources<S>, PipelineError>
    where
        S: ChunkSink,
        F: FnOnce(&RunParameters) -> Result<S, StorageError>
    {
        if let Some(staging_directory) = &self.settings.staging_directory {
            stage_input(&run_parameters.input_file, staging_directory)?;
        }

        let reader = BillingReader::open(&run_parameters.input_file, self.settings.reader_has_header)
            .map_err(PipelineError::Open)?;

        let sink = open_sink(run_parameters).map_err(PipelineError::Open)?;

        let skip_ledger = run_parameters.skip_file.as_deref()
            .map(SkipLedger::create)
            .transpose()
            .map_err(PipelineError::Open)?;

        Ok(RunResources { reader, sink, skip_ledger })
    }

    fn stream<S: ChunkSink>(&mut self, resources: &mut RunResources<S>, counts: &mut RunCounts) -> Result<(), PipelineError> {
        self.transition(RunState::Streaming);

        let skip_policy = SkipPolicy::new(resources.skip_ledger.is_some(), self.settings.skip_limit);
        let mut chunk = Chunk::with_capacity(self.settings.chunk_size);

        loop {
            if self.cancellation.is_cancelled() {
                warn!("Cancellation requested, discarding {} buffered record(s)", chunk.len());
                return Err(PipelineError::Cancelled)
            }

            let Some(result) = resources.reader.next() else {
                break
            };

            match result {
                Ok(record) => {
                    counts.read += 1;
                    let verdict = self.processor.process(&record);

                    match verdict {
                        Verdict::Keep(_) => counts.kept += 1,
                        Verdict::Drop => counts.dropped += 1
                    }

                    chunk.push(record, verdict);

                    if chunk.is_full() {
                        self.commit(&mut chunk, &mut resources.sink, counts)?;
                    }
                }
                Err(failure) => {
                    if skip_policy.classify(&failure, counts.skipped) == SkipDecision::Fatal {
                        return Err(fatal_read_failure(failure, skip_policy))
                    }

                    if let (ReadFailure::Parse(parse_failure), Some(ledger)) = (failure, resources.skip_ledger.as_mut()) {
                        warn!("Skipping line {}: {}", parse_failure.line, parse_failure.reason);

                        ledger.append(parse_failure.line, &parse_failure.reason, &parse_failure.content)
                            .map_err(PipelineError::SkipLedger)?;

                        counts.skipped += 1;
                    }
                }
            }
        }

        if !chunk.is_empty() {
            self.commit(&mut chunk, &mut resources.sink, counts)?;
        }

        Ok(())
    }

    fn commit<S: ChunkSink>(&mut self, chunk: &mut Chunk, sink: &mut S, counts: &mut RunCounts) -> Result<(), PipelineError> {
        self.transition(RunState::Committing);

        let result = self.retry_policy.run(self.observer.as_ref(), || sink.write_chunk(chunk));

        match result {
            Ok(()) => {
                counts.chunks_committed += 1;
                counts.rows_written += chunk.len() as u64;
                counts.rows_reported += chunk.reports().len() as u64;
                chunk.clear();
                self.transition(RunState::Streaming);

                Ok(())
            }
            Err(failure) => {
                chunk.clear();

                Err(PipelineError::CommitFailed {
                    attempts: failure.attempts,
                    source: failure.error
                })
            }
        }
    }

    fn transition(&mut self, next: RunState) {
        debug!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn fatal_read_failure(failure: ReadFailure, skip_policy: SkipPolicy) -> PipelineError {
    match (failure, skip_policy.limit()) {
        (ReadFailure::Io { line, source }, _) => PipelineError::Read { line, source },
        (ReadFailure::Parse(parse_failure), Some(limit)) => PipelineError::SkipLimitExceeded {
            limit,
            line: parse_failure.line,
            reason: parse_failure.reason
        },
        (ReadFailure::Parse(parse_failure), None) => PipelineError::Parse {
            line: parse_failure.line,
            reason: parse_failure.reason
        }
    }
}
