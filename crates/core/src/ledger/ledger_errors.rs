use thiserror::Error;

/// Errors surfaced by ledger ingestion.
///
/// Row-level validation failures are skipped, not raised; only the two
/// conditions below terminate the pipeline.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Input contains no rows")]
    EmptyInput,

    #[error("No valid trade records: {reason}")]
    NoValidRecords { reason: String },
}
