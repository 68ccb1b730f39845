//! Demodulator error type
//!
//! The bus and chip layers only report success or failure, so there is a
//! single error kind. The operation name is carried for logging.

use thiserror::Error;

/// Result type for demodulator operations
pub type DmdResult<T> = Result<T, DmdError>;

/// Generic device failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmdError {
    /// A bus transfer or collaborator call failed
    #[error("device error during {op}")]
    Device { op: &'static str },
}

impl DmdError {
    pub fn device(op: &'static str) -> Self {
        Self::Device { op }
    }

    /// Name of the operation that failed
    pub fn op(&self) -> &'static str {
        match self {
            Self::Device { op } => op,
        }
    }
}

/// Collects results of a sequence of steps that must all run.
///
/// Mirrors the chip's OR-ed status codes: every step is executed, and the
/// sequence fails if any step failed. The first failure is the one reported.
#[derive(Debug, Default)]
pub struct ErrorAccumulator {
    first: Option<DmdError>,
    failures: u32,
}

impl ErrorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step's outcome
    pub fn record(&mut self, result: DmdResult<()>) {
        if let Err(e) = result {
            self.failures += 1;
            if self.first.is_none() {
                self.first = Some(e);
            }
        }
    }

    /// Number of failed steps so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn finish(self) -> DmdResult<()> {
        match self.first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
