use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} out of range for SimpleVector of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("capacity overflow: {capacity} slots do not fit in a single allocation")]
    CapacityOverflow { capacity: usize },

    #[error("memory allocation of {bytes} bytes failed")]
    AllocFailed { bytes: usize },
}

impl Error {
    pub fn out_of_range(index: usize, len: usize) -> Error {
        Error::OutOfRange { index, len }
    }

    /// Returns `true` if the error originated in the allocator rather than
    /// in a bounds check.
    pub fn is_alloc_error(&self) -> bool {
        matches!(
            self,
            Error::CapacityOverflow { .. } | Error::AllocFailed { .. }
        )
    }
}
