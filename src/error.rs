use std::collections::TryReserveError;

use thiserror::Error;

///Errors raised while building, saving or loading a dictionary.
///Errors on the query path are never surfaced through this type; a
///posting list that fails to load is simply treated as empty for that
///query.
#[derive(Debug, Error)]
pub enum DictError {
    ///The corpus would exceed the maximum number of entries (2^32 - 1,
    ///the highest index being reserved as an invalid sentinel)
    #[error("too many entries, the dictionary holds at most 2^32 - 1")]
    TooManyEntries,

    ///The posting list id generator is exhausted
    #[error("out of posting list ids")]
    OutOfIds,

    ///The index file does not start with the expected magic number
    #[error("bad magic number 0x{0:04x}")]
    BadMagic(u16),

    ///The index file has a format version this build cannot read
    #[error("unsupported format version 0x{0:04x}")]
    BadVersion(u16),

    ///Growing one of the internal buffers failed
    #[error("allocation failure")]
    Allocation,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<TryReserveError> for DictError {
    fn from(_: TryReserveError) -> Self {
        DictError::Allocation
    }
}
