use std::result;
use thiserror::Error;

/// The error type for lookups and removals on ordered maps.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not present in the map.
    #[error("key not found")]
    KeyNotFound,
}

/// Convenience type alias for results produced by ordered maps.
pub type Result<T> = result::Result<T, Error>;
