use std::num::ParseIntError;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("Unsupported version input type! Received {kind}.")]
    UnsupportedType { kind: &'static str },
    #[error("Invalid version input! Cause: {0}")]
    Validation(#[from] Validation),
    #[error("Failed to parse version component {atom:?}! Cause: {source}")]
    Parse {
        atom: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Can't select a version out of an empty collection!")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Validation {
    #[error(
        "Version supports only major, minor and patch components, but \
        {count} were given!"
    )]
    TooManyComponents { count: usize },
    #[error("Version components must be non-negative, but {value} was given!")]
    Negative { value: i128 },
    #[error("Version component doesn't fit in an unsigned 64-bit integer!")]
    OutOfRange,
}
