//! Driver error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The command line could not be parsed.
    #[error("{0}")]
    Options(#[from] getopts::Fail),

    /// An option was given a value of the wrong shape.
    #[error("invalid value {value:?} for --{opt}")]
    InvalidValue { opt: &'static str, value: String },

    /// The fill rectangle has more cells than can be counted.
    #[error("fill area {w}x{h} is too large")]
    FillTooLarge { w: i64, h: i64 },

    #[error("unknown fill mode {0:?} (expected random, alternating, all or empty)")]
    UnknownFill(String),

    #[error("unknown pattern {name:?} (expected one of: {known})")]
    UnknownPattern { name: String, known: String },
}

pub type Result<T> = std::result::Result<T, Error>;
