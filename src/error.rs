//! Everything that can go wrong between receiving a trajectory and returning its reduction.
use std::fmt;

/// Which input encoding a failure relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Wkt,
    WkbHex,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Wkt => f.write_str("WKT"),
            Encoding::WkbHex => f.write_str("WKB hex"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// All errors are terminal for the invocation that raised them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("decode: no trajectory given, specify either WKT or WKB hex")]
    MissingInput,

    #[error("decode: could not parse {encoding} trajectory: {reason}")]
    MalformedInput { encoding: Encoding, reason: String },

    #[error("decode: geometry was {found}, not a linestring")]
    WrongGeometryType { found: String },

    #[error("config: {0:?} is not a valid metric, expected \"time\" or \"distance\"")]
    InvalidMetric(String),

    #[error("config: sample rate must be greater than zero")]
    InvalidSampleRate,

    #[error("decode: trajectory has {len} position(s), at least 2 are required")]
    EmptyTrajectory { len: usize },

    #[error("time resampling: position {index} has no time coordinate")]
    MissingTimestamp { index: usize },

    #[error("time resampling: position {index} has unusable timestamp {value}")]
    InvalidTimestamp { index: usize, value: f64 },

    #[error("resampling: only {len} position(s) left in sampled trajectory")]
    InsufficientSamples { len: usize },

    #[error("encode: could not write {encoding} trajectory: {reason}")]
    EncodeFailed { encoding: Encoding, reason: String },
}

impl Error {
    pub(crate) fn malformed(encoding: Encoding, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            encoding,
            reason: reason.into(),
        }
    }
}
