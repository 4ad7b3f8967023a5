use thiserror::Error;

#[derive(Debug, Error)]
pub enum PgmError {
    #[error("not a gray-map file: magic {0:?}")]
    BadMagic(String),

    #[error("malformed gray-map header: {0}")]
    Malformed(String),

    #[error("unsupported maxval {0}: only 8-bit gray maps are supported")]
    UnsupportedMaxval(u32),

    #[error("pixel data ends early: expected {expected} samples, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PgmError>;
