use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// An operation received a vector, target, or topology of the wrong length.
    SizeMismatch(String),
    /// A persisted stream's tag sequence or a numeric token did not match the
    /// expected grammar, or the stream could not be read/written.
    InvalidFormat(String),
    /// A user-defined cost policy was selected without supplying the function.
    UserCostFunctionMissing,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SizeMismatch(msg) => write!(f, "size mismatch: {msg}"),
            Error::InvalidFormat(msg) => write!(f, "invalid format: {msg}"),
            Error::UserCostFunctionMissing => {
                write!(f, "user cost function selected but not supplied")
            }
        }
    }
}

impl std::error::Error for Error {}
