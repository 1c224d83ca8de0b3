use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq, Eq)]
pub enum Error {
    /// input ends before the last block of the texture
    UnexpectedEndOfData {
        expected: usize,
        actual: usize,
    },
    /// surface format tag that is not a dxt block format
    UnsupportedFormat(i32),
    InvalidDimensions {
        width: u32,
        height: u32,
    },
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedEndOfData { expected, actual } => {
                write!(f, "unexpected end of data: need {expected} bytes, got {actual}")
            }
            Error::UnsupportedFormat(tag) => write!(f, "unsupported surface format {tag}"),
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cold]
pub(crate) fn err_end_of_data(expected: usize, actual: usize) -> Error {
    Error::UnexpectedEndOfData { expected, actual }
}
