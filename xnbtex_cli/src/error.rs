use std::fmt::{Debug, Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

pub enum Error {
    IO(std::io::Error),
    Image(image::ImageError),
    Xnbtex(xnbtex::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    OffsetOutOfRange { offset: usize, len: usize },
    MissingFormat,
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IO(e) => write!(f, "io: {e}"),
            Error::Image(e) => write!(f, "image: {e}"),
            Error::Xnbtex(e) => write!(f, "xnbtex: {e}"),
            Error::ThreadPool(e) => write!(f, "thread pool: {e}"),
            Error::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} is past the end of a {len} byte file")
            }
            Error::MissingFormat => f.write_str("either --format or --surface-format is required"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl From<xnbtex::Error> for Error {
    fn from(value: xnbtex::Error) -> Self {
        Error::Xnbtex(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::IO(value)
    }
}

impl From<image::ImageError> for Error {
    fn from(value: image::ImageError) -> Self {
        Error::Image(value)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(value)
    }
}
