use std::path::PathBuf;

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidArgument(String),
    /// The lattice vectors are linearly dependent or not finite
    DegenerateLattice(String),
    /// No atomic data is known for this atom name
    UnknownElement(String),
    /// Cartesian coordinates were requested without a lattice
    MissingLattice,
    /// Tried to access an element past the end of a collection
    IndexOutOfRange {
        /// the requested index
        index: usize,
        /// the size of the collection
        size: usize,
    },
    /// The content of a trajectory file does not follow the expected format
    MalformedTrajectory {
        /// 1-based line number where the problem was found
        line: usize,
        /// description of the problem
        message: String,
    },
    /// Error while reading or writing a file
    Io {
        /// path of the file, if the error is associated with a file
        path: Option<PathBuf>,
        /// the underlying I/O error
        error: std::io::Error,
    },
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
}

impl Error {
    /// Attach the `path` of the file being read or written to an I/O error.
    /// Other errors are returned unchanged.
    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Error {
        match self {
            Error::Io { path: None, error } => Error::Io {
                path: Some(path.into()),
                error: error,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
            Error::DegenerateLattice(e) => write!(f, "degenerate lattice: {}", e),
            Error::UnknownElement(name) => write!(f, "unknown element '{}'", name),
            Error::MissingLattice => write!(f, "a lattice is required for cartesian coordinates"),
            Error::IndexOutOfRange { index, size } => {
                write!(f, "index {} is out of range for a collection of size {}", index, size)
            }
            Error::MalformedTrajectory { line, message } => {
                write!(f, "malformed trajectory at line {}: {}", line, message)
            }
            Error::Io { path: Some(path), error } => {
                write!(f, "I/O error with '{}': {}", path.display(), error)
            }
            Error::Io { path: None, error } => write!(f, "I/O error: {}", error),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidArgument(_) |
            Error::DegenerateLattice(_) |
            Error::UnknownElement(_) |
            Error::MissingLattice |
            Error::IndexOutOfRange { .. } |
            Error::MalformedTrajectory { .. } => None,
            Error::Io { error, .. } => Some(error),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::Io { path: None, error: error }
    }
}
