use std::fmt;
use std::path::PathBuf;

/// Result type for synclog-parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing log sources
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// JSON encoding/decoding failed
    Json(serde_json::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),

    /// Archive could not be read or extracted
    Zip(zip::result::ZipError),

    /// Domain model error (document import/export)
    Types(synclog_types::Error),

    /// Group item is missing required comma-separated fields
    MalformedEntry { section: &'static str, entry: String },

    /// Entry refers to an account that was never listed
    UnknownAccount {
        section: &'static str,
        account_id: String,
    },

    /// Verbose calendar refers to a calendar its account does not own
    UnknownCalendar {
        account_id: String,
        calendar_id: String,
    },

    /// Normalized object literal was rejected by the JSON decoder
    ObjectLiteral {
        raw: String,
        source: serde_json::Error,
    },

    /// Object literal decoded to something other than an object
    NotAnObject { raw: String },

    /// Decoded object lacks a required key
    MissingField { field: &'static str, raw: String },

    /// Failure while processing one source, with the source attached
    Source { path: PathBuf, source: Box<Error> },
}

impl Error {
    /// Attach the source path, keeping an existing one.
    pub fn in_source(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Source { .. } => self,
            other => Error::Source {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// Path of the source that failed, when known.
    pub fn source_path(&self) -> Option<&PathBuf> {
        match self {
            Error::Source { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::Zip(err) => write!(f, "Archive error: {}", err),
            Error::Types(err) => write!(f, "{}", err),
            Error::MalformedEntry { section, entry } => {
                write!(f, "Malformed {} entry: {:?}", section, entry)
            }
            Error::UnknownAccount {
                section,
                account_id,
            } => write!(f, "{} entry refers to unknown account '{}'", section, account_id),
            Error::UnknownCalendar {
                account_id,
                calendar_id,
            } => write!(
                f,
                "Unknown calendar '{}' in account '{}'",
                calendar_id, account_id
            ),
            Error::ObjectLiteral { raw, source } => {
                write!(f, "Could not decode object literal ({}): {}", source, raw)
            }
            Error::NotAnObject { raw } => write!(f, "Object literal is not an object: {}", raw),
            Error::MissingField { field, raw } => {
                write!(f, "Object literal has no '{}' field: {}", field, raw)
            }
            Error::Source { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Zip(err) => Some(err),
            Error::Types(err) => Some(err),
            Error::ObjectLiteral { source, .. } => Some(source),
            Error::Source { source, .. } => Some(source.as_ref()),
            Error::MalformedEntry { .. }
            | Error::UnknownAccount { .. }
            | Error::UnknownCalendar { .. }
            | Error::NotAnObject { .. }
            | Error::MissingField { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err)
    }
}

impl From<synclog_types::Error> for Error {
    fn from(err: synclog_types::Error) -> Self {
        Error::Types(err)
    }
}
