use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application.
///
/// Only the first three variants abort a discovery run; failures below the
/// module-loading layer degrade to "fewer routes discovered" instead of
/// surfacing here.
#[derive(Debug)]
pub enum Error {
    /// The entry path does not resolve to an existing file.
    FileNotFound(PathBuf),
    /// The named module class is missing from the loaded document.
    ClassNotFound {
        class: String,
        file: PathBuf,
        available: Vec<String>,
    },
    /// No loader strategy could interpret the file.
    ModuleLoadFailure { file: PathBuf, message: String },
    SerializationError(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::FileNotFound(path) => {
                write!(f, "entry file not found: {}", path.display())
            }
            Error::ClassNotFound {
                class,
                file,
                available,
            } => {
                if available.is_empty() {
                    write!(
                        f,
                        "module class '{}' not found in {} (the document declares no modules)",
                        class,
                        file.display()
                    )
                } else {
                    write!(
                        f,
                        "module class '{}' not found in {} (declared modules: {})",
                        class,
                        file.display(),
                        available.join(", ")
                    )
                }
            }
            Error::ModuleLoadFailure { file, message } => {
                write!(
                    f,
                    "could not load module document {}: {}",
                    file.display(),
                    message
                )
            }
            Error::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            Error::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization error: {}", err))
    }
}
