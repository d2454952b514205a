//! Error types and exit-code mapping.
//!
//! Exit codes: 0 success, 1 generic/IO failure, 2 corrupt catalog file.
//! Interactive input problems never surface here; prompts re-ask locally.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure loading or saving the catalog file.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    /// The file exists but does not parse as a record sequence.
    Corrupt { path: PathBuf, detail: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "catalog file error: {e}"),
            StoreError::Corrupt { path, detail } => {
                write!(f, "catalog file {} is corrupt: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Corrupt { .. } => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Map a store failure to a process exit code.
pub fn exit_code_for_store_error(e: &StoreError) -> u8 {
    match e {
        StoreError::Io(_) => 1,
        StoreError::Corrupt { .. } => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let io_err = StoreError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert_eq!(exit_code_for_store_error(&io_err), 1);
        let corrupt = StoreError::Corrupt {
            path: PathBuf::from("custom_dtcs.json"),
            detail: "expected value".to_string(),
        };
        assert_eq!(exit_code_for_store_error(&corrupt), 2);
    }

    #[test]
    fn test_corrupt_display_names_the_file() {
        let corrupt = StoreError::Corrupt {
            path: PathBuf::from("custom_dtcs.json"),
            detail: "expected value at line 1".to_string(),
        };
        let msg = corrupt.to_string();
        assert!(msg.contains("custom_dtcs.json"), "got: {msg}");
        assert!(msg.contains("corrupt"), "got: {msg}");
    }
}
