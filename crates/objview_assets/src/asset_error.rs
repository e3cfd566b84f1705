//! Asset error types
//!
//! Provides error handling for bitmap, OBJ and mesh loading.

use std::io;
use std::fmt;

/// Error type for asset operations
#[derive(Debug)]
pub enum AssetError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// The file does not start with the expected magic bytes
    InvalidSignature([u8; 2]),
    /// The input ended before a fixed-size structure was complete
    Truncated { expected: usize, actual: usize },
    /// Valid file, but a variant we do not decode (bit depth, compression)
    Unsupported(String),
    /// Malformed text on a given 1-based line
    Parse { line: usize, message: String },
    /// A face refers to an element that does not exist
    IndexOutOfRange { kind: &'static str, index: usize, len: usize },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::InvalidSignature(sig) => write!(
                f,
                "Invalid bitmap signature: expected \"BM\", found {:?}",
                String::from_utf8_lossy(sig)
            ),
            AssetError::Truncated { expected, actual } => write!(
                f,
                "Truncated asset: expected at least {} bytes, found {}",
                expected, actual
            ),
            AssetError::Unsupported(what) => write!(f, "Unsupported asset format: {}", what),
            AssetError::Parse { line, message } => {
                write!(f, "Asset parse error on line {}: {}", line, message)
            }
            AssetError::IndexOutOfRange { kind, index, len } => write!(
                f,
                "Face {} index {} out of range (only {} defined)",
                kind, index, len
            ),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let asset_err = AssetError::Io(io_err);
        let msg = format!("{}", asset_err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn test_signature_display() {
        let err = AssetError::InvalidSignature(*b"PK");
        let msg = format!("{}", err);
        assert!(msg.contains("BM"));
        assert!(msg.contains("PK"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = AssetError::Parse { line: 12, message: "invalid float".to_string() };
        let msg = format!("{}", err);
        assert!(msg.contains("line 12"));
        assert!(msg.contains("invalid float"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = AssetError::IndexOutOfRange { kind: "normal", index: 7, len: 6 };
        let msg = format!("{}", err);
        assert!(msg.contains("normal"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let asset_err: AssetError = io_err.into();
        match asset_err {
            AssetError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(AssetError::Io(io_err).source().is_some());
        assert!(AssetError::Unsupported("16 bpp".to_string()).source().is_none());
    }
}
