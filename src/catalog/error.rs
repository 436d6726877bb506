//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur while loading a data file.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// Failed to read the file.
    #[error("Failed to read data file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a JSON array of records.
    #[error("Failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let err = CatalogError::Read {
            path: PathBuf::from("data/episodes.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("Failed to read data file"));
        assert!(err.to_string().contains("data/episodes.json"));
    }

    #[test]
    fn test_parse_error_display() {
        let source = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = CatalogError::Parse {
            path: PathBuf::from("data/clauses.json"),
            source,
        };
        assert!(err.to_string().contains("Failed to parse data file"));
    }
}
