//! # Dataset Loader
//!
//! Reads the election dataset into a generic `serde_json::Value` tree.
//! No coercion happens here: a field that has the wrong shape is still
//! loaded, and it is up to the validator or the catalog to deal with it.
//!
//! Loading is side-effect free and repeatable. Caching is a display-layer
//! concern and lives in [`crate::cache`].

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{json, Value};

use crate::error::LoadError;

/// Conventional file name of the dataset, looked up next to the program.
pub const DEFAULT_DATASET_FILE: &str = "election_data.json";

/// Read and parse the dataset at `path`.
///
/// # Errors
///
/// - [`LoadError::FileNotFound`] if the path does not exist, cannot be
///   probed, is not a file, or cannot be opened for lack of permission.
/// - [`LoadError::MalformedJson`] if the content is not valid JSON.
/// - [`LoadError::UnknownIo`] for any other read failure, including content
///   that is not valid UTF-8.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let not_found = || LoadError::FileNotFound {
        path: path.to_path_buf(),
    };

    match path.try_exists() {
        Ok(true) if !path.is_dir() => {}
        Ok(_) | Err(_) => return Err(not_found()),
    }

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => not_found(),
        _ => LoadError::UnknownIo {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "read dataset file");

    serde_json::from_str(&content).map_err(|e| LoadError::malformed(Some(path.to_path_buf()), &e))
}

/// Parse dataset text that is already in memory.
///
/// # Errors
///
/// Returns [`LoadError::MalformedJson`] if `text` is not valid JSON.
pub fn parse_dataset(text: &str) -> Result<Value, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::malformed(None, &e))
}

/// The dataset a display layer falls back to when loading fails.
pub fn empty_dataset() -> Value {
    json!({ "parties": [], "districts": {} })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use std::io::Write;

    #[test]
    fn loads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"parties": [{{"name": "A"}}], "districts": {{}}}}"#).unwrap();

        let value = load_dataset(file.path()).unwrap();
        assert_eq!(value["parties"][0]["name"], "A");
        assert!(value["districts"].as_object().unwrap().is_empty());
    }

    #[test]
    fn loading_twice_yields_same_tree() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"parties": [], "districts": {{"D1": []}}}}"#).unwrap();

        let first = load_dataset(file.path()).unwrap();
        let second = load_dataset(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::FileNotFound);
    }

    #[test]
    fn directory_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::FileNotFound);
    }

    #[test]
    fn path_below_a_regular_file_is_file_not_found() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let below = file.path().join(DEFAULT_DATASET_FILE);
        assert!(!below.exists());

        let err = load_dataset(&below).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::FileNotFound);
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_file_not_found() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read regardless of mode bits.
        if std::fs::read(file.path()).is_ok() {
            return;
        }
        let err = load_dataset(file.path()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::FileNotFound);
    }

    #[test]
    fn truncated_document_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"parties": [{{"name": "A""#).unwrap();

        let err = load_dataset(file.path()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::MalformedJson);
        match err {
            LoadError::MalformedJson { path, line, .. } => {
                assert_eq!(path.as_deref(), Some(file.path()));
                assert_eq!(line, 1);
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_unknown_io() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = load_dataset(file.path()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::UnknownIo);
    }

    #[test]
    fn parse_accepts_any_json_value() {
        assert!(parse_dataset("[1, 2, 3]").unwrap().is_array());
        assert_eq!(
            parse_dataset("{").unwrap_err().kind(),
            LoadErrorKind::MalformedJson
        );
    }

    #[test]
    fn empty_dataset_has_both_fields() {
        let empty = empty_dataset();
        assert!(empty["parties"].as_array().unwrap().is_empty());
        assert!(empty["districts"].as_object().unwrap().is_empty());
    }
}
