//! Flat-file persistence for the DTC catalog.
//!
//! The whole record sequence lives in one JSON file (4-space indented,
//! array of record objects). A missing file is an empty catalog, not an
//! error. Saves replace the file wholesale; there is no atomic rename or
//! partial-write protection, which is acceptable for a single-user,
//! low-frequency tool.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::DtcRecord;
use crate::errors::StoreError;

/// Default catalog filename, resolved in the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "custom_dtcs.json";

/// Env override for the catalog path, below the `--file` flag in precedence.
pub const CATALOG_FILE_ENV: &str = "CUSTOM_DTC_FILE";

/// Handle to the catalog file. Cheap to construct; every load/save opens
/// the file fresh.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    /// Resolve the catalog path: explicit flag, else `CUSTOM_DTC_FILE`,
    /// else `./custom_dtcs.json`.
    pub fn resolve(flag: Option<&Path>) -> Self {
        if let Some(p) = flag {
            return CatalogStore::new(p);
        }
        if let Ok(v) = env::var(CATALOG_FILE_ENV) {
            let t = v.trim();
            if !t.is_empty() {
                return CatalogStore::new(t);
            }
        }
        CatalogStore::new(DEFAULT_CATALOG_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full record sequence. A missing file yields an empty
    /// catalog; anything unparsable is a hard `Corrupt` failure.
    pub fn load(&self) -> Result<Vec<DtcRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    /// Serialize the full sequence back to the file, replacing it.
    pub fn save(&self, records: &[DtcRecord]) -> Result<(), StoreError> {
        let mut out = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
        records.serialize(&mut ser).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            detail: e.to_string(),
        })?;
        out.push(b'\n');
        fs::write(&self.path, out).map_err(StoreError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DtcRecord> {
        vec![DtcRecord {
            code: "U4001".to_string(),
            header: "Network".to_string(),
            category: "Communication Systems".to_string(),
            title: "CAN bus offline".to_string(),
            description: "No traffic seen on the custom CAN segment".to_string(),
            possible_fixes: vec!["Check termination resistors".to_string()],
            pinpoint_test: "PP-014".to_string(),
        }]
    }

    #[test]
    fn test_load_missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let store = CatalogStore::new(dir.path().join("custom_dtcs.json"));
        assert_eq!(store.load().expect("load"), Vec::new());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let store = CatalogStore::new(dir.path().join("custom_dtcs.json"));
        let records = sample();
        store.save(&records).expect("save");
        assert_eq!(store.load().expect("load"), records);
    }

    #[test]
    fn test_save_of_unchanged_data_is_byte_identical() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let store = CatalogStore::new(dir.path().join("custom_dtcs.json"));
        store.save(&sample()).expect("save");
        let first = fs::read(store.path()).expect("read");
        let reloaded = store.load().expect("load");
        store.save(&reloaded).expect("save again");
        let second = fs::read(store.path()).expect("read");
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_file_is_a_hard_failure() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("custom_dtcs.json");
        fs::write(&path, "{ not a catalog").expect("write");
        let err = CatalogStore::new(&path).load().expect_err("must fail");
        assert!(matches!(err, StoreError::Corrupt { .. }), "got: {err}");
    }

    #[test]
    fn test_tolerates_records_missing_optional_fields() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("custom_dtcs.json");
        fs::write(
            &path,
            r#"[{"code":"B4201","header":"Body","category":"Body Control Modules","title":"t","description":"d"}]"#,
        )
        .expect("write");
        let records = CatalogStore::new(&path).load().expect("load");
        assert_eq!(records[0].possible_fixes, Vec::<String>::new());
        assert_eq!(records[0].pinpoint_test, "");
    }

    #[test]
    fn test_resolve_prefers_flag_over_env() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let flagged = dir.path().join("flagged.json");
        let store = CatalogStore::resolve(Some(flagged.as_path()));
        assert_eq!(store.path(), flagged.as_path());
    }
}
