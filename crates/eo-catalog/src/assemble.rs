//! Combine a directory of per-order summaries into one catalog payload.
//!
//! Each `*.json` file directly inside the directory holds one record. The
//! combined payload (`eo.json` by convention) is skipped so the output can
//! live next to its inputs.

use crate::error::{CatalogError, Result};
use crate::record::{Record, RecordCollection};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the combined payload
pub const PAYLOAD_FILE_NAME: &str = "eo.json";

#[derive(Debug)]
pub struct AssembleReport {
    pub collection: RecordCollection,
    /// Summary files that failed to read or parse, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

fn is_summary_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
        && path.file_name().and_then(|name| name.to_str()) != Some(PAYLOAD_FILE_NAME)
}

fn read_record(path: &Path) -> std::result::Result<Record, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}

/// Read every summary file in `dir` (file name order) and stamp the result
/// with the current UTC time.
pub fn assemble_dir(dir: &Path) -> Result<AssembleReport> {
    if !dir.is_dir() {
        return Err(CatalogError::Io {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_summary_file(path))
        .collect();

    let mut records = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for path in files {
        match read_record(&path) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::warn!("Skipping {}: {}", path.display(), reason);
                skipped.push((path, reason));
            }
        }
    }

    log::debug!(
        "Assembled {} records from {} ({} skipped)",
        records.len(),
        dir.display(),
        skipped.len()
    );

    let build_time = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    Ok(AssembleReport {
        collection: RecordCollection::new(records, Some(build_time)),
        skipped,
    })
}

/// Atomically replace `path` with the pretty-printed payload
pub fn write_collection(path: &Path, collection: &RecordCollection) -> Result<()> {
    let write_err = |source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            serde_json::to_writer_pretty(&mut *f, collection).map_err(io::Error::from)?;
            f.write_all(b"\n")?;
            f.flush()
        })
        .map_err(|err| match err {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => write_err(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DateValue;
    use chrono::NaiveDate;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_assemble_reads_summaries_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"{"eo_number": 14002, "title": "Second"}"#);
        write(dir.path(), "a.json", r#"{"eo_number": "14001", "title": "First"}"#);
        write(dir.path(), "eo.json", r#"{"eos": []}"#);
        write(dir.path(), "notes.txt", "ignored");

        let report = assemble_dir(dir.path()).unwrap();
        let numbers: Vec<u32> = report.collection.iter().map(|r| r.eo_number).collect();
        assert_eq!(numbers, vec![14001, 14002]);
        assert!(report.skipped.is_empty());
        assert!(report.collection.built_at().is_some());
    }

    #[test]
    fn test_bad_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.json", r#"{"eo_number": 1}"#);
        write(dir.path(), "broken.json", "{");
        write(dir.path(), "no_number.json", r#"{"title": "Untitled"}"#);

        let report = assemble_dir(dir.path()).unwrap();
        assert_eq!(report.collection.len(), 1);
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_dates_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "14148.json",
            r#"{
                "eo_number": 14148,
                "effective_date": "January 20, 2025, 12:01 a.m.",
                "signing_date": "2025-01-20",
                "timestamp": 1737417600.5
            }"#,
        );

        let report = assemble_dir(dir.path()).unwrap();
        let record = &report.collection.records[0];
        let jan_20 = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert_eq!(record.effective_date, Some(DateValue::Date(jan_20)));
        assert_eq!(record.signing_date, Some(DateValue::Date(jan_20)));
        assert_eq!(
            record.timestamp.as_ref().map(ToString::to_string).as_deref(),
            Some("2025-01-21")
        );
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            assemble_dir(&missing),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_written_payload_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", r#"{"eo_number": 7, "key_industries": "Energy"}"#);
        let report = assemble_dir(dir.path()).unwrap();

        let out = dir.path().join("out").join(PAYLOAD_FILE_NAME);
        write_collection(&out, &report.collection).unwrap();

        let bytes = fs::read(&out).unwrap();
        let loaded = RecordCollection::from_json_slice(&bytes, "test").unwrap();
        assert_eq!(loaded, report.collection);
    }
}
