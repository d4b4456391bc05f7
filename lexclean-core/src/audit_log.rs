// lexclean-core/src/audit_log.rs
//! Structured, append-only records of scan decisions.
//!
//! Each record names the source, the field, a SHA-256 of the scanned text
//! and the opaque indicator ids. Neither the text nor any variant is ever
//! written, so audit files can be shared freely.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use crate::scanner::ContaminationVerdict;

/// SHA-256 hex digest of a scanned text.
pub fn hash_text(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// One auditable scan decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanAuditRecord {
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub run_id: String,
    /// File path or other identifier of where the text came from.
    pub source_id: String,
    #[serde(default)]
    pub field: Option<String>,
    pub input_hash: String,
    pub matched: bool,
    pub indicators: Vec<String>,
}

impl ScanAuditRecord {
    pub fn new(
        run_id: &str,
        source_id: &str,
        field: Option<&str>,
        text: &str,
        verdict: &ContaminationVerdict,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            run_id: run_id.to_string(),
            source_id: source_id.to_string(),
            field: field.map(str::to_string),
            input_hash: hash_text(text),
            matched: verdict.matched,
            indicators: verdict.indicator_labels(),
        }
    }
}

/// Appends [`ScanAuditRecord`]s to a JSON-lines file.
pub struct AuditLog {
    writer: BufWriter<File>,
    run_id: String,
}

impl AuditLog {
    /// Opens (or creates) `path` for appending, under a fresh run id.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open audit log {}", path.display()))?;
        let run_id = Uuid::new_v4().to_string();
        debug!("Audit log {} opened for run {}.", path.display(), run_id);
        Ok(Self { writer: BufWriter::new(file), run_id })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn append(&mut self, record: &ScanAuditRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to serialize audit record")?;
        self.writer.write_all(b"\n").context("Failed to write audit record")?;
        Ok(())
    }

    /// Builds and appends a record for one scanned text.
    pub fn record(
        &mut self,
        source_id: &str,
        field: Option<&str>,
        text: &str,
        verdict: &ContaminationVerdict,
    ) -> Result<()> {
        let record = ScanAuditRecord::new(&self.run_id, source_id, field, text, verdict);
        self.append(&record)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush audit log")
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::scanner::ContaminationScanner;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_records_hold_hashes_not_text() -> Result<()> {
        let scanner = ContaminationScanner::new(Arc::new(build_index("orange", &["es"], 10)?));
        let dir = tempdir()?;
        let path = dir.path().join("audit.jsonl");

        let mut log = AuditLog::create(&path)?;
        let text = "an orange a day";
        log.record("samples.json", Some("output"), text, &scanner.is_contaminated(text))?;
        log.record("samples.json", Some("input"), "clean", &scanner.is_contaminated("clean"))?;
        log.flush()?;

        let contents = std::fs::read_to_string(&path)?;
        assert!(!contents.contains("orange"));
        let records: Vec<ScanAuditRecord> = contents
            .lines()
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?;
        assert_eq!(records.len(), 2);
        assert!(records[0].matched);
        assert_eq!(records[0].input_hash, hash_text(text));
        assert_eq!(records[0].run_id, records[1].run_id);
        assert!(records[1].indicators.is_empty());
        Ok(())
    }
}
