use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use serde_json::Value;

use crate::config::VaultConfig;
use crate::error::VaultResult;
use crate::models::TransitionRecord;

/// Lock file guarding the read-append-rewrite cycle on daily log files.
const LOCK_FILE: &str = ".actions.lock";

/// Append-only transition log, stored as one JSON array per calendar day
/// under `Logs/<YYYY-MM-DD>_actions.json`.
///
/// Writes are semantically append-only at the record level: the daily file
/// is re-read, extended, and rewritten in full under an exclusive advisory
/// file lock, so concurrent appenders in this process (or a cooperating
/// one) never interleave a partial rewrite.
///
/// Reads are corruption-tolerant throughout: a missing, unparseable, or
/// non-array file is an empty day, and individual records that do not
/// match the expected shape are skipped rather than failing the query.
#[derive(Clone)]
pub struct AuditLog {
    config: Arc<VaultConfig>,
}

impl AuditLog {
    pub fn new(config: Arc<VaultConfig>) -> Self {
        Self { config }
    }

    /// Append a record to today's log file.
    ///
    /// Only a failed final write surfaces as an error; every read-phase
    /// failure is absorbed by starting the day from an empty sequence.
    pub fn append(&self, record: &TransitionRecord) -> VaultResult<()> {
        let logs_dir = self.config.logs_dir();
        fs::create_dir_all(&logs_dir)?;

        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(logs_dir.join(LOCK_FILE))?;
        let mut lock = fd_lock::RwLock::new(lock_file);
        let _guard = lock.write()?;

        let path = self.today_file();
        // Elements are kept as raw JSON values so foreign-shaped records
        // already in the file survive the rewrite verbatim.
        let mut records: Vec<Value> = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(existing)) => existing,
                Ok(_) | Err(_) => Vec::new(),
            },
            Err(_) => Vec::new(),
        };

        records.push(serde_json::to_value(record)?);
        fs::write(&path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    /// The most recent `limit` records across all daily files, newest
    /// first. Ties on identical timestamps keep file order.
    pub fn recent(&self, limit: usize) -> Vec<TransitionRecord> {
        let mut records = Vec::new();
        let entries = match fs::read_dir(self.config.logs_dir()) {
            Ok(entries) => entries,
            Err(_) => return records,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(text) = fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str::<Value>(&text) {
                // A daily file normally holds an array, but a bare object
                // is tolerated as a single-record file.
                Ok(Value::Array(values)) => {
                    records.extend(
                        values
                            .into_iter()
                            .filter_map(|v| serde_json::from_value(v).ok()),
                    );
                }
                Ok(value @ Value::Object(_)) => {
                    if let Ok(record) = serde_json::from_value(value) {
                        records.push(record);
                    }
                }
                _ => continue,
            }
        }

        records.sort_by(|a: &TransitionRecord, b: &TransitionRecord| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        records
    }

    fn today_file(&self) -> PathBuf {
        let day = Local::now().format("%Y-%m-%d");
        self.config.logs_dir().join(format!("{}_actions.json", day))
    }
}
