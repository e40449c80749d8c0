//! On-disk research cache.
//!
//! One JSON file per company key holding `{key, timestamp, content}`. File
//! names encode the key losslessly, and a record whose stored key differs
//! from the requested one reads as a miss. An entry is
//! honored while `now - timestamp <= ttl`; older entries read as misses and are
//! overwritten on the next successful lookup. Writes go to a temp file in the
//! cache directory and are renamed into place, so readers never see a torn file.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::research::models::CompanyResearch;

pub const DEFAULT_CACHE_TTL_SECS: i64 = 86_400;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("cache write task failed: {0}")]
    Task(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    /// Normalized key the entry was written for.
    #[serde(default)]
    key: String,
    /// Unix seconds when the entry was written.
    timestamp: i64,
    content: CompanyResearch,
}

#[derive(Debug, Clone)]
pub struct ResearchCache {
    dir: PathBuf,
    ttl_secs: i64,
}

impl ResearchCache {
    pub fn new(dir: impl Into<PathBuf>, ttl_secs: i64) -> Self {
        Self {
            dir: dir.into(),
            ttl_secs,
        }
    }

    /// Normalized cache key for a company name.
    pub fn key_for(company_name: &str) -> String {
        company_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Alphanumerics are kept; every other byte becomes `_xx` hex, so distinct
    /// keys never share a file and no key escapes the cache directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut stem = String::with_capacity(key.len());
        for c in key.chars() {
            if c.is_alphanumeric() {
                stem.push(c);
            } else {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(stem, "_{byte:02x}");
                }
            }
        }
        if stem.is_empty() {
            stem.push('_');
        }
        self.dir.join(format!("{stem}.json"))
    }

    /// Reads a fresh entry. Missing or expired entries are `Ok(None)`.
    pub async fn get(&self, key: &str, now: i64) -> Result<Option<CompanyResearch>, CacheError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: CacheRecord = serde_json::from_slice(&bytes)?;
        if record.key != key {
            debug!(key, stored = %record.key, "Research cache entry belongs to another key");
            return Ok(None);
        }
        let age = now - record.timestamp;
        if age > self.ttl_secs {
            debug!(key, age, ttl = self.ttl_secs, "Research cache entry expired");
            return Ok(None);
        }

        debug!(key, age, "Research cache hit");
        Ok(Some(record.content))
    }

    /// Writes an entry stamped with `now`, replacing any previous one.
    pub async fn put(
        &self,
        key: &str,
        content: &CompanyResearch,
        now: i64,
    ) -> Result<(), CacheError> {
        let record = CacheRecord {
            key: key.to_string(),
            timestamp: now,
            content: content.clone(),
        };
        let body = serde_json::to_vec_pretty(&record)?;
        let dir = self.dir.clone();
        let path = self.path_for(key);

        tokio::task::spawn_blocking(move || -> Result<(), CacheError> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&body)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| CacheError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| CacheError::Task(e.to_string()))??;

        debug!(key, "Research cache entry written");
        Ok(())
    }
}
