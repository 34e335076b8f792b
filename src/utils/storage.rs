//! Best-effort local persistence for an [`Exchange`].
//!
//! The working state is a small JSON document with `participants`, `gifts`
//! and `assignments` keys. Each key is decoded on its own, so a damaged entry
//! under one key only resets that key. Snapshots use bincode and are meant for archiving
//! a finished drawing.

use crate::exchange::{default_gifts, Assignment, Exchange, Gift, Participant};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("encode exchange state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: bincode::Error,
    },
}

/// Loads the exchange stored at `path`.
///
/// A missing or malformed document yields the default exchange, and a key
/// that fails to decode falls back to its default alone. Only I/O failures
/// other than "not found" are reported.
pub fn load_exchange<P: AsRef<Path>>(path: P) -> Result<Exchange, StorageError> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved exchange, starting fresh");
            return Ok(Exchange::default());
        }
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let document: Value = match serde_json::from_str(&text) {
        Ok(document) => document,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "discarding unreadable exchange state");
            return Ok(Exchange::default());
        }
    };

    let participants: Vec<Participant> =
        decode_key(path, &document, "participants").unwrap_or_default();
    let gifts: Vec<Gift> = decode_key(path, &document, "gifts").unwrap_or_else(default_gifts);
    let assignments: Vec<Assignment> =
        decode_key(path, &document, "assignments").unwrap_or_default();
    Ok(Exchange::from_parts(participants, gifts, assignments))
}

fn decode_key<T: DeserializeOwned>(path: &Path, document: &Value, key: &str) -> Option<T> {
    let value = document.get(key)?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!(path = %path.display(), key, error = %err, "discarding unreadable key");
            None
        }
    }
}

pub fn save_exchange<P: AsRef<Path>>(path: P, exchange: &Exchange) -> Result<(), StorageError> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(exchange)?;
    write_file(path, text.as_bytes())?;
    debug!(path = %path.display(), "saved exchange");
    Ok(())
}

pub fn save_snapshot<P: AsRef<Path>>(path: P, exchange: &Exchange) -> Result<(), StorageError> {
    let path = path.as_ref();
    let bytes = bincode::serialize(exchange).map_err(|source| StorageError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, &bytes)
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Exchange, StorageError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize(&bytes).map_err(|source| StorageError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, bytes).map_err(write_err)
}
