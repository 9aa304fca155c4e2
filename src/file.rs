// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::file(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::file(dir, e))?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Write one pretty-printed JSON document (two-space indent), replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| Error::file(path, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n").map_err(|e| Error::file(path, e))?;
    out.flush().map_err(|e| Error::file(path, e))?;
    Ok(path.to_path_buf())
}

fn append_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::file(path, e))?;
    file.write_all(text.as_bytes()).map_err(|e| Error::file(path, e))?;
    file.flush().map_err(|e| Error::file(path, e))
}

/// Append one compact JSON object as a line (JSON Lines).
pub fn append_jsonl<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    append_text(path, &line)
}

/// Append one pretty-printed JSON object followed by a newline. Files built
/// this way are read back with `specs::odds::parse_concatenated`.
pub fn append_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    append_text(path, &text)
}

/// Create or empty a file.
pub fn truncate(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    File::create(path).map(|_| ()).map_err(|e| Error::file(path, e))
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file(path, e))
}

/// `<root>/<YYYY-MM-DDTHH-MM-SS>`; dashes instead of colons so the name is
/// valid on every filesystem.
pub fn timestamp_dir(root: &Path, now: NaiveDateTime) -> PathBuf {
    root.join(now.format("%Y-%m-%dT%H-%M-%S").to_string())
}
