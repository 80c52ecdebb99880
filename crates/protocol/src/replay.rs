//! Replay files
//!
//! Encoded buffers saved one per file as `fb_NNNNNN.bin` (six digits,
//! zero-padded) so a capture can be decoded or republished later. The next
//! file number is one past the highest number already in the directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ProtocolError, Result};

const PREFIX: &str = "fb_";
const EXTENSION: &str = ".bin";
const DIGITS: usize = 6;

/// Numbers tried by `save_buffer` before giving up
const CLAIM_ATTEMPTS: u32 = 1024;

/// Number encoded in a replay file name, if the name is one
pub fn file_number(name: &str) -> Option<u32> {
    let digits = name.strip_prefix(PREFIX)?.strip_suffix(EXTENSION)?;
    if digits.len() < DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Replay file name for a number
pub fn file_name(number: u32) -> String {
    format!("{PREFIX}{number:0width$}{EXTENSION}", width = DIGITS)
}

/// Highest replay file number in `dir` (0 when there are none)
pub fn last_file_number(dir: &Path) -> Result<u32> {
    Ok(replay_entries(dir)?
        .into_iter()
        .map(|(number, _)| number)
        .max()
        .unwrap_or(0))
}

/// Path of the next replay file in `dir`
pub fn next_file_path(dir: &Path) -> Result<PathBuf> {
    let next = last_file_number(dir)?.saturating_add(1);
    Ok(dir.join(file_name(next)))
}

/// Write one buffer to `path`, replacing any existing file
pub fn write_buffer(path: &Path, buf: &[u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(ProtocolError::EmptyData);
    }
    fs::write(path, buf).map_err(|e| ProtocolError::replay(path, e))?;
    debug!(path = %path.display(), bytes = buf.len(), "replay buffer saved");
    Ok(())
}

/// Save a buffer as the next replay file in `dir`, creating `dir` if needed
///
/// The file is created exclusively. When another writer claimed the number
/// first, the next number is tried, so concurrent savers never overwrite
/// each other.
pub fn save_buffer(dir: &Path, buf: &[u8]) -> Result<PathBuf> {
    if buf.is_empty() {
        return Err(ProtocolError::EmptyData);
    }
    fs::create_dir_all(dir).map_err(|e| ProtocolError::replay(dir, e))?;

    let mut number = last_file_number(dir)?.saturating_add(1);
    for _ in 0..CLAIM_ATTEMPTS {
        let path = dir.join(file_name(number));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(buf)
                    .map_err(|e| ProtocolError::replay(&path, e))?;
                debug!(path = %path.display(), bytes = buf.len(), "replay buffer saved");
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                number = number.saturating_add(1);
            }
            Err(e) => return Err(ProtocolError::replay(&path, e)),
        }
    }

    Err(ProtocolError::replay(
        dir,
        io::Error::new(io::ErrorKind::AlreadyExists, "no free replay file number"),
    ))
}

/// Read one buffer back
pub fn read_buffer(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| ProtocolError::replay(path, e))
}

/// Replay files in `dir`, in ascending numeric order
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = replay_entries(dir)?;
    entries.sort_by_key(|(number, _)| *number);
    Ok(entries.into_iter().map(|(_, path)| path).collect())
}

fn replay_entries(dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    let read_dir = fs::read_dir(dir).map_err(|e| ProtocolError::replay(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| ProtocolError::replay(dir, e))?;
        let name = entry.file_name();
        if let Some(number) = name.to_str().and_then(file_number) {
            entries.push((number, entry.path()));
        }
    }
    Ok(entries)
}
