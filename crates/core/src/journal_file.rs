//! File-backed JSONL journal with a SHA-256 hash chain.
//!
//! Line 1 is a header (`format_version`, `world_seed`); every following
//! line is one input frame carrying `prev_sha256_hex` and `sha256_hex`.
//! Records are flushed as they are written so the file survives a crash;
//! loading validates shape and chain and stops at the first bad line.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};
use crate::movement::InputFrame;

const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    world_seed: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    frame: InputFrame,
    prev_sha256_hex: String,
    sha256_hex: String,
}

#[derive(Debug)]
pub enum JournalFileError {
    Io(io::Error),
    MissingHeader,
    UnsupportedVersion(u16),
}

impl fmt::Display for JournalFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "journal io failure: {err}"),
            Self::MissingHeader => f.write_str("journal file has no header line"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported journal format version {version}")
            }
        }
    }
}

impl std::error::Error for JournalFileError {}

impl From<io::Error> for JournalFileError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn record_digest(seq: u64, frame: &InputFrame, prev_hex: &str) -> String {
    #[derive(Serialize)]
    struct DigestBody<'a> {
        seq: u64,
        frame: &'a InputFrame,
    }

    let body = serde_json::to_string(&DigestBody { seq, frame })
        .unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(prev_hex.as_bytes());
    hasher.update(body.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Append-only writer. Each `append` writes and flushes one record.
pub struct JournalWriter {
    writer: BufWriter<File>,
    prev_hash: String,
    next_seq: u64,
}

impl JournalWriter {
    pub fn create(path: &Path, world_seed: u64) -> Result<Self, JournalFileError> {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        let mut writer = BufWriter::new(file);
        let header = FileHeader { format_version: JOURNAL_FORMAT_VERSION, world_seed };
        let line = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(Self { writer, prev_hash: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    pub fn append(&mut self, frame: InputFrame) -> Result<(), JournalFileError> {
        let seq = self.next_seq;
        let digest = record_digest(seq, &frame, &self.prev_hash);
        let record = FileRecord {
            seq,
            frame,
            prev_sha256_hex: self.prev_hash.clone(),
            sha256_hex: digest.clone(),
        };
        let line = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        self.prev_hash = digest;
        self.next_seq += 1;
        Ok(())
    }
}

/// Load a journal, keeping every record up to the first invalid or
/// incomplete line. Returns the journal plus how many lines were dropped.
pub fn load_journal(path: &Path) -> Result<(InputJournal, usize), JournalFileError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(JournalFileError::MissingHeader)?;
    let header: FileHeader =
        serde_json::from_str(header_line).map_err(|_| JournalFileError::MissingHeader)?;
    if header.format_version != JOURNAL_FORMAT_VERSION {
        return Err(JournalFileError::UnsupportedVersion(header.format_version));
    }

    let mut journal = InputJournal::new(header.world_seed);
    let mut prev_hash = INITIAL_HASH.to_string();
    let mut expected_seq = 0u64;
    let mut dropped = 0usize;

    for line in lines {
        let Ok(record) = serde_json::from_str::<FileRecord>(line) else {
            dropped += 1;
            break;
        };
        let valid = record.seq == expected_seq
            && record.prev_sha256_hex == prev_hash
            && record.sha256_hex == record_digest(record.seq, &record.frame, &prev_hash);
        if !valid {
            dropped += 1;
            break;
        }
        prev_hash = record.sha256_hex;
        expected_seq += 1;
        journal.record(record.frame);
    }

    Ok((journal, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<InputFrame> {
        vec![
            InputFrame { down: true, ..InputFrame::default() },
            InputFrame { down: true, right: true, ..InputFrame::default() },
            InputFrame { interact: true, ..InputFrame::default() },
        ]
    }

    #[test]
    fn write_then_load_roundtrips_the_frames() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer = JournalWriter::create(&path, 555).expect("create");
        for frame in frames() {
            writer.append(frame).expect("append");
        }
        drop(writer);

        let (journal, dropped) = load_journal(&path).expect("load");
        assert_eq!(dropped, 0);
        assert_eq!(journal.world_seed, 555);
        assert_eq!(journal.frames, frames());
    }

    #[test]
    fn a_tampered_record_truncates_the_tail() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer = JournalWriter::create(&path, 555).expect("create");
        for frame in frames() {
            writer.append(frame).expect("append");
        }
        drop(writer);

        let content = fs::read_to_string(&path).expect("read");
        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        // Flip the recorded input of the second record; its digest no
        // longer matches, so it and everything after it is dropped.
        lines[2] = lines[2].replace("\"right\":true", "\"right\":false");
        fs::write(&path, lines.join("\n")).expect("write back");

        let (journal, dropped) = load_journal(&path).expect("load");
        assert_eq!(journal.frames.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn an_incomplete_trailing_line_is_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");

        let mut writer = JournalWriter::create(&path, 9).expect("create");
        writer.append(InputFrame::default()).expect("append");
        drop(writer);

        let mut content = fs::read_to_string(&path).expect("read");
        content.push_str("{\"seq\":1,\"frame\"");
        fs::write(&path, content).expect("write back");

        let (journal, dropped) = load_journal(&path).expect("load");
        assert_eq!(journal.frames.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn an_empty_file_is_a_missing_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");
        fs::write(&path, "").expect("write");
        assert!(matches!(load_journal(&path), Err(JournalFileError::MissingHeader)));
    }
}
