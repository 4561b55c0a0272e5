//! Append-only key/value store — binary protobuf log.
//!
//! Storage format: length-prefixed protobuf frames.
//!   [4-byte LE length][ProtoRecord bytes][4-byte LE length][ProtoRecord bytes]...
//!
//! Rules:
//!   - Strict append only; an overwrite is a new record for the same key
//!   - fsync after every write
//!   - On open the log is replayed in order, last write per key wins
//!   - Replay stops at the first damaged frame (torn write, bad length,
//!     undecodable bytes, sequence gap); the file is cut back to the last
//!     good frame so later appends land on a clean tail

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use prost::Message;

use crate::error::StoreError;
use crate::proto_types::ProtoRecord;
use crate::store::KeyValueStore;

const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    last_sequence: u64,
}

impl FileStore {
    /// Open or create the log at `path` and replay it into memory.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let records = if path.exists() {
            let replay = replay_log(&fs::read(path)?);
            if let Some(reason) = &replay.damage {
                log::warn!(
                    "[STORE] {} damaged after sequence {}: {}; dropping tail past byte {}",
                    path.display(),
                    replay.records.last().map(|r| r.sequence).unwrap_or(0),
                    reason,
                    replay.valid_len
                );
                truncate_log(path, replay.valid_len)?;
            }
            replay.records
        } else {
            Vec::new()
        };

        let mut entries = BTreeMap::new();
        let mut last_sequence = 0;
        for r in records {
            last_sequence = r.sequence;
            entries.insert(r.key, r.value);
        }
        log::debug!(
            "[STORE] opened {} with {} keys at sequence {}",
            path.display(),
            entries.len(),
            last_sequence
        );

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            last_sequence,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    fn append(&mut self, record: &ProtoRecord) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let buf = record.encode_to_vec();
        let len = buf.len() as u32;

        {
            let mut writer = BufWriter::new(&mut file);
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(&buf)?;
            writer.flush()?;
        }
        file.sync_all()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let record = ProtoRecord {
            sequence: self.last_sequence + 1,
            key: key.to_string(),
            value,
        };
        self.append(&record)?;
        self.last_sequence = record.sequence;
        self.entries.insert(record.key, record.value);
        Ok(())
    }
}

/// Records recovered from a log image.
struct Replay {
    records: Vec<ProtoRecord>,
    /// Byte length of the intact prefix.
    valid_len: u64,
    /// Why replay stopped early, if it did.
    damage: Option<String>,
}

/// Decode frames in order until the data ends or a frame is damaged.
fn replay_log(data: &[u8]) -> Replay {
    let mut records: Vec<ProtoRecord> = Vec::new();
    let mut offset = 0usize;

    let damage = loop {
        let rest = &data[offset..];
        if rest.is_empty() {
            break None;
        }
        if rest.len() < 4 {
            break Some(format!("torn length prefix ({} bytes)", rest.len()));
        }

        let len = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        if len == 0 || len > MAX_FRAME_LEN {
            break Some(format!("invalid frame length {}", len));
        }
        if rest.len() - 4 < len {
            break Some(format!(
                "truncated frame: {} of {} bytes",
                rest.len() - 4,
                len
            ));
        }

        let record = match ProtoRecord::decode(&rest[4..4 + len]) {
            Ok(r) => r,
            Err(e) => break Some(format!("protobuf decode error: {}", e)),
        };

        let expected = records.last().map(|r| r.sequence + 1).unwrap_or(1);
        if record.sequence != expected {
            break Some(format!(
                "sequence gap: expected {}, got {}",
                expected, record.sequence
            ));
        }

        records.push(record);
        offset += 4 + len;
    };

    Replay {
        records,
        valid_len: offset as u64,
        damage,
    }
}

fn truncate_log(path: &Path, len: u64) -> Result<(), StoreError> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(len)?;
    file.sync_all()?;
    Ok(())
}
