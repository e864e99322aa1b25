//! File-backed world state.
//!
//! [`FileWorldState`] keeps the working set in an [`InMemoryWorldState`] and
//! rewrites a snapshot file after every mutation, so a process can invoke one
//! operation, exit, and pick the state up again on the next run.
//!
//! On-disk format:
//! ```text
//! [4 bytes: magic "DLWS"]
//! [4 bytes: payload length (little-endian u32)]
//! [4 bytes: CRC32 of payload (little-endian u32)]
//! [N bytes: payload (bincode-serialized key/value map)]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StateError, StateResult};
use crate::memory::InMemoryWorldState;
use crate::traits::{StateIterator, WorldState};

const MAGIC: &[u8; 4] = b"DLWS";

/// Header size: 4 bytes magic + 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 12;

#[derive(Serialize, Deserialize)]
struct SnapshotBody {
    entries: BTreeMap<String, Vec<u8>>,
}

/// World state persisted to a single snapshot file.
pub struct FileWorldState {
    path: PathBuf,
    inner: InMemoryWorldState,
    /// Held while a snapshot is being written.
    write_lock: Mutex<()>,
}

impl FileWorldState {
    /// Open the snapshot at `path`, or start empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> StateResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let bytes = fs::read(&path)?;
            decode_snapshot(&bytes)?
        } else {
            BTreeMap::new()
        };
        info!(path = %path.display(), keys = entries.len(), "world state opened");

        Ok(Self {
            path,
            inner: InMemoryWorldState::from_entries(entries),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Write the current contents to disk.
    pub fn flush(&self) -> StateResult<()> {
        let _guard = self.write_lock.lock().expect("snapshot lock poisoned");
        self.write_snapshot(self.inner.snapshot())
    }

    /// Persist the snapshot with one change applied, then apply it in memory.
    ///
    /// A failed write leaves both the file and the in-memory view untouched.
    fn commit(&self, key: &str, value: Option<&[u8]>) -> StateResult<()> {
        let _guard = self.write_lock.lock().expect("snapshot lock poisoned");
        let mut entries = self.inner.snapshot();
        match value {
            Some(value) => entries.insert(key.to_string(), value.to_vec()),
            None => entries.remove(key),
        };
        self.write_snapshot(entries)?;

        match value {
            Some(value) => self.inner.put_state(key, value),
            None => self.inner.delete_state(key),
        }
    }

    /// The snapshot goes to a temporary file in the same directory and is
    /// renamed over the target, so readers never see a partial file.
    fn write_snapshot(&self, entries: BTreeMap<String, Vec<u8>>) -> StateResult<()> {
        let encoded = encode_snapshot(entries)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&encoded)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StateError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = encoded.len(), "snapshot written");
        Ok(())
    }
}

impl WorldState for FileWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        self.commit(key, Some(value))
    }

    fn delete_state(&self, key: &str) -> StateResult<()> {
        self.commit(key, None)
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> StateResult<Box<dyn StateIterator + '_>> {
        self.inner.get_state_by_range(start_key, end_key)
    }
}

impl std::fmt::Debug for FileWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWorldState")
            .field("path", &self.path)
            .field("key_count", &self.inner.len())
            .finish()
    }
}

fn encode_snapshot(entries: BTreeMap<String, Vec<u8>>) -> StateResult<Vec<u8>> {
    let payload = bincode::serialize(&SnapshotBody { entries })
        .map_err(|e| StateError::Serialization(e.to_string()))?;
    let length = u32::try_from(payload.len())
        .map_err(|_| StateError::Serialization("snapshot exceeds 4 GiB".into()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

fn decode_snapshot(bytes: &[u8]) -> StateResult<BTreeMap<String, Vec<u8>>> {
    if bytes.len() < HEADER_SIZE {
        return Err(StateError::CorruptSnapshot(format!(
            "file is {} bytes, shorter than the header",
            bytes.len()
        )));
    }
    if &bytes[..4] != MAGIC {
        return Err(StateError::CorruptSnapshot("bad magic".into()));
    }

    let length = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    let crc = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != length {
        return Err(StateError::CorruptSnapshot(format!(
            "payload length mismatch: header says {length}, found {}",
            payload.len()
        )));
    }
    if crc32fast::hash(payload) != crc {
        return Err(StateError::CorruptSnapshot("checksum mismatch".into()));
    }

    let body: SnapshotBody = bincode::deserialize(payload)
        .map_err(|e| StateError::CorruptSnapshot(e.to_string()))?;
    Ok(body.entries)
}
