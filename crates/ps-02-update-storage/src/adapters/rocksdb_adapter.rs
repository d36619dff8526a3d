//! # RocksDB Update Store
//!
//! Production `UpdateStore`.
//!
//! ## Column Families
//!
//! - `updates` - `id (u64 BE)` -> bincode record
//! - `by_key` - `pubkey (32) || id (u64 BE)` -> empty, per-key index
//! - `snapshots` - `latest` -> bincode statistics snapshot
//! - `metadata` - `next_id` -> u64 BE
//!
//! An append writes the record, its index entry and the advanced `next_id`
//! in one `WriteBatch`, so a crash never leaves a record without its index
//! or a reused id. Reopening a database resumes from the stored `next_id`.

use parking_lot::Mutex;
use ps_telemetry::UPDATES_STORED;
use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamily, ColumnFamilyDescriptor, DBCompressionType, Direction,
    IteratorMode, Options, WriteBatch, WriteOptions, DB,
};
use serde::{Deserialize, Serialize};
use shared_types::{
    PublicKey, SignatureBytes, StatisticsSnapshot, StatusUpdate, TimestampNanos, VerifiedUpdate,
};
use tracing::info;

use crate::domain::errors::StoreError;
use crate::ports::outbound::UpdateStore;

/// Column family names
pub const CF_UPDATES: &str = "updates";
pub const CF_BY_KEY: &str = "by_key";
pub const CF_SNAPSHOTS: &str = "snapshots";
pub const CF_METADATA: &str = "metadata";

/// All column families used by the store
pub const COLUMN_FAMILIES: &[&str] = &[CF_UPDATES, CF_BY_KEY, CF_SNAPSHOTS, CF_METADATA];

const LATEST_SNAPSHOT_KEY: &[u8] = b"latest";
const NEXT_ID_KEY: &[u8] = b"next_id";

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/postshortly".to_string(),
            block_cache_size: 64 * 1024 * 1024,  // 64MB
            write_buffer_size: 16 * 1024 * 1024, // 16MB
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,  // 8MB
            write_buffer_size: 4 * 1024 * 1024, // 4MB
            sync_writes: false,
        }
    }
}

/// On-disk record. Kept separate from `StatusUpdate` because bincode needs
/// every field present and fixed key bytes rather than hex strings.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    id: u64,
    timestamp: u64,
    body: String,
    link: Option<String>,
    pubkey: [u8; 32],
    signature: Vec<u8>,
}

impl StoredRecord {
    fn from_update(update: &StatusUpdate) -> Self {
        Self {
            id: update.id,
            timestamp: update.timestamp,
            body: update.body.clone(),
            link: update.link.clone(),
            pubkey: update.pubkey.0,
            signature: update.signature.as_bytes().to_vec(),
        }
    }

    fn into_update(self) -> Result<StatusUpdate, StoreError> {
        let signature = SignatureBytes::from_slice(&self.signature).ok_or_else(|| {
            StoreError::Codec {
                message: format!("record {} has a {}-byte signature", self.id, self.signature.len()),
            }
        })?;
        Ok(StatusUpdate {
            id: self.id,
            timestamp: self.timestamp,
            body: self.body,
            link: self.link,
            pubkey: PublicKey(self.pubkey),
            signature,
        })
    }
}

fn io_err(context: &str, e: rocksdb::Error) -> StoreError {
    StoreError::Io {
        message: format!("{}: {}", context, e),
    }
}

fn codec_err(e: bincode::Error) -> StoreError {
    StoreError::Codec {
        message: e.to_string(),
    }
}

fn by_key_entry(pubkey: &PublicKey, id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(40);
    key.extend_from_slice(pubkey.as_bytes());
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// RocksDB-backed `UpdateStore`
pub struct RocksDbUpdateStore {
    db: DB,
    /// Guards id assignment; holds the id the next append will use.
    next_id: Mutex<u64>,
    config: RocksDbConfig,
}

impl RocksDbUpdateStore {
    /// Open or create the database
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(DBCompressionType::Snappy);

        let mut block_opts = BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| io_err("Failed to open RocksDB", e))?;

        let mut store = Self {
            db,
            next_id: Mutex::new(1),
            config,
        };
        let next_id = store.read_next_id()?;
        *store.next_id.get_mut() = next_id;
        UPDATES_STORED.set((next_id - 1) as f64);

        info!(
            path = %store.config.path,
            stored = next_id - 1,
            "RocksDB update store opened"
        );
        Ok(store)
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StoreError> {
        self.db.cf_handle(name).ok_or_else(|| StoreError::Unavailable {
            message: format!("missing column family {}", name),
        })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }

    fn read_next_id(&self) -> Result<u64, StoreError> {
        let value = self
            .db
            .get_cf(self.cf(CF_METADATA)?, NEXT_ID_KEY)
            .map_err(|e| io_err("RocksDB get failed", e))?;
        match value {
            None => Ok(1),
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| StoreError::Codec {
                    message: "next_id is not 8 bytes".to_string(),
                })?;
                match u64::from_be_bytes(raw) {
                    0 => Err(StoreError::Codec {
                        message: "next_id of 0 is never issued".to_string(),
                    }),
                    next => Ok(next),
                }
            }
        }
    }

    fn get_update(&self, id: u64) -> Result<Option<StatusUpdate>, StoreError> {
        let value = self
            .db
            .get_cf(self.cf(CF_UPDATES)?, id.to_be_bytes())
            .map_err(|e| io_err("RocksDB get failed", e))?;
        value
            .map(|bytes| {
                bincode::deserialize::<StoredRecord>(&bytes)
                    .map_err(codec_err)?
                    .into_update()
            })
            .transpose()
    }
}

impl UpdateStore for RocksDbUpdateStore {
    fn append(
        &self,
        update: VerifiedUpdate,
        timestamp: TimestampNanos,
    ) -> Result<StatusUpdate, StoreError> {
        let mut next_id = self.next_id.lock();
        let id = *next_id;
        let stored = StatusUpdate::from_verified(update, id, timestamp);
        let record = bincode::serialize(&StoredRecord::from_update(&stored)).map_err(codec_err)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_UPDATES)?, id.to_be_bytes(), record);
        batch.put_cf(self.cf(CF_BY_KEY)?, by_key_entry(&stored.pubkey, id), b"");
        batch.put_cf(self.cf(CF_METADATA)?, NEXT_ID_KEY, (id + 1).to_be_bytes());

        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| io_err("RocksDB batch write failed", e))?;

        *next_id = id + 1;
        UPDATES_STORED.set(id as f64);
        Ok(stored)
    }

    fn updates_by_key(&self, pubkey: &PublicKey) -> Result<Vec<StatusUpdate>, StoreError> {
        let prefix = pubkey.as_bytes();
        let iter = self.db.iterator_cf(
            self.cf(CF_BY_KEY)?,
            IteratorMode::From(prefix, Direction::Forward),
        );

        let mut updates = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| io_err("RocksDB scan failed", e))?;
            if !key.starts_with(prefix) {
                break;
            }
            let raw: [u8; 8] = key[prefix.len()..].try_into().map_err(|_| StoreError::Codec {
                message: "malformed by_key entry".to_string(),
            })?;
            if let Some(update) = self.get_update(u64::from_be_bytes(raw))? {
                updates.push(update);
            }
        }
        Ok(updates)
    }

    fn all_updates(&self) -> Result<Vec<StatusUpdate>, StoreError> {
        // Big-endian ids iterate in numeric order.
        let iter = self.db.iterator_cf(self.cf(CF_UPDATES)?, IteratorMode::Start);
        let mut updates = Vec::new();
        for item in iter {
            let (_, value) = item.map_err(|e| io_err("RocksDB scan failed", e))?;
            let record: StoredRecord = bincode::deserialize(&value).map_err(codec_err)?;
            updates.push(record.into_update()?);
        }
        Ok(updates)
    }

    fn save_snapshot(&self, snapshot: &StatisticsSnapshot) -> Result<(), StoreError> {
        let bytes = bincode::serialize(snapshot).map_err(codec_err)?;
        self.db
            .put_cf_opt(
                self.cf(CF_SNAPSHOTS)?,
                LATEST_SNAPSHOT_KEY,
                bytes,
                &self.write_options(),
            )
            .map_err(|e| io_err("RocksDB put failed", e))
    }

    fn latest_snapshot(&self) -> Result<Option<StatisticsSnapshot>, StoreError> {
        let value = self
            .db
            .get_cf(self.cf(CF_SNAPSHOTS)?, LATEST_SNAPSHOT_KEY)
            .map_err(|e| io_err("RocksDB get failed", e))?;
        value
            .map(|bytes| bincode::deserialize(&bytes).map_err(codec_err))
            .transpose()
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(*self.next_id.lock() - 1)
    }
}
