//! LMDB environment holding the durable list slot.
//!
//! One environment per list, stored as the directory `<db_name>.lmdb`, with a
//! single named database (`main`). Each slot is one key whose value is the whole
//! serialized document; writes replace it inside one committed transaction.

use std::fs;
use std::path::Path;

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::config::TodoListConfig;

const MAIN_DB: &str = "main";

struct LmdbHandle {
    env: Environment,
    db: Database,
}

pub struct AppDbState {
    handle: Option<LmdbHandle>,
    config: TodoListConfig,
}

impl AppDbState {
    /// Opens (or creates) `<name>.lmdb` with default settings.
    pub fn init(name: String) -> Result<Self, AppResponse> {
        Self::init_with_config(&TodoListConfig::with_db_name(name))
    }

    pub fn init_with_config(config: &TodoListConfig) -> Result<Self, AppResponse> {
        let handle = open_handle(config)?;
        Ok(Self {
            handle: Some(handle),
            config: config.clone(),
        })
    }

    pub fn db_name(&self) -> &str {
        &self.config.db_name
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn handle(&self) -> Result<&LmdbHandle, AppResponse> {
        self.handle
            .as_ref()
            .ok_or_else(|| AppResponse::DatabaseError(format!("Database '{}' is closed", self.config.db_name)))
    }

    /// Reads the document stored under `key`, `None` when the slot was never written.
    pub fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let handle = self.handle()?;
        let txn = handle.env.begin_ro_txn()?;

        let value = match txn.get(handle.db, &key) {
            Ok(bytes) => Some(String::from_utf8(bytes.to_vec()).map_err(|e| {
                AppResponse::SerializationError(format!("Slot '{key}' is not valid UTF-8: {e}"))
            })?),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        txn.commit()?;
        Ok(value)
    }

    pub fn write_slot(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        let handle = self.handle()?;
        let mut txn = handle.env.begin_rw_txn()?;
        txn.put(handle.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Wrote {} bytes to slot '{}'", value.len(), key);
        Ok(())
    }

    /// Removes the slot. Returns whether it existed.
    pub fn clear_slot(&self, key: &str) -> Result<bool, AppResponse> {
        let handle = self.handle()?;
        let mut txn = handle.env.begin_rw_txn()?;

        let existed = match txn.del(handle.db, &key, None) {
            Ok(()) => true,
            Err(lmdb::Error::NotFound) => false,
            Err(e) => return Err(e.into()),
        };

        txn.commit()?;
        Ok(existed)
    }

    /// Flushes to disk and releases the environment. Later calls report `DatabaseError`.
    pub fn close_database(&mut self) -> Result<(), AppResponse> {
        match self.handle.take() {
            Some(handle) => {
                handle.env.sync(true)?;
                info!("Closed database '{}'", self.config.db_name);
                Ok(())
            }
            None => {
                debug!("close_database called on already closed '{}'", self.config.db_name);
                Ok(())
            }
        }
    }

    /// Drops the current environment from disk and starts a fresh one named `name`.
    pub fn reset_database(&mut self, name: &str) -> Result<(), AppResponse> {
        self.handle = None;
        remove_dir_if_exists(&self.config.lmdb_dir())?;

        self.config.db_name = name.to_string();
        remove_dir_if_exists(&self.config.lmdb_dir())?;

        self.handle = Some(open_handle(&self.config)?);
        info!("Database reset as '{}'", name);
        Ok(())
    }
}

fn open_handle(config: &TodoListConfig) -> Result<LmdbHandle, AppResponse> {
    let dir = config.lmdb_dir();

    if Path::new(&dir).exists() {
        info!("Opening existing database at: {dir}");
    } else {
        info!("Creating new database at: {dir}");
        fs::create_dir_all(&dir)
            .map_err(|e| AppResponse::DatabaseError(format!("Cannot create directory {dir}: {e}")))?;
    }

    let env = Environment::new()
        .set_max_dbs(config.max_dbs)
        .set_map_size(config.map_size)
        .open(Path::new(&dir))
        .map_err(|e| {
            warn!("Failed to open LMDB environment at {dir}: {e}");
            AppResponse::from(e)
        })?;

    let db = env.create_db(Some(MAIN_DB), DatabaseFlags::empty())?;
    Ok(LmdbHandle { env, db })
}

fn remove_dir_if_exists(dir: &str) -> Result<(), AppResponse> {
    if Path::new(dir).exists() {
        fs::remove_dir_all(dir)
            .map_err(|e| AppResponse::DatabaseError(format!("Cannot remove {dir}: {e}")))?;
    }
    Ok(())
}
