//! Runtime configuration for a [`TodoList`](crate::todo_list::TodoList).
//!
//! Hosts usually only pick a database name. Over FFI the config arrives as JSON
//! and any field left out takes its default:
//!
//! ```rust
//! use todo_list_core::config::TodoListConfig;
//!
//! let config: TodoListConfig = serde_json::from_str(r#"{"db_name":"groceries"}"#)?;
//! assert_eq!(config.db_name, "groceries");
//! assert_eq!(config.storage_key, "todos");
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_NAME: &str = "todo_list";
pub const DEFAULT_STORAGE_KEY: &str = "todos";
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_DBS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoListConfig {
    /// Database path without extension; the environment lives in `<db_name>.lmdb`.
    pub db_name: String,

    /// Name of the slot holding the serialized list.
    pub storage_key: String,

    /// LMDB map size in bytes.
    pub map_size: usize,

    pub max_dbs: u32,
}

impl Default for TodoListConfig {
    fn default() -> Self {
        Self {
            db_name: DEFAULT_DB_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_size: DEFAULT_MAP_SIZE,
            max_dbs: DEFAULT_MAX_DBS,
        }
    }
}

impl TodoListConfig {
    pub fn with_db_name(name: impl Into<String>) -> Self {
        Self {
            db_name: name.into(),
            ..Self::default()
        }
    }

    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.db_name)
    }
}
