use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result};
use rusqlite::{named_params, Connection};
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::{Item, Theme};

/// Key under which the serialized item list is stored.
pub const ITEMS_KEY: &str = "todos";
/// Key under which the theme literal is stored.
pub const THEME_KEY: &str = "theme";

/// Snapshot handed to the store at startup. Either half degrades to its
/// default independently when the stored value is absent or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub items: Vec<Item>,
    pub theme: Theme,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to open data store at {path}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to prepare data store schema at {path}")]
    Setup {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// Durable key-value mirror of the store contents.
///
/// Writes are fire-and-forget from the store's perspective: one write per
/// state change, no coalescing, no retry. Reads never fail — a value that
/// does not parse yields the default for that key only.
pub trait Persistence {
    fn load(&self) -> PersistedState;
    fn save_items(&mut self, items: &[Item]) -> Result<()>;
    fn save_theme(&mut self, theme: Theme) -> Result<()>;
}

/// SQLite-backed adapter: a single `kv(key, value)` table whose values are
/// the serialized strings of the wire format.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(config: &AppConfig) -> Result<Self, PersistError> {
        let path = config.db_path().display().to_string();
        let conn = Connection::open(config.db_path()).map_err(|source| PersistError::Open {
            path: path.clone(),
            source,
        })?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
        )
        .map_err(|source| PersistError::Setup { path, source })?;
        Ok(Self { conn })
    }

    fn read_key(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .ok()
    }

    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (:key, :value)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            named_params![":key": key, ":value": value],
        )?;
        Ok(())
    }
}

impl Persistence for Database {
    fn load(&self) -> PersistedState {
        PersistedState {
            items: parse_items(self.read_key(ITEMS_KEY)),
            theme: parse_theme(self.read_key(THEME_KEY)),
        }
    }

    fn save_items(&mut self, items: &[Item]) -> Result<()> {
        let encoded = serde_json::to_string(items).context("failed to encode item list")?;
        self.write_key(ITEMS_KEY, &encoded)
            .context("failed to write item list")
    }

    fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.write_key(THEME_KEY, theme.as_str())
            .context("failed to write theme")
    }
}

fn parse_items(raw: Option<String>) -> Vec<Item> {
    raw.and_then(|s| serde_json::from_str::<Vec<Item>>(&s).ok())
        .unwrap_or_default()
}

fn parse_theme(raw: Option<String>) -> Theme {
    raw.and_then(|s| s.parse::<Theme>().ok()).unwrap_or_default()
}

/// In-memory stand-in for tests and ephemeral sessions. Clones share the
/// underlying map, so several handles observe the same stored state the way
/// separate readers of one browser store would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw string under a key, bypassing serialization. Lets tests
    /// seed malformed values.
    pub fn insert_raw<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.values.borrow_mut().insert(key.into(), value.into());
    }

    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> PersistedState {
        let values = self.values.borrow();
        PersistedState {
            items: parse_items(values.get(ITEMS_KEY).cloned()),
            theme: parse_theme(values.get(THEME_KEY).cloned()),
        }
    }

    fn save_items(&mut self, items: &[Item]) -> Result<()> {
        let encoded = serde_json::to_string(items).context("failed to encode item list")?;
        self.values
            .borrow_mut()
            .insert(ITEMS_KEY.to_string(), encoded);
        Ok(())
    }

    fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(THEME_KEY.to_string(), theme.as_str().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    #[test]
    fn database_roundtrips_items_and_theme() {
        let (config, _dir) = temp_config();
        let items = vec![Item::new(1, "Buy milk"), Item::new(2, "Water plants")];

        {
            let mut db = Database::open(&config).expect("open db");
            db.save_items(&items).expect("save items");
            db.save_theme(Theme::Dark).expect("save theme");
        }

        let reopened = Database::open(&config).expect("reopen db");
        let state = reopened.load();
        assert_eq!(state.items, items);
        assert_eq!(state.theme, Theme::Dark);
    }

    #[test]
    fn database_defaults_when_empty() {
        let (config, _dir) = temp_config();
        let db = Database::open(&config).expect("open db");
        let state = db.load();
        assert_eq!(state.items, Vec::new());
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn malformed_items_degrade_without_touching_theme() {
        let store = MemoryStore::new();
        store.insert_raw(ITEMS_KEY, "{not json");
        store.insert_raw(THEME_KEY, "dark");

        let state = store.load();
        assert_eq!(state.items, Vec::new());
        assert_eq!(state.theme, Theme::Dark);
    }

    #[test]
    fn malformed_theme_degrades_without_touching_items() {
        let mut store = MemoryStore::new();
        let items = vec![Item::new(9, "Read mail")];
        store.save_items(&items).expect("save items");
        store.insert_raw(THEME_KEY, "sepia");

        let state = store.load();
        assert_eq!(state.items, items);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer
            .save_items(&[Item::new(1, "Shared")])
            .expect("save items");

        let state = store.load();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].text, "Shared");
    }

    #[test]
    fn saved_items_use_the_documented_layout() {
        let mut store = MemoryStore::new();
        let mut item = Item::new(4, "Call dentist");
        item.is_priority = true;
        store.save_items(&[item]).expect("save items");

        let raw = store.raw_value(ITEMS_KEY).expect("raw value");
        assert_eq!(
            raw,
            r#"[{"id":4,"text":"Call dentist","completed":false,"isPriority":true}]"#
        );
    }
}
