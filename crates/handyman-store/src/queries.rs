use rusqlite::OptionalExtension;

use crate::{Result, SqliteStorage, Storage};

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                (key, value),
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let store = SqliteStorage::open_in_memory().unwrap();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let store = SqliteStorage::open_in_memory().unwrap();
        store.set("token", "first").unwrap();
        store.set("token", "second").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn missing_key_is_none() {
        let store = SqliteStorage::open_in_memory().unwrap();
        assert!(store.get("user").unwrap().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SqliteStorage::open_in_memory().unwrap();
        store.set("refreshToken", "r1").unwrap();
        store.remove("refreshToken").unwrap();
        store.remove("refreshToken").unwrap();
        assert!(store.get("refreshToken").unwrap().is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = std::env::temp_dir().join(format!("handyman_store_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("kv.db");
        let _ = std::fs::remove_file(&path);

        {
            let store = SqliteStorage::open(&path).unwrap();
            store.set("user", "{\"user_id\":1}").unwrap();
        }

        let store = SqliteStorage::open(&path).unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("{\"user_id\":1}"));

        drop(store);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
