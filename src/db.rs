use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::time::Instant;
use tracing::log;
use walkdir::WalkDir;

use crate::CONFIG;

/// One JSON file per record under `{db_path}/{collection}/{key}`.
pub struct Db<K: Display, V: DeserializeOwned + Serialize> {
    pub name: String,
    pub key_type: std::marker::PhantomData<K>,
    pub value_type: std::marker::PhantomData<V>,
}

impl<K: Display, V: DeserializeOwned + Serialize> Db<K, V> {
    pub fn new(name: &str) -> Db<K, V> {
        Db {
            name: name.to_string(),
            key_type: std::marker::PhantomData,
            value_type: std::marker::PhantomData,
        }
    }

    pub fn read(&self, key: &K) -> Option<V> {
        let path = self.get_path(&key.to_string());
        Db::<K, V>::read_file(&path)
    }

    pub fn read_all(&self) -> Vec<V> {
        let before = Instant::now();

        let path = format!("{}/{}", CONFIG.db_path, self.name);
        let result: Vec<V> = WalkDir::new(path).into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.metadata().ok().map(|e| e.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.path().to_str().and_then(Db::<K, V>::read_file))
            .collect();

        log::debug!("[DB] read all {} {} {:.0?}", self.name, result.len(), before.elapsed());
        result
    }

    pub fn write(&self, key: &K, obj: &V) -> std::io::Result<()> {
        let before = Instant::now();
        let json = serde_json::to_string(&obj)?;
        let path = std::path::PathBuf::from(self.get_path(&key.to_string()));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        match std::fs::write(path, json) {
            Ok(e) => {
                log::debug!("[DB] wrote {}/{} {:.2?}", self.name, key, before.elapsed());
                Ok(e)
            }
            Err(e) => {
                log::error!("[DB] write failed {}/{} {}", self.name, key, e);
                Ok(())
            }
        }
    }

    fn read_file(path: &str) -> Option<V> {
        let data = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&data) {
            Ok(e) => Some(e),
            Err(e) => {
                log::error!("[DB] read failed {} {}", path, e);
                None
            }
        }
    }

    fn get_path(&self, key: &str) -> String {
        format!("{}/{}/{}", CONFIG.db_path, self.name, key)
    }
}
