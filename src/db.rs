// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.montra", "Montra", "montra"));

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("montra.sqlite"))
}

/// Key-value storage the record store reads from and writes to.
pub trait Backend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove every entry, not only the ones this application wrote.
    fn clear(&mut self) -> Result<(), StoreError>;
}

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Create data dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Ok(Self::from_connection(conn)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl Backend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

/// Cloud copy of the store, addressed as `{base}/kv/{key}`.
pub struct RemoteBackend {
    base: String,
    client: reqwest::blocking::Client,
}

impl RemoteBackend {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client: crate::utils::http_client()?,
        })
    }

    fn url(&self, key: &str) -> String {
        format!("{}/kv/{}", self.base, key)
    }
}

impl Backend for RemoteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let resp = self.client.get(self.url(key)).send()?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(resp.text()?)),
            s => Err(StoreError::Remote {
                key: key.to_string(),
                status: s.as_u16(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .put(self.url(key))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(value.to_string())
            .send()?;
        if !resp.status().is_success() {
            return Err(StoreError::Remote {
                key: key.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let resp = self.client.delete(format!("{}/kv", self.base)).send()?;
        if !resp.status().is_success() {
            return Err(StoreError::Remote {
                key: "*".into(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Remote-first reads, local-first writes. Remote failures are logged and
/// swallowed so the app keeps working offline on the local copy.
pub struct MirroredBackend<R, L> {
    remote: R,
    local: L,
}

impl<R: Backend, L: Backend> MirroredBackend<R, L> {
    pub fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    pub fn local(&self) -> &L {
        &self.local
    }
}

impl<R: Backend, L: Backend> Backend for MirroredBackend<R, L> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.remote.get(key) {
            Ok(Some(v)) => Ok(Some(v)),
            Ok(None) => self.local.get(key),
            Err(err) => {
                tracing::warn!(key, error = %err, "remote read failed, using local copy");
                self.local.get(key)
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.local.set(key, value)?;
        if let Err(err) = self.remote.set(key, value) {
            tracing::warn!(key, error = %err, "remote write failed, kept local copy");
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.local.clear()?;
        if let Err(err) = self.remote.clear() {
            tracing::warn!(error = %err, "remote clear failed");
        }
        Ok(())
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
