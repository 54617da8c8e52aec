use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, anyhow};
use serde::{Deserialize, Serialize};
use url::Url;

/// Origin-scoped key-value string store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage turned off by host policy: every access fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl PreferenceStore for DisabledStore {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Err(anyhow!("storage is disabled"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow!("storage is disabled"))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    origins: BTreeMap<String, BTreeMap<String, String>>,
}

/// JSON file shared by several origins; each origin only sees its own keys.
///
/// Writes go straight to disk so a later run observes them.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    origin: String,
    file: StoreFile,
}

impl FileStore {
    pub fn open(path: &Path, origin: &Url) -> anyhow::Result<Self> {
        let file = if path.exists() {
            let bytes =
                std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                StoreFile::default()
            } else {
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("parse store {}", path.display()))?
            }
        } else {
            StoreFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            origin: origin_key(origin),
            file,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_vec_pretty(&self.file).context("serialize store")?;
        std::fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self
            .file
            .origins
            .get(&self.origin)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.file
            .origins
            .entry(self.origin.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Scheme, host and port, the way a browser partitions local storage.
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}
