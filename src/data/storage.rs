use {
    anyhow::Result,
    serde::{Serialize, de::DeserializeOwned},
    std::collections::HashMap,
};

#[cfg(not(target_arch = "wasm32"))]
use {
    anyhow::Context,
    std::{
        fs,
        io::ErrorKind,
        path::{Path, PathBuf},
    },
};

#[cfg(not(target_arch = "wasm32"))]
use crate::config::PERSISTENCE;

/// Raw string storage under fixed keys (browser localStorage semantics).
///
/// Implementations replace the whole value on write; there are no partial updates.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

// --- NATIVE IMPLEMENTATION ---

/// One JSON file per key inside a directory.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    directory: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", key, PERSISTENCE.file_extension))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Writes a sibling temp file then renames it over the target, so a crash
    /// mid-write leaves the previous value intact.
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("Failed to create store dir {}", self.directory.display())
        })?;
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

// --- WASM IMPLEMENTATION ---

#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// None when the browser blocks localStorage (private mode, disabled cookies)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("localStorage get_item({}) failed: {:?}", key, e))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("localStorage set_item({}) failed: {:?}", key, e))
    }
}

// --- SESSION-ONLY IMPLEMENTATION ---

/// Keeps values for the lifetime of the process. Fallback when no durable store
/// is available, and the store used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text, for inspecting what was flushed
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// --- TYPED ADAPTER ---

/// JSON (de)serialization over a [`KeyValueStore`] that never fails outward.
///
/// `load` treats unreadable or malformed values as absent. `save` swallows
/// failures and remembers the last one so the engine can report that the
/// session is no longer durable; in-memory state stays authoritative.
pub struct PersistentStore {
    backend: Box<dyn KeyValueStore>,
    pending_failure: Option<String>,
    degraded: bool,
}

impl PersistentStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            pending_failure: None,
            degraded: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.backend.read(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Failed to read '{}' from store: {:#}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Ignoring malformed '{}' in store: {}", key, e);
                None
            }
        }
    }

    /// Whole-value replacement of `key`. Returns whether the write landed.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let outcome = serde_json::to_string(value)
            .map_err(anyhow::Error::from)
            .and_then(|text| self.backend.write(key, &text));
        match outcome {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save '{}' to store: {:#}", key, e);
                self.degraded = true;
                self.pending_failure = Some(format!("{}: {:#}", key, e));
                false
            }
        }
    }

    /// At least one write failed during this session
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Most recent unreported write failure
    pub fn take_failure(&mut self) -> Option<String> {
        self.pending_failure.take()
    }
}
