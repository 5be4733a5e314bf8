//! Time-to-live cache mirrored to JSON files on disk.
//!
//! Each [`CacheStore`] keeps its entries in memory and rewrites one file with
//! the whole store after every change. The in-memory map is authoritative;
//! the file is a mirror that may lag behind a pending background write.

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::types::{CacheEntry, CacheMetadata, CacheStats, ComponentDoc, GuideDoc};
use crate::version::CACHE_FORMAT_VERSION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

/// Component cache file name.
pub const COMPONENTS_FILE: &str = "components.json";
/// Guide cache file name.
pub const GUIDES_FILE: &str = "guides.json";
/// Metadata file name.
pub const METADATA_FILE: &str = "metadata.json";

/// Current Unix time in milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

struct StoreInner<T> {
    label: &'static str,
    enabled: bool,
    ttl: u64,
    path: PathBuf,
    metadata_path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, CacheEntry<T>>>,
    // Serializes disk writes; each write snapshots the map after acquiring it.
    write_lock: tokio::sync::Mutex<()>,
}

impl<T> StoreInner<T> {
    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One named store of cached records.
pub struct CacheStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for CacheStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> CacheStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn new(label: &'static str, enabled: bool, ttl: u64, path: PathBuf, metadata_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                label,
                enabled,
                ttl,
                path,
                metadata_path,
                entries: Mutex::new(BTreeMap::new()),
                write_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Path of the file mirroring this store.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Number of entries held in memory, fresh or not.
    pub fn len(&self) -> usize {
        if !self.inner.enabled {
            return 0;
        }
        self.inner.entries().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a fresh value. Expired entries are evicted and the eviction persisted.
    pub async fn get(&self, key: &str) -> Option<T> {
        if !self.inner.enabled {
            return None;
        }

        {
            let mut entries = self.inner.entries();
            let Some(entry) = entries.get(key) else {
                debug!(key = key, "{} cache miss", self.inner.label);
                return None;
            };
            if entry.is_fresh(now_millis()) {
                debug!(key = key, "{} cache hit", self.inner.label);
                return Some(entry.data.clone());
            }
            entries.remove(key);
        }

        debug!(key = key, "{} cache entry expired", self.inner.label);
        if let Err(e) = persist(&self.inner).await {
            error!(error = %e, "Failed to persist {} cache eviction", self.inner.label);
        }
        None
    }

    /// Store a value, stamped with the current time and the store's TTL.
    ///
    /// Persistence runs as a background task; its failures are only logged.
    /// Must be called from within a Tokio runtime.
    pub fn set(&self, key: &str, value: T) {
        if !self.inner.enabled {
            return;
        }

        let entry = CacheEntry {
            data: value,
            timestamp: now_millis(),
            ttl: self.inner.ttl,
        };
        self.inner.entries().insert(key.to_string(), entry);
        debug!(key = key, "Cached {} entry", self.inner.label);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if let Err(e) = persist(&inner).await {
                error!(error = %e, "Failed to save {} cache to disk", inner.label);
            }
        });
    }

    /// Whether a fresh entry exists for `key`.
    pub fn has(&self, key: &str) -> bool {
        if !self.inner.enabled {
            return false;
        }
        self.inner
            .entries()
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now_millis()))
    }

    /// Remove every entry and persist the empty store.
    pub async fn clear(&self) -> Result<()> {
        if !self.inner.enabled {
            return Ok(());
        }
        self.inner.entries().clear();
        persist(&self.inner).await?;
        info!("{} cache cleared", self.inner.label);
        Ok(())
    }

    /// Evict every expired entry, persisting once if anything was removed.
    ///
    /// Returns the number of evicted entries.
    pub async fn cleanup(&self) -> Result<usize> {
        if !self.inner.enabled {
            return Ok(0);
        }

        let removed = {
            let now = now_millis();
            let mut entries = self.inner.entries();
            let before = entries.len();
            entries.retain(|_, entry| entry.is_fresh(now));
            before - entries.len()
        };

        if removed > 0 {
            persist(&self.inner).await?;
            info!(removed = removed, "Cleaned up expired {} cache entries", self.inner.label);
        }
        Ok(removed)
    }

    /// Write the current state to disk and wait for it.
    pub async fn flush(&self) -> Result<()> {
        if !self.inner.enabled {
            return Ok(());
        }
        persist(&self.inner).await
    }

    async fn load(&self) {
        let label = self.inner.label;
        let bytes = match tokio::fs::read(self.path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No existing {} cache file found, starting with empty cache", label);
                return;
            }
            Err(e) => {
                warn!(error = %e, path = %self.path().display(), "Failed to read {} cache from disk", label);
                return;
            }
        };

        let pairs: Vec<(String, CacheEntry<T>)> = match serde_json::from_slice(&bytes) {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!(error = %e, path = %self.path().display(), "Failed to parse {} cache file", label);
                return;
            }
        };

        let now = now_millis();
        let total = pairs.len();
        let mut entries = self.inner.entries();
        entries.extend(pairs.into_iter().filter(|(_, entry)| entry.is_fresh(now)));
        info!(valid = entries.len(), total = total, "Loaded {} cache entries from disk", label);
    }
}

async fn persist<T: Serialize>(inner: &StoreInner<T>) -> Result<()> {
    let _write = inner.write_lock.lock().await;

    let (payload, count) = {
        let entries = inner.entries();
        let pairs: Vec<(&String, &CacheEntry<T>)> = entries.iter().collect();
        let payload = serde_json::to_vec_pretty(&pairs)
            .map_err(|e| Error::cache(format!("Failed to serialize {} cache", inner.label), e))?;
        (payload, entries.len())
    };

    tokio::fs::write(&inner.path, payload).await.map_err(|e| {
        Error::cache(
            format!("Failed to save {} cache to {}", inner.label, inner.path.display()),
            e,
        )
    })?;

    if let Some(metadata_path) = &inner.metadata_path {
        let metadata = CacheMetadata {
            version: CACHE_FORMAT_VERSION.to_string(),
            last_update: now_millis(),
            component_count: count,
        };
        let payload = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| Error::cache("Failed to serialize cache metadata", e))?;
        tokio::fs::write(metadata_path, payload)
            .await
            .map_err(|e| Error::cache(format!("Failed to save {}", metadata_path.display()), e))?;
    }

    debug!(entries = count, "{} cache saved to disk", inner.label);
    Ok(())
}

/// The component and guide stores sharing one cache directory.
pub struct DocCache {
    enabled: bool,
    dir: PathBuf,
    components: CacheStore<ComponentDoc>,
    guides: CacheStore<GuideDoc>,
}

impl DocCache {
    /// Create a cache from configuration. Nothing touches disk until [`DocCache::initialize`].
    pub fn new(config: &CacheConfig) -> Self {
        let dir = config.location.clone();
        Self {
            enabled: config.enabled,
            components: CacheStore::new(
                "component",
                config.enabled,
                config.ttl,
                dir.join(COMPONENTS_FILE),
                Some(dir.join(METADATA_FILE)),
            ),
            guides: CacheStore::new("guide", config.enabled, config.ttl, dir.join(GUIDES_FILE), None),
            dir,
        }
    }

    /// Create the cache directory and load both stores, dropping expired entries.
    ///
    /// Missing or malformed files leave the store empty. Failing to create the
    /// directory is an error.
    pub async fn initialize(&self) -> Result<()> {
        if !self.enabled {
            info!("Cache is disabled");
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::cache(format!("Failed to create cache directory {}", self.dir.display()), e)
        })?;
        self.components.load().await;
        self.guides.load().await;

        info!(
            components = self.components.len(),
            guides = self.guides.len(),
            "Cache initialized successfully"
        );
        Ok(())
    }

    /// Whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Component documentation store.
    pub fn components(&self) -> &CacheStore<ComponentDoc> {
        &self.components
    }

    /// Guide store.
    pub fn guides(&self) -> &CacheStore<GuideDoc> {
        &self.guides
    }

    /// Evict expired entries from both stores.
    pub async fn cleanup(&self) -> Result<usize> {
        Ok(self.components.cleanup().await? + self.guides.cleanup().await?)
    }

    /// Clear both stores.
    pub async fn clear(&self) -> Result<()> {
        self.components.clear().await?;
        self.guides.clear().await
    }

    /// Wait for both stores to be written to disk.
    pub async fn flush(&self) -> Result<()> {
        self.components.flush().await?;
        self.guides.flush().await
    }

    /// Entry counts.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            components: self.components.len(),
            guides: self.guides.len(),
            enabled: self.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GuideSection;
    use serde_json::Value;
    use std::time::Duration;

    fn config(dir: &Path, ttl: u64, enabled: bool) -> CacheConfig {
        CacheConfig {
            enabled,
            ttl,
            location: dir.join("cache"),
        }
    }

    fn doc(name: &str) -> ComponentDoc {
        ComponentDoc {
            name: name.to_string(),
            description: format!("{} component", name),
            import_statement: format!("import {{ X }} from 'primeng/{}';", name),
            module_import: format!("import {{ XModule }} from 'primeng/{}';", name),
            basic_usage: format!("<p-{}></p-{}>", name, name),
            properties: vec![],
            events: vec![],
            methods: vec![],
        }
    }

    fn guide(name: &str) -> GuideDoc {
        GuideDoc {
            name: name.to_string(),
            title: "Installation".into(),
            description: "Setting up PrimeNG".into(),
            sections: vec![GuideSection {
                heading: "Download".into(),
                content: "PrimeNG is available on npm.".into(),
                code_blocks: Some(vec!["npm install primeng".into()]),
            }],
            url: format!("https://primeng.org/{}", name),
        }
    }

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(&config(dir.path(), 60_000, true));
        cache.initialize().await.unwrap();

        cache.components().set("button", doc("button"));
        assert_eq!(cache.components().get("button").await, Some(doc("button")));
        assert!(cache.components().has("button"));
        assert!(!cache.components().has("dialog"));
        assert_eq!(cache.components().get("dialog").await, None);

        cache.guides().set("installation", guide("installation"));
        assert_eq!(cache.guides().get("installation").await, Some(guide("installation")));
        assert_eq!(cache.stats(), CacheStats { components: 1, guides: 1, enabled: true });
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(&config(dir.path(), 1000, true));
        cache.initialize().await.unwrap();

        cache.components().set("button", doc("button"));
        assert!(cache.components().has("button"));

        tokio::time::sleep(Duration::from_millis(1200)).await;

        assert!(!cache.components().has("button"));
        assert_eq!(cache.components().get("button").await, None);
        // The expired entry was evicted, not just hidden.
        assert_eq!(cache.components().len(), 0);
    }

    #[tokio::test]
    async fn test_disabled_cache_is_inert() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 60_000, false);
        let cache = DocCache::new(&cfg);
        cache.initialize().await.unwrap();

        cache.components().set("button", doc("button"));
        cache.guides().set("installation", guide("installation"));
        assert_eq!(cache.components().get("button").await, None);
        assert!(!cache.components().has("button"));
        assert_eq!(cache.guides().get("installation").await, None);
        cache.clear().await.unwrap();
        assert_eq!(cache.cleanup().await.unwrap(), 0);
        cache.flush().await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!cfg.location.exists());
    }

    #[tokio::test]
    async fn test_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 60_000, true);

        let cache = DocCache::new(&cfg);
        cache.initialize().await.unwrap();
        cache.components().set("button", doc("button"));
        cache.components().set("dialog", doc("dialog"));
        cache.guides().set("theming", guide("theming"));
        cache.flush().await.unwrap();

        assert_eq!(cache.dir(), cfg.location.as_path());
        assert_eq!(cache.components().path(), cfg.location.join(COMPONENTS_FILE));
        assert_eq!(cache.guides().path(), cfg.location.join(GUIDES_FILE));

        let raw: Value = serde_json::from_slice(&std::fs::read(cache.components().path()).unwrap()).unwrap();
        assert_eq!(raw[0][0], "button");
        assert_eq!(raw[0][1]["data"]["name"], "button");
        assert_eq!(raw[0][1]["ttl"], 60_000);
        assert!(raw[0][1]["timestamp"].as_u64().is_some());

        let metadata: Value =
            serde_json::from_slice(&std::fs::read(cfg.location.join(METADATA_FILE)).unwrap()).unwrap();
        assert_eq!(metadata["version"], CACHE_FORMAT_VERSION);
        assert_eq!(metadata["componentCount"], 2);

        let reloaded = DocCache::new(&cfg);
        reloaded.initialize().await.unwrap();
        assert_eq!(reloaded.components().get("dialog").await, Some(doc("dialog")));
        assert_eq!(reloaded.guides().get("theming").await, Some(guide("theming")));
    }

    #[tokio::test]
    async fn test_load_discards_expired_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 60_000, true);
        std::fs::create_dir_all(&cfg.location).unwrap();

        let now = now_millis();
        let stale = CacheEntry {
            data: doc("old"),
            timestamp: now - 10_000,
            ttl: 1_000,
        };
        let fresh = CacheEntry {
            data: doc("new"),
            timestamp: now,
            ttl: 60_000,
        };
        let file = serde_json::to_vec(&vec![("old", stale), ("new", fresh)]).unwrap();
        std::fs::write(cfg.location.join(COMPONENTS_FILE), file).unwrap();

        let cache = DocCache::new(&cfg);
        cache.initialize().await.unwrap();
        assert_eq!(cache.components().len(), 1);
        assert!(cache.components().has("new"));
        assert!(!cache.components().has("old"));
    }

    #[tokio::test]
    async fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 60_000, true);
        std::fs::create_dir_all(&cfg.location).unwrap();
        std::fs::write(cfg.location.join(COMPONENTS_FILE), "{not json").unwrap();

        let cache = DocCache::new(&cfg);
        cache.initialize().await.unwrap();
        assert!(cache.components().is_empty());
    }

    #[tokio::test]
    async fn test_clear_persists_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 60_000, true);
        let cache = DocCache::new(&cfg);
        cache.initialize().await.unwrap();

        cache.components().set("button", doc("button"));
        cache.components().set("dialog", doc("dialog"));
        assert_eq!(cache.stats().components, 2);

        cache.components().clear().await.unwrap();
        assert_eq!(cache.stats().components, 0);

        let raw: Value = serde_json::from_slice(&std::fs::read(cfg.location.join(COMPONENTS_FILE)).unwrap()).unwrap();
        assert_eq!(raw, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_cleanup_evicts_expired() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(&config(dir.path(), 50, true));
        cache.initialize().await.unwrap();

        cache.components().set("button", doc("button"));
        cache.guides().set("icons", guide("icons"));
        assert_eq!(cache.cleanup().await.unwrap(), 0);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.cleanup().await.unwrap(), 2);
        assert_eq!(cache.stats(), CacheStats { components: 0, guides: 0, enabled: true });
    }

    #[tokio::test]
    async fn test_unwritable_directory_fails_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let cache = DocCache::new(&CacheConfig {
            enabled: true,
            ttl: 1000,
            location: blocker.join("cache"),
        });
        let err = cache.initialize().await.unwrap_err();
        assert_eq!(err.code(), "CACHE_ERROR");
    }
}
