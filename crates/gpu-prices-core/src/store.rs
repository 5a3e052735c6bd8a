//! Listing persistence. Each provider's listings are replaced wholesale
//! (delete, then insert) and every successful scrape is logged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GpuError, Result};
use crate::listing::GpuListing;

pub trait ListingStore {
    /// Drop every listing stored for `provider_key` and insert `listings`.
    fn replace_provider(&mut self, provider_key: &str, listings: &[GpuListing]) -> Result<()>;

    fn all_listings(&self) -> Result<Vec<GpuListing>>;

    fn mark_scraped(&mut self, provider_key: &str, at: DateTime<Utc>) -> Result<()>;

    /// Scrape log: provider key and last successful scrape.
    fn scrape_log(&self) -> Result<Vec<(String, DateTime<Utc>)>>;

    /// Drop every listing and the whole scrape log.
    fn clear(&mut self) -> Result<()>;

    fn last_scraped(&self, provider_key: &str) -> Result<Option<DateTime<Utc>>> {
        let key = provider_key.to_lowercase();
        Ok(self
            .scrape_log()?
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, at)| at))
    }

    /// Providers whose last scrape happened before `cutoff`.
    fn stale_providers(&self, cutoff: DateTime<Utc>) -> Result<Vec<String>> {
        Ok(self
            .scrape_log()?
            .into_iter()
            .filter(|(_, at)| *at < cutoff)
            .map(|(k, _)| k)
            .collect())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    /// Keyed by lower-cased provider key.
    listings: BTreeMap<String, Vec<GpuListing>>,
    scrape_log: BTreeMap<String, DateTime<Utc>>,
}

impl Snapshot {
    fn replace(&mut self, provider_key: &str, listings: &[GpuListing]) {
        self.listings
            .insert(provider_key.to_lowercase(), listings.to_vec());
    }

    fn all(&self) -> Vec<GpuListing> {
        self.listings.values().flatten().cloned().collect()
    }

    fn log(&self) -> Vec<(String, DateTime<Utc>)> {
        self.scrape_log.iter().map(|(k, at)| (k.clone(), *at)).collect()
    }
}

/// In-process store, used by tests and the wasm build.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListingStore for MemoryStore {
    fn replace_provider(&mut self, provider_key: &str, listings: &[GpuListing]) -> Result<()> {
        self.snapshot.replace(provider_key, listings);
        Ok(())
    }

    fn all_listings(&self) -> Result<Vec<GpuListing>> {
        Ok(self.snapshot.all())
    }

    fn mark_scraped(&mut self, provider_key: &str, at: DateTime<Utc>) -> Result<()> {
        self.snapshot.scrape_log.insert(provider_key.to_lowercase(), at);
        Ok(())
    }

    fn scrape_log(&self) -> Result<Vec<(String, DateTime<Utc>)>> {
        Ok(self.snapshot.log())
    }

    fn clear(&mut self) -> Result<()> {
        self.snapshot = Snapshot::default();
        Ok(())
    }
}

/// JSON snapshot on disk, rewritten after every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl FileStore {
    pub const FILENAME: &'static str = "listings.json";

    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(GpuError::Io(format!("failed to read {}: {e}", path.display()))),
        };
        Ok(Self { path, snapshot })
    }

    /// Open `listings.json` in the user cache directory.
    #[cfg(feature = "network")]
    pub fn open_default() -> Result<Self> {
        let path = crate::cache::cache_path(Self::FILENAME)
            .ok_or_else(|| GpuError::Io("cannot determine cache directory".into()))?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let body = serde_json::to_string_pretty(&self.snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body)
            .map_err(|e| GpuError::Io(format!("failed to write {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| GpuError::Io(format!("failed to replace {}: {e}", self.path.display())))
    }
}

impl ListingStore for FileStore {
    fn replace_provider(&mut self, provider_key: &str, listings: &[GpuListing]) -> Result<()> {
        self.snapshot.replace(provider_key, listings);
        self.save()
    }

    fn all_listings(&self) -> Result<Vec<GpuListing>> {
        Ok(self.snapshot.all())
    }

    fn mark_scraped(&mut self, provider_key: &str, at: DateTime<Utc>) -> Result<()> {
        self.snapshot.scrape_log.insert(provider_key.to_lowercase(), at);
        self.save()
    }

    fn scrape_log(&self) -> Result<Vec<(String, DateTime<Utc>)>> {
        Ok(self.snapshot.log())
    }

    fn clear(&mut self) -> Result<()> {
        self.snapshot = Snapshot::default();
        self.save()
    }
}
