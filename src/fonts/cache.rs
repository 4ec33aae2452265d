// src/fonts/cache.rs
//
// FontCache is the shared, append-only store of loaded fonts, keyed by
// font reference. Loads run on their own thread; callers poll with
// `lookup`/`request` from the frame loop. A failed load is terminal for
// that reference.

use super::{FontEntry, FontLoadError};
use log::{debug, info};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
    thread,
};

#[derive(Debug, Clone)]
pub enum FontLookup {
    Ready(Arc<FontEntry>),
    Pending,
    Failed(Arc<FontLoadError>),
}

impl FontLookup {
    pub fn is_pending(&self) -> bool {
        matches!(self, FontLookup::Pending)
    }

    pub fn ready(&self) -> Option<&Arc<FontEntry>> {
        match self {
            FontLookup::Ready(entry) => Some(entry),
            _ => None,
        }
    }
}

impl From<Result<Arc<FontEntry>, Arc<FontLoadError>>> for FontLookup {
    fn from(result: Result<Arc<FontEntry>, Arc<FontLoadError>>) -> Self {
        match result {
            Ok(entry) => FontLookup::Ready(entry),
            Err(error) => FontLookup::Failed(error),
        }
    }
}

type Slots = HashMap<String, FontLookup>;

/// Cloning shares the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct FontCache {
    slots: Arc<RwLock<Slots>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for `font_ref`, `None` if it was never requested.
    pub fn lookup(&self, font_ref: &str) -> Option<FontLookup> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(font_ref).cloned()
    }

    /// Returns the cached state, starting a background load on first use.
    pub fn request(&self, font_ref: &str) -> FontLookup {
        {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = slots.get(font_ref) {
                return existing.clone();
            }
            slots.insert(font_ref.to_string(), FontLookup::Pending);
        }

        info!("loading font {}", font_ref);
        let slots = Arc::clone(&self.slots);
        let owned_ref = font_ref.to_string();
        let spawned = thread::Builder::new()
            .name(format!("font-load {}", font_ref))
            .spawn(move || {
                let result = FontEntry::load(&owned_ref);
                FontLookup::from(Self::settle(&slots, &owned_ref, result))
            });

        match spawned {
            Ok(_) => self.lookup(font_ref).unwrap_or(FontLookup::Pending),
            Err(source) => {
                let error = FontLoadError::Spawn {
                    font_ref: font_ref.to_string(),
                    source,
                };
                Self::settle(&self.slots, font_ref, Err(error)).into()
            }
        }
    }

    /// Loads on the calling thread. Cached results are returned as-is.
    pub fn load_blocking(&self, font_ref: &str) -> Result<Arc<FontEntry>, Arc<FontLoadError>> {
        match self.lookup(font_ref) {
            Some(FontLookup::Ready(entry)) => return Ok(entry),
            Some(FontLookup::Failed(error)) => return Err(error),
            _ => {}
        }
        let result = FontEntry::load(font_ref);
        Self::settle(&self.slots, font_ref, result)
    }

    /// Adds an in-memory font under `font_ref`, replacing nothing that
    /// already settled.
    pub fn register_bytes(
        &self,
        font_ref: &str,
        data: Vec<u8>,
    ) -> Result<Arc<FontEntry>, Arc<FontLoadError>> {
        match self.lookup(font_ref) {
            Some(FontLookup::Ready(entry)) => return Ok(entry),
            Some(FontLookup::Failed(error)) => return Err(error),
            _ => {}
        }
        let result = FontEntry::from_bytes(font_ref, data);
        Self::settle(&self.slots, font_ref, result)
    }

    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Explicit teardown. Loads still in flight land in the emptied map.
    pub fn clear(&self) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn settle(
        slots: &RwLock<Slots>,
        font_ref: &str,
        result: Result<FontEntry, FontLoadError>,
    ) -> Result<Arc<FontEntry>, Arc<FontLoadError>> {
        let (lookup, outcome) = match result {
            Ok(entry) => {
                info!("font {} ready", font_ref);
                let entry = Arc::new(entry);
                (FontLookup::Ready(Arc::clone(&entry)), Ok(entry))
            }
            Err(error) => {
                debug!("font load failed: {}", error);
                let error = Arc::new(error);
                (FontLookup::Failed(Arc::clone(&error)), Err(error))
            }
        };
        slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(font_ref.to_string(), lookup);
        outcome
    }
}
