//! Per-mount ownership of GPU-side resources.
//!
//! Every allocation made while mounting is registered in one
//! [`ResourceArena`]. The arena belongs to a single mount epoch: ids from
//! another epoch are rejected, and [`ResourceArena::dispose_all`] releases
//! everything exactly once, newest first.

use fnv::FnvHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Explicit release of an underlying resource.
pub trait Dispose {
    fn dispose(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Geometry,
    Material,
    Texture,
    RenderTarget,
    Uniforms,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    epoch: u64,
    index: u32,
}

impl ResourceId {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

struct Entry<R> {
    kind: ResourceKind,
    label: &'static str,
    resource: Option<R>,
}

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

pub struct ResourceArena<R: Dispose> {
    epoch: u64,
    entries: Vec<Entry<R>>,
    disposed: usize,
}

impl<R: Dispose> Default for ResourceArena<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Dispose> ResourceArena<R> {
    pub fn new() -> Self {
        Self {
            epoch: NEXT_EPOCH.fetch_add(1, Ordering::Relaxed),
            entries: Vec::new(),
            disposed: 0,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn insert(&mut self, kind: ResourceKind, label: &'static str, resource: R) -> ResourceId {
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            kind,
            label,
            resource: Some(resource),
        });
        ResourceId {
            epoch: self.epoch,
            index,
        }
    }

    fn entry_mut(&mut self, id: ResourceId) -> Option<&mut Entry<R>> {
        if id.epoch != self.epoch {
            return None;
        }
        self.entries.get_mut(id.index as usize)
    }

    pub fn get(&self, id: ResourceId) -> Option<&R> {
        if id.epoch != self.epoch {
            return None;
        }
        self.entries
            .get(id.index as usize)
            .and_then(|e| e.resource.as_ref())
    }

    /// Swaps in a new resource under an existing id, disposing the old one.
    /// Returns false (and disposes `resource`) when the id is not live.
    pub fn replace(&mut self, id: ResourceId, mut resource: R) -> bool {
        let old = match self.entry_mut(id) {
            Some(entry) if entry.resource.is_some() => entry.resource.replace(resource),
            _ => {
                resource.dispose();
                return false;
            }
        };
        if let Some(mut old) = old {
            old.dispose();
            self.disposed += 1;
        }
        true
    }

    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.resource.is_some()).count()
    }

    /// Number of dispose calls made so far, replacements included.
    pub fn disposed_count(&self) -> usize {
        self.disposed
    }

    /// Live resources per kind.
    pub fn census(&self) -> FnvHashMap<ResourceKind, usize> {
        let mut counts = FnvHashMap::default();
        for e in self.entries.iter().filter(|e| e.resource.is_some()) {
            *counts.entry(e.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Disposes every live resource in reverse insertion order. Calling it
    /// again is a no-op.
    pub fn dispose_all(&mut self) -> usize {
        let mut released = 0;
        for entry in self.entries.iter_mut().rev() {
            if let Some(mut r) = entry.resource.take() {
                log::trace!("dispose {:?} '{}'", entry.kind, entry.label);
                r.dispose();
                released += 1;
            }
        }
        self.disposed += released;
        released
    }
}

impl<R: Dispose> Drop for ResourceArena<R> {
    fn drop(&mut self) {
        let leaked = self.dispose_all();
        if leaked > 0 {
            log::warn!(
                "resource arena epoch {} dropped with {} live resources; disposed on drop",
                self.epoch,
                leaked
            );
        }
    }
}
