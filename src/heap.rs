//! 宿主堆服务：分配 / 清零 / 释放，带 RAII 归还
//!
//! Host heap service.
//!
//! The host owns the allocation policy for every provider part. This module
//! models that service as the [`Heap`] trait and hands out [`Allocation`]
//! guards that return their reservation when dropped, so a construction path
//! that bails out early gives back everything it already took, newest first.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Heap`] | Trait for allocation services |
//! | [`ProcessHeap`] | Default heap backed by the global allocator; never refuses |
//! | [`RecordingHeap`] | In-memory heap that records traffic and can inject failures |
//! | [`Allocation`] | RAII reservation returned by [`Allocation::reserve`] |

use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// What an allocation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocKind {
    /// The handle itself (capability binding and reference count).
    ProviderShell,
    LockResource,
    SessionBinding,
}

impl AllocKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProviderShell => "provider shell",
            Self::LockResource => "lock resource",
            Self::SessionBinding => "session binding",
        }
    }
}

impl fmt::Display for AllocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Allocation service supplied by the host.
///
/// Memory handed out is zeroed; the provider never reads a part before
/// initialising it, so implementations only account for the reservation.
pub trait Heap: Send + Sync {
    fn allocate(&self, kind: AllocKind, size: usize) -> Result<()>;
    fn free(&self, kind: AllocKind, size: usize);
}

/// Heap backed by the process allocator.
///
/// The global allocator aborts rather than returning null, so this heap never
/// reports `OutOfMemory`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHeap;

impl Heap for ProcessHeap {
    fn allocate(&self, kind: AllocKind, size: usize) -> Result<()> {
        tracing::trace!(kind = kind.name(), size, "heap allocate");
        Ok(())
    }

    fn free(&self, kind: AllocKind, size: usize) {
        tracing::trace!(kind = kind.name(), size, "heap free");
    }
}

/// One reservation against a [`Heap`]. Dropping it frees the reservation.
pub struct Allocation {
    heap: Arc<dyn Heap>,
    kind: AllocKind,
    size: usize,
}

impl Allocation {
    pub fn reserve(heap: &Arc<dyn Heap>, kind: AllocKind, size: usize) -> Result<Self> {
        heap.allocate(kind, size)?;
        Ok(Self {
            heap: Arc::clone(heap),
            kind,
            size,
        })
    }

    pub fn kind(&self) -> AllocKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for Allocation {
    fn drop(&mut self) {
        self.heap.free(self.kind, self.size);
    }
}

impl fmt::Debug for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocation")
            .field("kind", &self.kind)
            .field("size", &self.size)
            .finish()
    }
}

/// A single heap call observed by [`RecordingHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapEvent {
    Allocated(AllocKind),
    Refused(AllocKind),
    Freed(AllocKind),
}

/// In-memory heap for testing and diagnostics.
///
/// Records every call in order, tracks what is still outstanding and can be
/// told to refuse allocations of one kind.
pub struct RecordingHeap {
    events: RwLock<Vec<HeapEvent>>,
    fail_on: RwLock<Option<AllocKind>>,
    live: AtomicUsize,
    live_bytes: AtomicUsize,
}

impl RecordingHeap {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            live: AtomicUsize::new(0),
            live_bytes: AtomicUsize::new(0),
        }
    }

    /// Refuse every allocation of `kind` from now on.
    pub fn failing_on(self, kind: AllocKind) -> Self {
        self.set_fail_on(Some(kind));
        self
    }

    pub fn set_fail_on(&self, kind: Option<AllocKind>) {
        *self.fail_on.write().unwrap_or_else(|e| e.into_inner()) = kind;
    }

    pub fn events(&self) -> Vec<HeapEvent> {
        self.events.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Kinds freed so far, in the order they were freed.
    pub fn freed(&self) -> Vec<AllocKind> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HeapEvent::Freed(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn live_allocations(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.events.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, event: HeapEvent) {
        self.events
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl Default for RecordingHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap for RecordingHeap {
    fn allocate(&self, kind: AllocKind, size: usize) -> Result<()> {
        let refuse = *self.fail_on.read().unwrap_or_else(|e| e.into_inner()) == Some(kind);
        if refuse {
            self.record(HeapEvent::Refused(kind));
            return Err(Error::out_of_memory(
                kind,
                ErrorContext::new()
                    .with_details(format!("{} bytes", size))
                    .with_source("recording_heap"),
            ));
        }
        self.live.fetch_add(1, Ordering::AcqRel);
        self.live_bytes.fetch_add(size, Ordering::AcqRel);
        self.record(HeapEvent::Allocated(kind));
        Ok(())
    }

    fn free(&self, kind: AllocKind, size: usize) {
        self.live.fetch_sub(1, Ordering::AcqRel);
        self.live_bytes.fetch_sub(size, Ordering::AcqRel);
        self.record(HeapEvent::Freed(kind));
    }
}
