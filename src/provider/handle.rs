//! Reference-counted provider handle.

use super::resources::ProviderParts;
use crate::capability::{Capability, InterfaceId};
use crate::session::HostSession;
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace, warn};
use uuid::Uuid;

struct ProviderShell {
    instance: Uuid,
    capability: Capability,
    log_stub_calls: bool,
    ref_count: AtomicU32,
    parts: Mutex<Option<ProviderParts>>,
}

/// A lobby service provider instance.
///
/// The handle carries an explicit count of outstanding references, started at
/// 1 by the factory. Moving or borrowing a `LobbyProvider` value does not touch
/// the count: every reference obtained through [`add_ref`](Self::add_ref) or
/// [`query_capability`](Self::query_capability) must be matched by one
/// [`release`](Self::release). The release that brings the count to zero
/// tears the provider down.
///
/// [`OwnedProvider`] ties one reference to a Rust scope instead.
pub struct LobbyProvider {
    shell: Arc<ProviderShell>,
}

impl LobbyProvider {
    pub(crate) fn assemble(capability: Capability, log_stub_calls: bool, parts: ProviderParts) -> Self {
        Self {
            shell: Arc::new(ProviderShell {
                instance: Uuid::new_v4(),
                capability,
                log_stub_calls,
                ref_count: AtomicU32::new(1),
                parts: Mutex::new(Some(parts)),
            }),
        }
    }

    pub(crate) fn shell_size() -> usize {
        std::mem::size_of::<ProviderShell>()
    }

    /// Adds a reference. Returns the new count.
    pub fn add_ref(&self) -> u32 {
        let count = self
            .shell
            .ref_count
            .fetch_add(1, Ordering::Relaxed)
            .wrapping_add(1);
        trace!(instance = %self.shell.instance, ref_count = count, "add_ref");
        count
    }

    /// Drops a reference. Returns the new count.
    ///
    /// The caller whose release reaches zero runs teardown before this returns.
    /// Releasing a handle that has no references left is a caller bug: the
    /// count stays at zero and teardown does not run again.
    pub fn release(&self) -> u32 {
        let prev = self
            .shell
            .ref_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        match prev {
            Ok(prev) => {
                let count = prev - 1;
                trace!(instance = %self.shell.instance, ref_count = count, "release");
                if count == 0 {
                    self.teardown();
                }
                count
            }
            Err(_) => {
                warn!(instance = %self.shell.instance, "release without an outstanding reference");
                0
            }
        }
    }

    /// Adds a reference and returns a handle that owns it.
    pub fn duplicate(&self) -> LobbyProvider {
        self.add_ref();
        self.alias()
    }

    /// Asks for the operation set named by `id`.
    ///
    /// On success the returned handle carries a new reference that the caller
    /// must release. On failure the count is untouched.
    pub fn query_capability(&self, id: &InterfaceId) -> Result<LobbyProvider> {
        if self.supports(id) {
            return Ok(self.duplicate());
        }
        debug!(instance = %self.shell.instance, capability_id = %id, "unsupported capability");
        Err(Error::unsupported_capability(
            *id,
            ErrorContext::new()
                .with_source("query_capability")
                .with_details(format!("provider implements {}", self.shell.capability)),
        ))
    }

    /// Whether [`query_capability`](Self::query_capability) would succeed for `id`.
    pub fn supports(&self, id: &InterfaceId) -> bool {
        Capability::from_id(id).is_some_and(|c| self.shell.capability.implies(c))
    }

    /// Takes over one reference the caller already holds.
    pub fn into_owned(self) -> OwnedProvider {
        OwnedProvider { provider: self }
    }

    pub fn ref_count(&self) -> u32 {
        self.shell.ref_count.load(Ordering::Acquire)
    }

    /// False once the last reference has been released.
    pub fn is_live(&self) -> bool {
        self.parts().is_some()
    }

    pub fn capability(&self) -> Capability {
        self.shell.capability
    }

    pub fn instance_id(&self) -> Uuid {
        self.shell.instance
    }

    /// The host session this provider serves, while both are alive.
    pub fn session(&self) -> Option<Arc<dyn HostSession>> {
        self.parts().as_ref().and_then(|p| p.binding.session())
    }

    /// Diagnostic label of the provider's lock; `None` after teardown.
    pub fn lock_label(&self) -> Option<String> {
        self.parts()
            .as_ref()
            .and_then(|p| p.lock.label().map(str::to_string))
    }

    pub(crate) fn log_stub_calls(&self) -> bool {
        self.shell.log_stub_calls
    }

    fn alias(&self) -> LobbyProvider {
        LobbyProvider {
            shell: Arc::clone(&self.shell),
        }
    }

    fn parts(&self) -> MutexGuard<'_, Option<ProviderParts>> {
        self.shell.parts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn teardown(&self) {
        // Only the release that hit zero gets here, so nobody else holds the parts.
        let parts = self.parts().take();
        if let Some(parts) = parts {
            parts.teardown();
            debug!(instance = %self.shell.instance, "provider torn down");
        }
    }
}

impl fmt::Debug for LobbyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LobbyProvider")
            .field("instance", &self.shell.instance)
            .field("capability", &self.shell.capability)
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

/// One counted reference to a provider, released when dropped.
pub struct OwnedProvider {
    provider: LobbyProvider,
}

impl OwnedProvider {
    /// Another scoped reference to the same provider.
    pub fn share(&self) -> OwnedProvider {
        self.provider.duplicate().into_owned()
    }
}

impl Deref for OwnedProvider {
    type Target = LobbyProvider;

    fn deref(&self) -> &LobbyProvider {
        &self.provider
    }
}

impl Drop for OwnedProvider {
    fn drop(&mut self) {
        self.provider.release();
    }
}

impl fmt::Debug for OwnedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedProvider").field(&self.provider).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{IID_LOBBY_SP, IID_UNKNOWN};
    use crate::heap::{AllocKind, Allocation, Heap, RecordingHeap};
    use crate::provider::resources::{LockResource, SessionBinding};

    #[derive(Debug)]
    struct NullSession;

    impl HostSession for NullSession {
        fn session_id(&self) -> Uuid {
            Uuid::nil()
        }
    }

    fn build(recording: &Arc<RecordingHeap>, session: &Arc<dyn HostSession>) -> LobbyProvider {
        let heap: Arc<dyn Heap> = recording.clone();
        let shell = Allocation::reserve(&heap, AllocKind::ProviderShell, 64).unwrap();
        let lock = LockResource::new(&heap, "unit.lock").unwrap();
        let binding = SessionBinding::new(&heap, session).unwrap();
        LobbyProvider::assemble(
            Capability::LobbyProvider,
            false,
            ProviderParts {
                binding,
                lock,
                shell,
            },
        )
    }

    #[test]
    fn test_counts() {
        let recording = Arc::new(RecordingHeap::new());
        let session: Arc<dyn HostSession> = Arc::new(NullSession);
        let p = build(&recording, &session);

        assert_eq!(p.ref_count(), 1);
        assert_eq!(p.add_ref(), 2);
        assert_eq!(p.add_ref(), 3);
        assert_eq!(p.release(), 2);
        assert_eq!(p.release(), 1);
        assert!(p.is_live());
        assert_eq!(p.release(), 0);
        assert!(!p.is_live());
        assert_eq!(recording.live_allocations(), 0);
    }

    #[test]
    fn test_over_release_saturates() {
        let recording = Arc::new(RecordingHeap::new());
        let session: Arc<dyn HostSession> = Arc::new(NullSession);
        let p = build(&recording, &session);

        assert_eq!(p.release(), 0);
        assert_eq!(p.release(), 0);
        assert_eq!(p.ref_count(), 0);
        assert_eq!(recording.freed().len(), 3);
    }

    #[test]
    fn test_query_base_and_lobby() {
        let recording = Arc::new(RecordingHeap::new());
        let session: Arc<dyn HostSession> = Arc::new(NullSession);
        let p = build(&recording, &session);

        let base = p.query_capability(&IID_UNKNOWN).unwrap();
        assert_eq!(p.ref_count(), 2);
        let lobby = base.query_capability(&IID_LOBBY_SP).unwrap();
        assert_eq!(p.ref_count(), 3);
        assert_eq!(lobby.instance_id(), p.instance_id());

        lobby.release();
        base.release();
        p.release();
        assert!(!p.is_live());
    }

    #[test]
    fn test_owned_provider_releases_on_drop() {
        let recording = Arc::new(RecordingHeap::new());
        let session: Arc<dyn HostSession> = Arc::new(NullSession);
        let owned = build(&recording, &session).into_owned();
        {
            let shared = owned.share();
            assert_eq!(shared.ref_count(), 2);
        }
        assert_eq!(owned.ref_count(), 1);
        drop(owned);
        assert_eq!(recording.live_allocations(), 0);
    }

    #[test]
    fn test_accessors_after_teardown() {
        let recording = Arc::new(RecordingHeap::new());
        let session: Arc<dyn HostSession> = Arc::new(NullSession);
        let p = build(&recording, &session);
        assert_eq!(p.lock_label().as_deref(), Some("unit.lock"));
        assert!(p.session().is_some());

        p.release();
        assert_eq!(p.lock_label(), None);
        assert!(p.session().is_none());
        assert_eq!(p.capability(), Capability::LobbyProvider);
    }
}
