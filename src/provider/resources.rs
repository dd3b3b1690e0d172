//! Owned sub-resources and their teardown.

use crate::heap::{AllocKind, Allocation, Heap};
use crate::session::HostSession;
use crate::Result;
use std::mem;
use std::sync::{Arc, Mutex, Weak};

/// Mutual-exclusion primitive owned by one provider.
pub(crate) struct LockResource {
    // Reserved for serializing operations on one handle; nothing acquires it yet.
    #[allow(dead_code)]
    lock: Mutex<()>,
    label: Option<String>,
    _alloc: Allocation,
}

impl LockResource {
    pub(crate) fn new(heap: &Arc<dyn Heap>, label: &str) -> Result<Self> {
        let alloc = Allocation::reserve(heap, AllocKind::LockResource, mem::size_of::<Self>())?;
        Ok(Self {
            lock: Mutex::new(()),
            label: Some(label.to_string()),
            _alloc: alloc,
        })
    }

    pub(crate) fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn destroy(mut self) {
        self.label = None;
    }
}

/// Non-owning link to the host session.
pub(crate) struct SessionBinding {
    session: Option<Weak<dyn HostSession>>,
    _alloc: Allocation,
}

impl SessionBinding {
    pub(crate) fn new(heap: &Arc<dyn Heap>, session: &Arc<dyn HostSession>) -> Result<Self> {
        let alloc = Allocation::reserve(heap, AllocKind::SessionBinding, mem::size_of::<Self>())?;
        Ok(Self {
            session: Some(Arc::downgrade(session)),
            _alloc: alloc,
        })
    }

    /// The bound session, if the host still keeps it alive.
    pub(crate) fn session(&self) -> Option<Arc<dyn HostSession>> {
        self.session.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn destroy(mut self) {
        self.session = None;
    }
}

/// Everything a live provider owns besides its reference count.
///
/// Field order is teardown order.
pub(crate) struct ProviderParts {
    pub(crate) binding: SessionBinding,
    pub(crate) lock: LockResource,
    pub(crate) shell: Allocation,
}

impl ProviderParts {
    /// Destroys the parts newest first: binding, lock, then the shell itself.
    pub(crate) fn teardown(self) {
        let ProviderParts {
            binding,
            lock,
            shell,
        } = self;
        binding.destroy();
        lock.destroy();
        drop(shell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::RecordingHeap;
    use uuid::Uuid;

    #[derive(Debug)]
    struct FixedSession(Uuid);

    impl HostSession for FixedSession {
        fn session_id(&self) -> Uuid {
            self.0
        }
    }

    fn parts(heap: &Arc<dyn Heap>, session: &Arc<dyn HostSession>) -> ProviderParts {
        let shell = Allocation::reserve(heap, AllocKind::ProviderShell, 32).unwrap();
        let lock = LockResource::new(heap, "test.lock").unwrap();
        let binding = SessionBinding::new(heap, session).unwrap();
        ProviderParts {
            binding,
            lock,
            shell,
        }
    }

    #[test]
    fn test_teardown_order() {
        let recording = Arc::new(RecordingHeap::new());
        let heap: Arc<dyn Heap> = recording.clone();
        let session: Arc<dyn HostSession> = Arc::new(FixedSession(Uuid::new_v4()));

        let p = parts(&heap, &session);
        assert_eq!(recording.live_allocations(), 3);
        p.teardown();

        assert_eq!(recording.live_allocations(), 0);
        assert_eq!(
            recording.freed(),
            vec![
                AllocKind::SessionBinding,
                AllocKind::LockResource,
                AllocKind::ProviderShell,
            ]
        );
    }

    #[test]
    fn test_binding_does_not_own_session() {
        let heap: Arc<dyn Heap> = Arc::new(RecordingHeap::new());
        let id = Uuid::new_v4();
        let session: Arc<dyn HostSession> = Arc::new(FixedSession(id));

        let binding = SessionBinding::new(&heap, &session).unwrap();
        assert_eq!(binding.session().map(|s| s.session_id()), Some(id));
        assert_eq!(Arc::strong_count(&session), 1);

        drop(session);
        assert!(binding.session().is_none());
    }

    #[test]
    fn test_lock_label() {
        let heap: Arc<dyn Heap> = Arc::new(RecordingHeap::new());
        let lock = LockResource::new(&heap, "sp.lock").unwrap();
        assert_eq!(lock.label(), Some("sp.lock"));
    }
}
