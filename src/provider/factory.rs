//! Provider factory.

use super::handle::LobbyProvider;
use super::resources::{LockResource, ProviderParts, SessionBinding};
use crate::capability::{Capability, InterfaceId};
use crate::config::ProviderConfig;
use crate::heap::{AllocKind, Allocation, Heap, ProcessHeap};
use crate::session::HostSession;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds lobby providers against a heap and a configuration.
pub struct ProviderFactory {
    config: ProviderConfig,
    heap: Arc<dyn Heap>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        Self {
            config: ProviderConfig::default(),
            heap: Arc::new(ProcessHeap),
        }
    }

    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_heap(mut self, heap: Arc<dyn Heap>) -> Self {
        self.heap = heap;
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Creates a provider implementing `id`, bound to `session`.
    ///
    /// Returns a provider holding exactly one reference, or an error with every
    /// partial allocation already given back.
    pub fn create(&self, id: &InterfaceId, session: &Arc<dyn HostSession>) -> Result<LobbyProvider> {
        trace!(capability_id = %id, "create provider");

        let shell = Allocation::reserve(&self.heap, AllocKind::ProviderShell, LobbyProvider::shell_size())?;

        let Some(capability) = Capability::from_id(id).filter(Capability::is_instantiable) else {
            return Err(Error::unsupported_capability(
                *id,
                ErrorContext::new().with_source("factory"),
            ));
        };

        let lock = LockResource::new(&self.heap, &self.config.lock_label)?;
        let binding = SessionBinding::new(&self.heap, session)?;

        let provider = LobbyProvider::assemble(
            capability,
            self.config.log_stub_calls,
            ProviderParts {
                binding,
                lock,
                shell,
            },
        );
        debug!(
            instance = %provider.instance_id(),
            capability = %capability,
            ref_count = provider.ref_count(),
            "provider created"
        );
        Ok(provider)
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_FACTORY: once_cell::sync::Lazy<ProviderFactory> =
    once_cell::sync::Lazy::new(|| ProviderFactory::new().with_config(ProviderConfig::from_env()));

/// Process-wide factory using the process heap and environment configuration.
pub fn default_factory() -> &'static ProviderFactory {
    &DEFAULT_FACTORY
}

/// Creates a provider with the [`default_factory`].
pub fn create_interface(id: &InterfaceId, session: &Arc<dyn HostSession>) -> Result<LobbyProvider> {
    default_factory().create(id, session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{IID_LOBBY_SP, IID_UNKNOWN};
    use crate::heap::{HeapEvent, RecordingHeap};
    use uuid::Uuid;

    #[derive(Debug)]
    struct NullSession;

    impl HostSession for NullSession {
        fn session_id(&self) -> Uuid {
            Uuid::nil()
        }
    }

    fn session() -> Arc<dyn HostSession> {
        Arc::new(NullSession)
    }

    #[test]
    fn test_create_allocates_in_order() {
        let recording = Arc::new(RecordingHeap::new());
        let factory = ProviderFactory::new().with_heap(recording.clone());

        let p = factory.create(&IID_LOBBY_SP, &session()).unwrap();
        assert_eq!(p.ref_count(), 1);
        assert_eq!(
            recording.events(),
            vec![
                HeapEvent::Allocated(AllocKind::ProviderShell),
                HeapEvent::Allocated(AllocKind::LockResource),
                HeapEvent::Allocated(AllocKind::SessionBinding),
            ]
        );
        p.release();
    }

    #[test]
    fn test_base_capability_is_not_instantiable() {
        let recording = Arc::new(RecordingHeap::new());
        let factory = ProviderFactory::new().with_heap(recording.clone());

        let err = factory.create(&IID_UNKNOWN, &session()).unwrap_err();
        assert!(err.is_unsupported_capability());
        assert_eq!(recording.live_allocations(), 0);
    }

    #[test]
    fn test_shell_refusal_precedes_capability_check() {
        let recording = Arc::new(RecordingHeap::new().failing_on(AllocKind::ProviderShell));
        let factory = ProviderFactory::new().with_heap(recording.clone());

        let bogus = InterfaceId::from_uuid(Uuid::new_v4());
        let err = factory.create(&bogus, &session()).unwrap_err();
        assert!(err.is_out_of_memory());
    }

    #[test]
    fn test_config_reaches_provider() {
        let factory = ProviderFactory::new()
            .with_config(ProviderConfig::new().with_lock_label("custom.lock"));
        let p = factory.create(&IID_LOBBY_SP, &session()).unwrap();
        assert_eq!(p.lock_label().as_deref(), Some("custom.lock"));
        p.release();
    }
}
