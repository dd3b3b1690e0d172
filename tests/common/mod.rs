//! Shared fixtures for integration tests.

#![allow(dead_code)]

use lobby_sp::heap::{Heap, RecordingHeap};
use lobby_sp::{HostSession, ProviderConfig, ProviderFactory};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug)]
pub struct TestSession {
    id: Uuid,
}

impl TestSession {
    pub fn new() -> Arc<dyn HostSession> {
        Arc::new(Self { id: Uuid::new_v4() })
    }
}

impl HostSession for TestSession {
    fn session_id(&self) -> Uuid {
        self.id
    }
}

/// Routes provider logs to the test writer; `RUST_LOG=lobby_sp=trace` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A factory over a fresh recording heap.
pub fn recording_factory() -> (ProviderFactory, Arc<RecordingHeap>) {
    init_tracing();
    let recording = Arc::new(RecordingHeap::new());
    let heap: Arc<dyn Heap> = recording.clone();
    let factory = ProviderFactory::new()
        .with_config(ProviderConfig::new().with_lock_label("test.lock"))
        .with_heap(heap);
    (factory, recording)
}
