//! 大厅服务提供者：工厂、引用计数句柄、子资源拆除与操作分发。
//!
//! # Lobby Service Provider
//!
//! ## Lifecycle
//!
//! 1. [`ProviderFactory::create`] reserves the handle shell, checks the
//!    requested capability, then builds the lock and the session binding.
//!    Any failure gives back what was already reserved, newest first.
//! 2. The provider starts with one reference. [`LobbyProvider::add_ref`] and
//!    [`LobbyProvider::query_capability`] add references;
//!    [`LobbyProvider::release`] drops them.
//! 3. The release that reaches zero destroys the session binding, then the
//!    lock, then frees the shell. This happens exactly once.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ProviderFactory`] | Builds providers against a heap and a config |
//! | [`LobbyProvider`] | Reference-counted handle with capability query |
//! | [`OwnedProvider`] | Scoped reference released on drop |
//! | [`LobbyServiceProvider`] | The lobby operation set |
//! | [`LobbyOperation`] | Operation names for generic dispatch |
//!
//! ```rust
//! use lobby_sp::capability::IID_LOBBY_SP;
//! use lobby_sp::provider::{LobbyOperation, LobbyServiceProvider, Payload, ProviderFactory};
//! use lobby_sp::session::HostSession;
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Session;
//! impl HostSession for Session {
//!     fn session_id(&self) -> uuid::Uuid { uuid::Uuid::nil() }
//! }
//!
//! let session: Arc<dyn HostSession> = Arc::new(Session);
//! let provider = ProviderFactory::new().create(&IID_LOBBY_SP, &session)?;
//! provider.dispatch(LobbyOperation::StartSession, &Payload::new())?;
//! assert_eq!(provider.add_ref(), 2);
//! assert_eq!(provider.release(), 1);
//! assert_eq!(provider.release(), 0);
//! assert!(!provider.is_live());
//! # Ok::<(), lobby_sp::Error>(())
//! ```

mod dispatch;
mod factory;
mod handle;
mod resources;

pub use dispatch::{LobbyOperation, LobbyServiceProvider, Payload};
pub use factory::{create_interface, default_factory, ProviderFactory};
pub use handle::{LobbyProvider, OwnedProvider};
