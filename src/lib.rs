//! # lobby-sp
//!
//! 大厅服务提供者组件：宿主会话子系统加载它来交换组/玩家/会话控制消息。
//!
//! Lobby service provider component loaded by a host session subsystem to
//! exchange group, player and session control messages.
//!
//! ## Overview
//!
//! The provider is a reference-counted object negotiated by capability
//! identifier. Its operation set is a placeholder surface: every operation
//! accepts an opaque payload and reports success. What carries weight is the
//! lifecycle: all-or-nothing construction, atomic reference counting, and a
//! single ordered teardown on the last release.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`provider`] | Factory, handle, teardown and operation dispatch |
//! | [`capability`] | Capability identifiers and negotiation |
//! | [`heap`] | Host allocation service and RAII reservations |
//! | [`session`] | Host session seam |
//! | [`status`] | HRESULT-style status codes |
//! | [`config`] | Provider configuration |

pub mod capability;
pub mod config;
pub mod heap;
pub mod provider;
pub mod session;
pub mod status;

mod error;

pub use capability::{Capability, InterfaceId, IID_LOBBY_SP, IID_UNKNOWN};
pub use config::ProviderConfig;
pub use error::{Error, ErrorContext};
pub use provider::{
    create_interface, LobbyOperation, LobbyProvider, LobbyServiceProvider, OwnedProvider, Payload,
    ProviderFactory,
};
pub use session::HostSession;
pub use status::Status;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
