//! Host session seam.

use std::fmt;
use uuid::Uuid;

/// The host-side session a provider serves.
///
/// Providers only ever hold a weak link to it; the host decides when it dies.
pub trait HostSession: Send + Sync + fmt::Debug {
    /// Identifier of the session instance.
    fn session_id(&self) -> Uuid;
}
