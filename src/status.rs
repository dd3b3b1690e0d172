//! 状态码：将 Result 折叠为宿主可见的 HRESULT 风格状态值。
//!
//! Host-facing status codes.
//!
//! Hosts that speak in numeric result codes rather than Rust errors can fold any
//! provider [`Result`](crate::Result) into a [`Status`]. Exactly three outcomes
//! exist.
//!
//! ## Example
//!
//! ```rust
//! use lobby_sp::capability::InterfaceId;
//! use lobby_sp::status::Status;
//! use lobby_sp::{Error, ErrorContext};
//!
//! let err: lobby_sp::Result<()> = Err(Error::unsupported_capability(
//!     InterfaceId::from_u128(7),
//!     ErrorContext::new(),
//! ));
//! let status = Status::from_result(&err);
//! assert_eq!(status, Status::UnsupportedCapability);
//! assert_eq!(status.code(), 0x8000_4002);
//! assert!(status.is_failure());
//! ```

use crate::Error;
use std::fmt;

/// Outcome of a provider call as seen by a status-code host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Success.
    Ok,
    /// An allocation was refused at some construction step.
    OutOfMemory,
    /// The requested capability identifier is not implemented.
    UnsupportedCapability,
}

impl Status {
    /// Returns the HRESULT value (e.g., `0x8007000E`).
    #[inline]
    pub fn code(&self) -> u32 {
        match self {
            Self::Ok => 0x0000_0000,
            Self::OutOfMemory => 0x8007_000E,
            Self::UnsupportedCapability => 0x8000_4002,
        }
    }

    /// Returns the symbolic name (e.g., `"out_of_memory"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::OutOfMemory => "out_of_memory",
            Self::UnsupportedCapability => "unsupported_capability",
        }
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        self.code() & 0x8000_0000 != 0
    }

    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::OutOfMemory { .. } => Self::OutOfMemory,
            Error::UnsupportedCapability { .. } => Self::UnsupportedCapability,
        }
    }

    pub fn from_result<T>(result: &crate::Result<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::from_error(e),
        }
    }

    /// Maps a raw code back to a status; codes this provider never produces return `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0x0000_0000 => Some(Self::Ok),
            0x8007_000E => Some(Self::OutOfMemory),
            0x8000_4002 => Some(Self::UnsupportedCapability),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.code())
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        Self::from_error(err)
    }
}
