//! 能力标识 — 通过 GUID 协商对象支持的操作集
//!
//! Capability identifiers. Callers name the operation set they want by an opaque
//! GUID rather than by concrete type; a provider answers with the matching
//! [`Capability`] or refuses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of an abstract operation set (a GUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(Uuid);

impl InterfaceId {
    pub const fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for InterfaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Registry-style braces are accepted: {5A4E5A20-2CED-11D0-A889-00A0C905433C}
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl From<Uuid> for InterfaceId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// The universal reference-counting capability every provider answers to.
pub const IID_UNKNOWN: InterfaceId = InterfaceId::from_u128(0x00000000_0000_0000_c000_000000000046);

/// The lobby service provider operation set.
pub const IID_LOBBY_SP: InterfaceId = InterfaceId::from_u128(0x5a4e5a20_2ced_11d0_a889_00a0c905433c);

/// Capabilities a lobby provider recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Reference counting and capability query only.
    Base,
    /// The full lobby operation set (includes `Base`).
    LobbyProvider,
}

impl Capability {
    /// Resolve an identifier to a known capability.
    pub fn from_id(id: &InterfaceId) -> Option<Self> {
        if *id == IID_UNKNOWN {
            Some(Self::Base)
        } else if *id == IID_LOBBY_SP {
            Some(Self::LobbyProvider)
        } else {
            None
        }
    }

    pub fn id(&self) -> InterfaceId {
        match self {
            Self::Base => IID_UNKNOWN,
            Self::LobbyProvider => IID_LOBBY_SP,
        }
    }

    /// Whether a factory may build an object for this capability.
    ///
    /// `Base` is reachable through query only; nothing is instantiated as a bare
    /// reference counter.
    pub fn is_instantiable(&self) -> bool {
        matches!(self, Self::LobbyProvider)
    }

    /// Whether an object bound to `self` also answers queries for `other`.
    pub fn implies(&self, other: Capability) -> bool {
        match self {
            Self::LobbyProvider => true,
            Self::Base => other == Self::Base,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::LobbyProvider => "lobby_provider",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
