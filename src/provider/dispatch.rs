//! Lobby operation surface.
//!
//! Every operation takes an opaque payload and reports success. None of them
//! inspects the payload or changes provider state.

use super::handle::LobbyProvider;
use crate::Result;
use bytes::Bytes;
use std::fmt;
use tracing::debug;

/// Opaque operation payload.
pub type Payload = Bytes;

/// Operations a lobby provider accepts from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LobbyOperation {
    AddGroupToGroup,
    AddPlayerToGroup,
    CreateGroup,
    CreateGroupInGroup,
    DeleteGroupFromGroup,
    DeletePlayerFromGroup,
    DestroyGroup,
    EnumSessionsResponse,
    GetSpDataPointer,
    HandleMessage,
    SendChatMessage,
    SetGroupName,
    SetPlayerName,
    SetSessionDesc,
    SetSpDataPointer,
    StartSession,
}

impl LobbyOperation {
    /// All operations, in dispatch-table order.
    pub const ALL: [LobbyOperation; 16] = [
        Self::AddGroupToGroup,
        Self::AddPlayerToGroup,
        Self::CreateGroup,
        Self::CreateGroupInGroup,
        Self::DeleteGroupFromGroup,
        Self::DeletePlayerFromGroup,
        Self::DestroyGroup,
        Self::EnumSessionsResponse,
        Self::GetSpDataPointer,
        Self::HandleMessage,
        Self::SendChatMessage,
        Self::SetGroupName,
        Self::SetPlayerName,
        Self::SetSessionDesc,
        Self::SetSpDataPointer,
        Self::StartSession,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddGroupToGroup => "add_group_to_group",
            Self::AddPlayerToGroup => "add_player_to_group",
            Self::CreateGroup => "create_group",
            Self::CreateGroupInGroup => "create_group_in_group",
            Self::DeleteGroupFromGroup => "delete_group_from_group",
            Self::DeletePlayerFromGroup => "delete_player_from_group",
            Self::DestroyGroup => "destroy_group",
            Self::EnumSessionsResponse => "enum_sessions_response",
            Self::GetSpDataPointer => "get_sp_data_pointer",
            Self::HandleMessage => "handle_message",
            Self::SendChatMessage => "send_chat_message",
            Self::SetGroupName => "set_group_name",
            Self::SetPlayerName => "set_player_name",
            Self::SetSessionDesc => "set_session_desc",
            Self::SetSpDataPointer => "set_sp_data_pointer",
            Self::StartSession => "start_session",
        }
    }
}

impl fmt::Display for LobbyOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The lobby service provider operation set.
pub trait LobbyServiceProvider {
    fn add_group_to_group(&self, payload: &Payload) -> Result<()>;
    fn add_player_to_group(&self, payload: &Payload) -> Result<()>;
    fn create_group(&self, payload: &Payload) -> Result<()>;
    fn create_group_in_group(&self, payload: &Payload) -> Result<()>;
    fn delete_group_from_group(&self, payload: &Payload) -> Result<()>;
    fn delete_player_from_group(&self, payload: &Payload) -> Result<()>;
    fn destroy_group(&self, payload: &Payload) -> Result<()>;
    fn enum_sessions_response(&self, payload: &Payload) -> Result<()>;
    fn get_sp_data_pointer(&self, payload: &Payload) -> Result<()>;
    fn handle_message(&self, payload: &Payload) -> Result<()>;
    fn send_chat_message(&self, payload: &Payload) -> Result<()>;
    fn set_group_name(&self, payload: &Payload) -> Result<()>;
    fn set_player_name(&self, payload: &Payload) -> Result<()>;
    fn set_session_desc(&self, payload: &Payload) -> Result<()>;
    fn set_sp_data_pointer(&self, payload: &Payload) -> Result<()>;
    fn start_session(&self, payload: &Payload) -> Result<()>;

    /// Routes `op` to its method.
    fn dispatch(&self, op: LobbyOperation, payload: &Payload) -> Result<()> {
        match op {
            LobbyOperation::AddGroupToGroup => self.add_group_to_group(payload),
            LobbyOperation::AddPlayerToGroup => self.add_player_to_group(payload),
            LobbyOperation::CreateGroup => self.create_group(payload),
            LobbyOperation::CreateGroupInGroup => self.create_group_in_group(payload),
            LobbyOperation::DeleteGroupFromGroup => self.delete_group_from_group(payload),
            LobbyOperation::DeletePlayerFromGroup => self.delete_player_from_group(payload),
            LobbyOperation::DestroyGroup => self.destroy_group(payload),
            LobbyOperation::EnumSessionsResponse => self.enum_sessions_response(payload),
            LobbyOperation::GetSpDataPointer => self.get_sp_data_pointer(payload),
            LobbyOperation::HandleMessage => self.handle_message(payload),
            LobbyOperation::SendChatMessage => self.send_chat_message(payload),
            LobbyOperation::SetGroupName => self.set_group_name(payload),
            LobbyOperation::SetPlayerName => self.set_player_name(payload),
            LobbyOperation::SetSessionDesc => self.set_session_desc(payload),
            LobbyOperation::SetSpDataPointer => self.set_sp_data_pointer(payload),
            LobbyOperation::StartSession => self.start_session(payload),
        }
    }
}

impl LobbyProvider {
    fn stub(&self, op: LobbyOperation, payload: &Payload) -> Result<()> {
        if self.log_stub_calls() {
            debug!(
                instance = %self.instance_id(),
                operation = op.name(),
                payload_len = payload.len(),
                "stub operation"
            );
        }
        Ok(())
    }
}

impl LobbyServiceProvider for LobbyProvider {
    fn add_group_to_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::AddGroupToGroup, payload)
    }

    fn add_player_to_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::AddPlayerToGroup, payload)
    }

    fn create_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::CreateGroup, payload)
    }

    fn create_group_in_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::CreateGroupInGroup, payload)
    }

    fn delete_group_from_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::DeleteGroupFromGroup, payload)
    }

    fn delete_player_from_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::DeletePlayerFromGroup, payload)
    }

    fn destroy_group(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::DestroyGroup, payload)
    }

    fn enum_sessions_response(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::EnumSessionsResponse, payload)
    }

    fn get_sp_data_pointer(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::GetSpDataPointer, payload)
    }

    fn handle_message(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::HandleMessage, payload)
    }

    fn send_chat_message(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::SendChatMessage, payload)
    }

    fn set_group_name(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::SetGroupName, payload)
    }

    fn set_player_name(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::SetPlayerName, payload)
    }

    fn set_session_desc(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::SetSessionDesc, payload)
    }

    fn set_sp_data_pointer(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::SetSpDataPointer, payload)
    }

    fn start_session(&self, payload: &Payload) -> Result<()> {
        self.stub(LobbyOperation::StartSession, payload)
    }
}
