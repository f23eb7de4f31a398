//! Calls and queries understood by RoleManagement.

use module_wiring::{Address, ModuleName, RoleId};

#[derive(Debug, Clone)]
pub enum RoleCall {
    /// `set_<peer>_address`. Owner only.
    SetPeer { peer: ModuleName, address: Address },
    /// Owner only. Adding an existing member is a no-op.
    AddBoardMember(Address),
    /// Proposed by the caller, approved by `approvers`.
    GrantRoleByBoard {
        role: RoleId,
        account: Address,
        approvers: Vec<Address>,
    },
}

#[derive(Debug, Clone)]
pub enum RoleQuery {
    HasRole { role: RoleId, account: Address },
    IsBoardMember(Address),
    Peer(ModuleName),
}

/// Results from RoleQuery - variants match 1:1 with RoleQuery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleQueryResult {
    HasRole(bool),
    IsBoardMember(bool),
    Peer(Option<Address>),
}
