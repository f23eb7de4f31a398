use super::PeerBook;
use module_wiring::{Address, ModuleName, RoleId};
use std::collections::HashSet;

/// Role storage and the board that approves grants.
///
/// The deployer owns the module and is its first board member.
#[derive(Debug, Clone)]
pub struct RoleManagement {
    pub address: Address,
    pub peers: PeerBook,
    pub board: HashSet<Address>,
    pub grants: HashSet<(RoleId, Address)>,
}

/// RoleManagement takes no constructor arguments.
#[derive(Debug, Clone, Default)]
pub struct RoleManagementDeploy;

impl RoleManagement {
    pub fn new(address: Address, deployer: Address) -> Self {
        Self {
            address,
            peers: PeerBook::for_module(deployer, ModuleName::RoleManagement),
            board: HashSet::from([deployer]),
            grants: HashSet::new(),
        }
    }

    pub fn has_role(&self, role: &RoleId, account: &Address) -> bool {
        self.grants.contains(&(role.clone(), *account))
    }

    pub fn is_board_member(&self, account: &Address) -> bool {
        self.board.contains(account)
    }
}
