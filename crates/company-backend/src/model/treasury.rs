use super::PeerBook;
use module_wiring::{Address, ModuleName};

/// The company treasury. Only the parts wiring touches are modelled: its peers and the
/// finance director, which can be set once.
#[derive(Debug, Clone)]
pub struct Treasury {
    pub address: Address,
    pub peers: PeerBook,
    pub role_management: Address,
    pub finance_director: Option<Address>,
}

#[derive(Debug, Clone)]
pub struct TreasuryDeploy {
    pub role_management: Address,
}

impl Treasury {
    pub fn new(address: Address, deployer: Address, role_management: Address) -> Self {
        Self {
            address,
            peers: PeerBook::for_module(deployer, ModuleName::Treasury),
            role_management,
            finance_director: None,
        }
    }
}
