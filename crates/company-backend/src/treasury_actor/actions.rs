use module_wiring::{Address, ModuleName};

#[derive(Debug, Clone)]
pub enum TreasuryCall {
    /// `set_<peer>_address`. Owner only.
    SetPeer { peer: ModuleName, address: Address },
    /// Owner only, once, and only for an account holding the finance director role.
    SetInitialFinanceDirector(Address),
}

#[derive(Debug, Clone)]
pub enum TreasuryQuery {
    FinanceDirector,
    Peer(ModuleName),
}

/// Results from TreasuryQuery - variants match 1:1 with TreasuryQuery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreasuryQueryResult {
    FinanceDirector(Option<Address>),
    Peer(Option<Address>),
}
