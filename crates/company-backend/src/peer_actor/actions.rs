use module_wiring::{Address, ModuleName};

#[derive(Debug, Clone)]
pub enum PeerCall {
    /// `set_<peer>_address`. Owner only.
    SetPeer { peer: ModuleName, address: Address },
}

#[derive(Debug, Clone)]
pub enum PeerQuery {
    Kind,
    Peer(ModuleName),
}

/// Results from PeerQuery - variants match 1:1 with PeerQuery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerQueryResult {
    Kind(ModuleName),
    Peer(Option<Address>),
}
