use crate::model::PeerBookError;
use module_wiring::Address;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreasuryError {
    #[error(transparent)]
    PeerBook(#[from] PeerBookError),

    #[error("finance director already set to {0}")]
    FinanceDirectorAlreadySet(Address),

    #[error("{0} does not hold the finance director role")]
    MissingRole(Address),

    #[error("Host communication error: {0}")]
    HostCommunicationError(String),
}
