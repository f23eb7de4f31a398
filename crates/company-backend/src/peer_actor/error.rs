use crate::model::PeerBookError;
use module_wiring::ModuleName;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeerModuleError {
    #[error(transparent)]
    PeerBook(#[from] PeerBookError),

    #[error("{0} is not a peer module kind")]
    UnsupportedKind(ModuleName),

    #[error("constructor requires the {0} address")]
    MissingConstructorArgument(ModuleName),

    #[error("Host communication error: {0}")]
    HostCommunicationError(String),
}
