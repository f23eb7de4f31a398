use crate::model::PeerBookError;
use module_wiring::Address;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error(transparent)]
    PeerBook(#[from] PeerBookError),

    #[error("proposer {0} is not a board member")]
    NotBoardMember(Address),

    #[error("approver {0} is not a board member")]
    ApproverNotOnBoard(Address),

    #[error("proposer cannot approve its own proposal")]
    SelfApproval,

    #[error("at least one approver is required")]
    NoApprovers,

    #[error("Host communication error: {0}")]
    HostCommunicationError(String),
}
