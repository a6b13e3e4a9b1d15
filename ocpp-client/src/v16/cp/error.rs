use cpsim_core::v16::types::AuthorizationStatus;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("number_of_connectors must be at least 1")]
    NoConnectors,
    #[error("default connector {connector_id} is outside 1..={number_of_connectors}")]
    DefaultConnectorOutOfRange {
        connector_id: usize,
        number_of_connectors: usize,
    },
}

/// Errors that end the session run.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("self-test {action} for id tag {id_tag} was not accepted: {status:?}")]
    SelfTestRejected {
        action: &'static str,
        id_tag: String,
        status: AuthorizationStatus,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    #[error("connector {0} does not exist")]
    UnknownConnector(usize),
    #[error("connector {0} already has a transaction")]
    ConnectorOccupied(usize),
    #[error("transport is not connected")]
    Offline,
}
