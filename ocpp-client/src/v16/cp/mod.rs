pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod error;
#[cfg(feature = "async")]
pub(crate) mod r#async;

pub(crate) type OcppError = cpsim_core::format::error::OcppError<cpsim_core::v16::protocol_error::ProtocolError>;
