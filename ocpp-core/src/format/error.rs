use std::fmt;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum GenericError {
    Offline,
    ParsingError,
}

/// Outcome of an outbound Call that did not produce a usable CallResult.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum OcppError<T> {
    /// The central system answered with a CallError carrying this code.
    Protocol(T),
    Other(GenericError),
}

impl<T: fmt::Display> fmt::Display for OcppError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcppError::Protocol(code) => write!(f, "CallError {code}"),
            OcppError::Other(GenericError::Offline) => write!(f, "connection closed"),
            OcppError::Other(GenericError::ParsingError) => write!(f, "unparsable reply payload"),
        }
    }
}
