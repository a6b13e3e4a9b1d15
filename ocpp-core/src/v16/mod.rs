pub mod call;
pub mod messages;
pub mod protocol_error;
pub mod types;
