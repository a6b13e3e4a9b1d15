pub mod decision;
pub mod timers;
#[cfg(feature = "async")]
pub mod websocket;
