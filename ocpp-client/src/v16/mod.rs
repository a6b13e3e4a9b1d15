mod cp;
mod drivers;
#[macro_use]
mod state_machine;
mod events;

pub use cp::{
    config::ChargePointConfig,
    core::ChargePointCore,
    error::{ConfigError, EngineError, TransactionError},
};
pub use drivers::{
    decision::{DecisionTicket, Prompt, Verdict},
    timers::TimerId,
};
pub use state_machine::{
    actions::CoreActions,
    call::CallAction,
    connector::ConnectorState,
    meter::MeterDataType,
    signed::SignedMeterFormat,
    transaction::{SessionOrigin, SessionPhase, TransactionSession},
};

#[cfg(feature = "async")]
pub use cp::r#async::ChargePointAsync;

#[cfg(feature = "async")]
pub use drivers::{
    decision::{AutoAccept, DecisionProvider},
    timers::TimerManager,
    websocket::{TransportEvent, WebsocketTransport},
};

#[cfg(feature = "tokio_timer")]
pub use drivers::timers::TokioTimerManager;
