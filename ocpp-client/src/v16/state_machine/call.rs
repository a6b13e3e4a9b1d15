use std::collections::BTreeMap;

use cpsim_core::{
    format::{
        error::GenericError,
        frame::{Call, CallError, CallResult},
        message::{CallResponse, EncodeDecode},
    },
    v16::{messages::start_transaction::StartTransactionRequest, protocol_error::ProtocolError},
};
use serde::Serialize;
use serde_json::Value;

use crate::v16::cp::{core::ChargePointCore, OcppError};

/// Actions the charge point initiates.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallAction {
    BootNotification,
    Heartbeat,
    Authorize,
    StatusNotification,
    StartTransaction,
    MeterValues,
    StopTransaction,
    DiagnosticsStatusNotification,
    FirmwareStatusNotification,
    DataTransfer,
}

impl std::fmt::Display for CallAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CallAction::BootNotification => "BootNotification",
            CallAction::Heartbeat => "Heartbeat",
            CallAction::Authorize => "Authorize",
            CallAction::StatusNotification => "StatusNotification",
            CallAction::StartTransaction => "StartTransaction",
            CallAction::MeterValues => "MeterValues",
            CallAction::StopTransaction => "StopTransaction",
            CallAction::DiagnosticsStatusNotification => "DiagnosticsStatusNotification",
            CallAction::FirmwareStatusNotification => "FirmwareStatusNotification",
            CallAction::DataTransfer => "DataTransfer",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingCall {
    pub action: CallAction,
    pub payload: Value,
}

/// Outstanding Calls keyed by correlation id. Each entry is resolved at most once.
#[derive(Debug, Default)]
pub(crate) struct CallRegistry {
    pending: BTreeMap<String, PendingCall>,
}

impl CallRegistry {
    pub fn contains(&self, unique_id: &str) -> bool {
        self.pending.contains_key(unique_id)
    }

    pub fn register(&mut self, unique_id: String, call: PendingCall) {
        self.pending.insert(unique_id, call);
    }

    pub fn resolve(&mut self, unique_id: &str) -> Option<PendingCall> {
        self.pending.remove(unique_id)
    }

    pub fn drain(&mut self) -> Vec<(String, PendingCall)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.pending.keys()
    }
}

impl ChargePointCore {
    fn fresh_unique_id(&mut self) -> String {
        loop {
            let unique_id = self.get_uuid();
            if !self.registry.contains(&unique_id) {
                return unique_id;
            }
        }
    }

    pub(crate) fn send_call<T: Serialize>(&mut self, action: CallAction, payload: T) -> String {
        let call = Call::new(self.fresh_unique_id(), action.to_string(), payload);
        if self.ws_connected {
            self.registry.register(
                call.unique_id.clone(),
                PendingCall {
                    action,
                    payload: call.payload.clone(),
                },
            );
        }
        self.send_ws_msg(call.encode());
        call.unique_id
    }

    pub(crate) fn send_result<T: Serialize>(&mut self, unique_id: String, payload: T) {
        let res = CallResult::new(unique_id, payload);
        self.send_ws_msg(res.encode());
    }

    pub(crate) fn send_error(&mut self, unique_id: String, code: ProtocolError, description: &str) {
        let err = CallError::new(unique_id, code).with_description(description);
        self.send_ws_msg(err.encode());
    }

    pub(crate) fn on_outgoing_offline(&mut self) {
        for (unique_id, call) in self.registry.drain() {
            log::debug!("abandoning {} ({}), connection closed", unique_id, call.action);
            self.dispatch_response(unique_id, call, Err(OcppError::Other(GenericError::Offline)));
        }
    }

    pub(crate) fn handle_call_response(&mut self, res: CallResponse<ProtocolError>) {
        let unique_id = res.unique_id().to_string();
        let Some(call) = self.registry.resolve(&unique_id) else {
            log::error!("reply {} has no pending operation, skipping", unique_id);
            return;
        };
        log::info!("central system answered {} ({})", unique_id, call.action);
        let reply = match res {
            CallResponse::CallResult(result) => Ok(result.payload),
            CallResponse::CallError(err) => {
                log::warn!(
                    "{} rejected with {}: {}",
                    call.action,
                    err.error_code,
                    err.error_description
                );
                Err(OcppError::Protocol(err.error_code))
            }
        };
        self.dispatch_response(unique_id, call, reply);
    }

    /// A reply frame for `unique_id` that could not be decoded still settles its pending operation.
    pub(crate) fn handle_malformed_response(&mut self, unique_id: String) {
        let Some(call) = self.registry.resolve(&unique_id) else {
            log::error!("malformed reply {} has no pending operation, skipping", unique_id);
            return;
        };
        log::warn!("malformed reply to {} ({})", unique_id, call.action);
        self.dispatch_response(unique_id, call, Err(OcppError::Other(GenericError::ParsingError)));
    }

    fn parse_response<T: serde::de::DeserializeOwned>(res: Result<Value, OcppError>) -> Result<T, OcppError> {
        res.and_then(|payload| {
            serde_json::from_value::<T>(payload).map_err(|_| OcppError::Other(GenericError::ParsingError))
        })
    }

    fn dispatch_response(&mut self, unique_id: String, call: PendingCall, res: Result<Value, OcppError>) {
        match call.action {
            CallAction::BootNotification => self.boot_notification_response(Self::parse_response(res)),
            CallAction::Heartbeat => self.heartbeat_response(Self::parse_response(res)),
            CallAction::Authorize => self.authorize_response(unique_id, Self::parse_response(res)),
            CallAction::StatusNotification => self.status_notification_response(Self::parse_response(res)),
            CallAction::StartTransaction => match serde_json::from_value::<StartTransactionRequest>(call.payload) {
                Ok(req) => self.start_transaction_response(unique_id, req, Self::parse_response(res)),
                Err(e) => log::error!("stored StartTransaction payload unreadable: {}", e),
            },
            CallAction::MeterValues => self.meter_values_response(Self::parse_response(res)),
            CallAction::StopTransaction => self.stop_transaction_response(Self::parse_response(res)),
            CallAction::DiagnosticsStatusNotification => {
                self.diagnostics_status_notification_response(Self::parse_response(res))
            }
            CallAction::FirmwareStatusNotification => {
                self.firmware_status_notification_response(Self::parse_response(res))
            }
            CallAction::DataTransfer => self.data_transfer_response(Self::parse_response(res)),
        }
    }
}
