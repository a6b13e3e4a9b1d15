//! Server-initiated actions understood by the charge point, decoded by action name.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::format::frame::Call;

use super::messages::{
    change_configuration::ChangeConfigurationRequest,
    clear_charging_profile::ClearChargingProfileRequest,
    get_composite_schedule::GetCompositeScheduleRequest,
    get_configuration::GetConfigurationRequest, get_diagnostics::GetDiagnosticsRequest,
    remote_start_transaction::RemoteStartTransactionRequest,
    remote_stop_transaction::RemoteStopTransactionRequest, reset::ResetRequest,
    set_charging_profile::SetChargingProfileRequest, trigger_message::TriggerMessageRequest,
    update_firmware::UpdateFirmwareRequest,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CentralSystemCall {
    ChangeConfiguration(ChangeConfigurationRequest),
    GetConfiguration(GetConfigurationRequest),
    TriggerMessage(TriggerMessageRequest),
    RemoteStartTransaction(RemoteStartTransactionRequest),
    RemoteStopTransaction(RemoteStopTransactionRequest),
    GetCompositeSchedule(GetCompositeScheduleRequest),
    SetChargingProfile(SetChargingProfileRequest),
    ClearChargingProfile(ClearChargingProfileRequest),
    Reset(ResetRequest),
    UpdateFirmware(UpdateFirmwareRequest),
    GetDiagnostics(GetDiagnosticsRequest),
}

#[derive(Debug)]
pub enum DecodeCallError {
    UnknownAction(String),
    InvalidPayload {
        action: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for DecodeCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeCallError::UnknownAction(action) => write!(f, "unknown action {action}"),
            DecodeCallError::InvalidPayload { action, source } => {
                write!(f, "invalid {action} payload: {source}")
            }
        }
    }
}

impl std::error::Error for DecodeCallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeCallError::UnknownAction(_) => None,
            DecodeCallError::InvalidPayload { source, .. } => Some(source),
        }
    }
}

fn payload<T: DeserializeOwned>(action: &str, value: &Value) -> Result<T, DecodeCallError> {
    T::deserialize(value).map_err(|source| DecodeCallError::InvalidPayload {
        action: action.to_string(),
        source,
    })
}

impl CentralSystemCall {
    pub fn decode(call: &Call) -> Result<Self, DecodeCallError> {
        let action = call.action.as_str();
        let p = &call.payload;
        Ok(match action {
            "ChangeConfiguration" => Self::ChangeConfiguration(payload(action, p)?),
            "GetConfiguration" => Self::GetConfiguration(payload(action, p)?),
            "TriggerMessage" => Self::TriggerMessage(payload(action, p)?),
            "RemoteStartTransaction" => Self::RemoteStartTransaction(payload(action, p)?),
            "RemoteStopTransaction" => Self::RemoteStopTransaction(payload(action, p)?),
            "GetCompositeSchedule" => Self::GetCompositeSchedule(payload(action, p)?),
            "SetChargingProfile" => Self::SetChargingProfile(payload(action, p)?),
            "ClearChargingProfile" => Self::ClearChargingProfile(payload(action, p)?),
            "Reset" => Self::Reset(payload(action, p)?),
            "UpdateFirmware" => Self::UpdateFirmware(payload(action, p)?),
            "GetDiagnostics" => Self::GetDiagnostics(payload(action, p)?),
            _ => return Err(DecodeCallError::UnknownAction(call.action.clone())),
        })
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::ChangeConfiguration(_) => "ChangeConfiguration",
            Self::GetConfiguration(_) => "GetConfiguration",
            Self::TriggerMessage(_) => "TriggerMessage",
            Self::RemoteStartTransaction(_) => "RemoteStartTransaction",
            Self::RemoteStopTransaction(_) => "RemoteStopTransaction",
            Self::GetCompositeSchedule(_) => "GetCompositeSchedule",
            Self::SetChargingProfile(_) => "SetChargingProfile",
            Self::ClearChargingProfile(_) => "ClearChargingProfile",
            Self::Reset(_) => "Reset",
            Self::UpdateFirmware(_) => "UpdateFirmware",
            Self::GetDiagnostics(_) => "GetDiagnostics",
        }
    }
}
