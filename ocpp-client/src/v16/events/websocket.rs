use cpsim_core::{
    format::{
        frame::Call,
        message::{OcppMessage, CALL, CALL_ERROR, CALL_RESULT},
    },
    v16::{
        call::{CentralSystemCall, DecodeCallError},
        protocol_error::ProtocolError,
    },
};

use crate::v16::cp::core::ChargePointCore;

impl ChargePointCore {
    pub(crate) fn ws_connected_helper(&mut self) {
        self.ws_connected = true;
        self.on_boot_connected();
    }

    pub(crate) fn ws_disconnected_helper(&mut self, code: u16, reason: &str) {
        log::warn!("connection closed, reason: {} ({})", reason, code);
        self.ws_connected = false;
        self.on_boot_disconnected();
    }

    pub(crate) fn ws_error_helper(&mut self, err: &str) {
        log::error!("connection error ({}): {}", self.cms_url, err);
    }

    pub(crate) fn got_ws_msg_helper(&mut self, msg: &str) {
        match OcppMessage::<ProtocolError>::decode(msg) {
            OcppMessage::Call(call) => self.handle_call(call),
            OcppMessage::CallResponse(res) => self.handle_call_response(res),
            OcppMessage::Invalid(invalid) => {
                log::error!("undecodable frame {}: {}", invalid.message, invalid.err_msg);
                match (invalid.message_type_id, invalid.unique_id) {
                    (Some(CALL), Some(unique_id)) => {
                        self.send_error(unique_id, ProtocolError::FormationViolation, &invalid.err_msg);
                    }
                    (Some(CALL_RESULT | CALL_ERROR), Some(unique_id)) => {
                        self.handle_malformed_response(unique_id);
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_call(&mut self, call: Call) {
        let unique_id = call.unique_id.clone();
        let request = match CentralSystemCall::decode(&call) {
            Ok(request) => request,
            Err(DecodeCallError::UnknownAction(action)) => {
                log::info!("Unknown action: {}", action);
                return;
            }
            Err(e @ DecodeCallError::InvalidPayload { .. }) => {
                log::warn!("{}", e);
                self.send_error(unique_id, ProtocolError::FormationViolation, &e.to_string());
                return;
            }
        };
        log::info!("received {} with id {}", request.action(), unique_id);
        match request {
            CentralSystemCall::ChangeConfiguration(req) => self.change_configuration_ocpp(unique_id, req),
            CentralSystemCall::GetConfiguration(req) => self.get_configuration_ocpp(unique_id, req),
            CentralSystemCall::TriggerMessage(req) => self.trigger_message_ocpp(unique_id, req),
            CentralSystemCall::RemoteStartTransaction(req) => {
                self.remote_start_transaction_ocpp(unique_id, req)
            }
            CentralSystemCall::RemoteStopTransaction(req) => {
                self.remote_stop_transaction_ocpp(unique_id, req)
            }
            CentralSystemCall::GetCompositeSchedule(req) => {
                self.get_composite_schedule_ocpp(unique_id, req)
            }
            CentralSystemCall::SetChargingProfile(req) => self.set_charging_profile_ocpp(unique_id, req),
            CentralSystemCall::ClearChargingProfile(req) => {
                self.clear_charging_profile_ocpp(unique_id, req)
            }
            CentralSystemCall::Reset(req) => self.reset_ocpp(unique_id, req),
            CentralSystemCall::UpdateFirmware(req) => self.update_firmware_ocpp(unique_id, req),
            CentralSystemCall::GetDiagnostics(req) => self.get_diagnostics_ocpp(unique_id, req),
        }
    }
}
