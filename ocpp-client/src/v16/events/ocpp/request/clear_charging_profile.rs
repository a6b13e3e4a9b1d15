use cpsim_core::v16::{
    messages::clear_charging_profile::{ClearChargingProfileRequest, ClearChargingProfileResponse},
    types::ClearChargingProfileStatus,
};

use crate::v16::{cp::core::ChargePointCore, state_machine::decision::PendingDecision};

impl ChargePointCore {
    pub(crate) fn clear_charging_profile_ocpp(&mut self, unique_id: String, _req: ClearChargingProfileRequest) {
        self.ask(PendingDecision::ClearChargingProfile { unique_id });
    }

    pub(crate) fn clear_charging_profile_decided(&mut self, unique_id: String, accepted: bool) {
        let status = if accepted {
            ClearChargingProfileStatus::Accepted
        } else {
            ClearChargingProfileStatus::Unknown
        };
        self.send_result(unique_id, ClearChargingProfileResponse { status });
    }
}
