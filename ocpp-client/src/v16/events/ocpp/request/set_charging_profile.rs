use cpsim_core::v16::{
    messages::set_charging_profile::{SetChargingProfileRequest, SetChargingProfileResponse},
    types::ChargingProfileStatus,
};

use crate::v16::{cp::core::ChargePointCore, state_machine::decision::PendingDecision};

impl ChargePointCore {
    pub(crate) fn set_charging_profile_ocpp(&mut self, unique_id: String, req: SetChargingProfileRequest) {
        log::debug!(
            "SetChargingProfile {} for connector {}",
            req.cs_charging_profiles.charging_profile_id,
            req.connector_id
        );
        self.ask(PendingDecision::SetChargingProfile { unique_id });
    }

    pub(crate) fn set_charging_profile_decided(&mut self, unique_id: String, accepted: bool) {
        let status = if accepted {
            ChargingProfileStatus::Accepted
        } else {
            ChargingProfileStatus::Rejected
        };
        self.send_result(unique_id, SetChargingProfileResponse { status });
    }
}
