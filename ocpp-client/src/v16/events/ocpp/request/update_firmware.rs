use cpsim_core::v16::messages::update_firmware::{UpdateFirmwareRequest, UpdateFirmwareResponse};

use crate::v16::{cp::core::ChargePointCore, state_machine::decision::PendingDecision};

impl ChargePointCore {
    pub(crate) fn update_firmware_ocpp(&mut self, unique_id: String, req: UpdateFirmwareRequest) {
        log::info!("firmware update from {} requested for {}", req.location, req.retrieve_date);
        self.send_result(unique_id, UpdateFirmwareResponse {});
        self.ask(PendingDecision::UpdateFirmware);
    }
}
