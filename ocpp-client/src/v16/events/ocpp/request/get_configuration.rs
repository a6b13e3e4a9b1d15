use cpsim_core::v16::messages::get_configuration::{GetConfigurationRequest, GetConfigurationResponse};

use crate::v16::cp::core::ChargePointCore;

impl ChargePointCore {
    pub(crate) fn get_configuration_ocpp(&mut self, unique_id: String, req: GetConfigurationRequest) {
        let (known, unknown) = self.configs.get_many(req.key);
        if !unknown.is_empty() {
            log::info!("GetConfiguration: unknown keys {:?}", unknown);
        }
        self.send_result(
            unique_id,
            GetConfigurationResponse {
                configuration_key: Some(known),
                unknown_key: Some(unknown),
            },
        );
    }
}
