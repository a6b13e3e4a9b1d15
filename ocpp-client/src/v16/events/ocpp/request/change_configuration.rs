use cpsim_core::v16::{
    messages::change_configuration::{ChangeConfigurationRequest, ChangeConfigurationResponse},
    types::ConfigurationStatus,
};

use crate::v16::cp::core::ChargePointCore;

impl ChargePointCore {
    pub(crate) fn change_configuration_ocpp(&mut self, unique_id: String, req: ChangeConfigurationRequest) {
        let meter_interval = self.meter_interval();
        let status = self.configs.set(&req.key, req.value);
        log::info!("ChangeConfiguration {}: {:?}", req.key, status);
        self.send_result(unique_id, ChangeConfigurationResponse { status });
        if status != ConfigurationStatus::Accepted {
            return;
        }
        match req.key.as_str() {
            "HeartbeatInterval" => self.heartbeat_interval_changed(),
            "MeterValueSampleInterval" => self.meter_interval_changed(meter_interval),
            _ => {}
        }
    }
}
