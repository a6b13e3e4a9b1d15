use cpsim_core::v16::messages::boot_notification::BootNotificationRequest;

use crate::v16::state_machine::{meter::MeterDataType, signed::SignedMeterFormat};

use super::error::ConfigError;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ChargePointConfig {
    pub cms_url: String,
    pub seed: u64,
    pub boot_info: BootNotificationRequest,
    pub number_of_connectors: usize,
    /// Seconds between heartbeats, 0 disables them.
    pub heartbeat_interval: u64,
    /// Seconds between MeterValues of a running transaction, 0 disables them.
    pub meter_value_sample_interval: u64,
    pub meter_values_sampled_data: Vec<MeterDataType>,
    pub authorize_remote_tx_requests: bool,
    /// Connector used when a command or the self-test names none.
    pub default_connector_id: usize,
    /// Pre-set authorization tag. When present the self-test runs after every connect.
    pub id_tag: Option<String>,
    pub charging_seconds: Option<u64>,
    pub signed_meter_values: bool,
    pub signed_meter_format: SignedMeterFormat,
    pub plug_type: String,
    /// Vendor id for parking spot occupancy reports, `None` disables them.
    pub parking_vendor_id: Option<String>,
}

impl Default for ChargePointConfig {
    fn default() -> Self {
        Self {
            cms_url: String::from("ws://localhost:9000/ocpp"),
            seed: 0,
            boot_info: BootNotificationRequest::default(),
            number_of_connectors: 1,
            heartbeat_interval: 300,
            meter_value_sample_interval: 5,
            meter_values_sampled_data: vec![MeterDataType::energy_register()],
            authorize_remote_tx_requests: false,
            default_connector_id: 1,
            id_tag: None,
            charging_seconds: None,
            signed_meter_values: false,
            signed_meter_format: SignedMeterFormat::Edl,
            plug_type: String::from("Type2"),
            parking_vendor_id: Some(String::from("com.wirelane")),
        }
    }
}

impl ChargePointConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_connectors == 0 {
            return Err(ConfigError::NoConnectors);
        }
        if self.default_connector_id == 0 || self.default_connector_id > self.number_of_connectors {
            return Err(ConfigError::DefaultConnectorOutOfRange {
                connector_id: self.default_connector_id,
                number_of_connectors: self.number_of_connectors,
            });
        }
        Ok(())
    }
}
