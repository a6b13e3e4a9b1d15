use cpsim_core::v16::messages::firmware_status_notification::FirmwareStatusNotificationResponse;

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn firmware_status_notification_response(&mut self, res: Result<FirmwareStatusNotificationResponse, OcppError>) {
        if let Err(e) = res {
            log::warn!("FirmwareStatusNotification failed: {}", e);
        }
    }
}
