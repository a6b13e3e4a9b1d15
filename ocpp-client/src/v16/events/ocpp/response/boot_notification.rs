use cpsim_core::v16::messages::boot_notification::BootNotificationResponse;

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn boot_notification_response(&mut self, res: Result<BootNotificationResponse, OcppError>) {
        match res {
            Ok(t) => {
                log::info!(
                    "boot {:?} at {}, server interval {}s",
                    t.status,
                    t.current_time,
                    t.interval
                );
                self.registration_status = Some(t.status);
            }
            Err(e) => {
                log::warn!("BootNotification failed: {}", e);
            }
        }
    }
}
