use cpsim_core::v16::messages::diagnostics_status_notification::DiagnosticsStatusNotificationResponse;

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn diagnostics_status_notification_response(&mut self, res: Result<DiagnosticsStatusNotificationResponse, OcppError>) {
        if let Err(e) = res {
            log::warn!("DiagnosticsStatusNotification failed: {}", e);
        }
    }
}
