use std::time::Duration;

use cpsim_core::v16::{
    messages::firmware_status_notification::FirmwareStatusNotificationRequest,
    types::FirmwareStatus,
};

use crate::v16::cp::core::ChargePointCore;

use super::{
    call::CallAction,
    schedule::{Step, Workflow},
};

/// Offsets from workflow start. The BootNotification between Installing and Installed is the reboot into the new image.
const SUCCESS_STEPS: [(u64, Option<FirmwareStatus>); 5] = [
    (1, Some(FirmwareStatus::Downloading)),
    (3, Some(FirmwareStatus::Downloaded)),
    (5, Some(FirmwareStatus::Installing)),
    (7, None),
    (9, Some(FirmwareStatus::Installed)),
];

const FAILURE_STEPS: [(u64, FirmwareStatus); 2] = [
    (1, FirmwareStatus::Downloading),
    (3, FirmwareStatus::DownloadFailed),
];

impl ChargePointCore {
    pub(crate) fn send_firmware_status_notification(&mut self, status: FirmwareStatus) {
        self.send_call(
            CallAction::FirmwareStatusNotification,
            FirmwareStatusNotificationRequest { status },
        );
    }

    /// Schedules the firmware notification sequence, replacing one already in flight.
    pub(crate) fn start_firmware_update(&mut self, succeed: bool) {
        self.cancel_workflow(Workflow::Firmware);
        if succeed {
            for (secs, status) in SUCCESS_STEPS {
                let step = match status {
                    Some(status) => Step::Firmware(status),
                    None => Step::Reboot,
                };
                self.schedule(Workflow::Firmware, Duration::from_secs(secs), step);
            }
        } else {
            for (secs, status) in FAILURE_STEPS {
                self.schedule(Workflow::Firmware, Duration::from_secs(secs), Step::Firmware(status));
            }
        }
    }
}
