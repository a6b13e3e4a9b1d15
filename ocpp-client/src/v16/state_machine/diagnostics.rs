use std::time::Duration;

use cpsim_core::v16::{
    messages::diagnostics_status_notification::DiagnosticsStatusNotificationRequest,
    types::DiagnosticsStatus,
};

use crate::v16::cp::core::ChargePointCore;

use super::{
    call::CallAction,
    schedule::{Step, Workflow},
};

const UPLOADING_AFTER: Duration = Duration::from_secs(1);
const OUTCOME_AFTER: Duration = Duration::from_secs(3);

impl ChargePointCore {
    pub(crate) fn send_diagnostics_status_notification(&mut self, status: DiagnosticsStatus) {
        self.send_call(
            CallAction::DiagnosticsStatusNotification,
            DiagnosticsStatusNotificationRequest { status },
        );
    }

    pub(crate) fn start_diagnostics_upload(&mut self, succeed: bool) {
        self.cancel_workflow(Workflow::Diagnostics);
        let outcome = if succeed {
            DiagnosticsStatus::Uploaded
        } else {
            DiagnosticsStatus::UploadFailed
        };
        self.schedule(
            Workflow::Diagnostics,
            UPLOADING_AFTER,
            Step::Diagnostics(DiagnosticsStatus::Uploading),
        );
        self.schedule(Workflow::Diagnostics, OUTCOME_AFTER, Step::Diagnostics(outcome));
    }
}
