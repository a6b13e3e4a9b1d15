use std::time::Duration;

use cpsim_core::v16::{
    messages::reset::{ResetRequest, ResetResponse},
    types::ResetStatus,
};

use crate::v16::{
    cp::core::ChargePointCore,
    state_machine::{
        decision::PendingDecision,
        schedule::{Step, Workflow},
    },
};

const REBOOT_DELAY: Duration = Duration::from_secs(10);

impl ChargePointCore {
    pub(crate) fn reset_ocpp(&mut self, unique_id: String, req: ResetRequest) {
        log::info!("{:?} reset requested", req.kind);
        self.ask(PendingDecision::Reset { unique_id });
    }

    pub(crate) fn reset_decided(&mut self, unique_id: String, accepted: bool) {
        let status = if accepted {
            ResetStatus::Accepted
        } else {
            ResetStatus::Rejected
        };
        self.send_result(unique_id, ResetResponse { status });
        if accepted {
            self.cancel_workflow(Workflow::Reset);
            self.schedule(Workflow::Reset, REBOOT_DELAY, Step::Reboot);
        }
    }
}
