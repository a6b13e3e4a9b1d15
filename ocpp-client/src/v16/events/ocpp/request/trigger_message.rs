use std::time::Duration;

use cpsim_core::v16::{
    messages::trigger_message::{TriggerMessageRequest, TriggerMessageResponse},
    types::{MessageTrigger, TriggerMessageStatus},
};

use crate::v16::{
    cp::core::ChargePointCore,
    state_machine::schedule::{Step, Workflow},
};

const TRIGGER_DELAY: Duration = Duration::from_secs(1);

impl ChargePointCore {
    pub(crate) fn trigger_message_ocpp(&mut self, unique_id: String, req: TriggerMessageRequest) {
        let step = match req.requested_message {
            MessageTrigger::Heartbeat => Some(Step::TriggerHeartbeat),
            MessageTrigger::StatusNotification => match req.connector_id {
                None | Some(0) => Some(Step::TriggerStatus(None)),
                Some(id) if self.connector_index(id).is_some() => Some(Step::TriggerStatus(Some(id))),
                Some(id) => {
                    log::warn!("TriggerMessage for unknown connector {}", id);
                    self.send_result(
                        unique_id,
                        TriggerMessageResponse {
                            status: TriggerMessageStatus::Rejected,
                        },
                    );
                    return;
                }
            },
            _ => None,
        };
        let status = match step {
            Some(_) => TriggerMessageStatus::Accepted,
            None => TriggerMessageStatus::NotImplemented,
        };
        self.send_result(unique_id, TriggerMessageResponse { status });
        if let Some(step) = step {
            self.schedule(Workflow::Dispatcher, TRIGGER_DELAY, step);
        }
    }
}
