use std::time::Duration;

use cpsim_core::v16::{
    messages::remote_stop_transaction::{RemoteStopTransactionRequest, RemoteStopTransactionResponse},
    types::{Reason, RemoteStartStopStatus},
};

use crate::v16::{
    cp::core::ChargePointCore,
    state_machine::{
        decision::PendingDecision,
        schedule::{Step, Workflow},
    },
};

const REMOTE_STOP_DELAY: Duration = Duration::from_millis(500);

impl ChargePointCore {
    pub(crate) fn remote_stop_transaction_ocpp(
        &mut self,
        unique_id: String,
        req: RemoteStopTransactionRequest,
    ) {
        let connector_id = self
            .connector_for_transaction(req.transaction_id)
            .unwrap_or(self.default_connector_id);
        self.ask(PendingDecision::RemoteStop {
            unique_id,
            connector_id,
            transaction_id: req.transaction_id,
        });
    }

    pub(crate) fn remote_stop_decided(
        &mut self,
        unique_id: String,
        connector_id: usize,
        transaction_id: i32,
        accepted: bool,
    ) {
        let status = if accepted {
            RemoteStartStopStatus::Accepted
        } else {
            RemoteStartStopStatus::Rejected
        };
        self.send_result(unique_id, RemoteStopTransactionResponse { status });
        if accepted {
            self.schedule(
                Workflow::Dispatcher,
                REMOTE_STOP_DELAY,
                Step::RemoteStop {
                    connector_id,
                    transaction_id,
                },
            );
        }
    }

    pub(crate) fn continue_remote_stop(&mut self, connector_id: usize, transaction_id: i32) {
        let id_tag = self.id_tag.clone();
        self.stop_session(connector_id, id_tag, Some(transaction_id), Reason::Remote);
    }
}
