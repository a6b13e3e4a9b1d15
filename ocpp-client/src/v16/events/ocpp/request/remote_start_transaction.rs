use std::time::Duration;

use cpsim_core::v16::{
    messages::remote_start_transaction::{
        RemoteStartTransactionRequest, RemoteStartTransactionResponse,
    },
    types::RemoteStartStopStatus,
};

use crate::v16::{
    cp::core::ChargePointCore,
    state_machine::{
        decision::PendingDecision,
        schedule::{Step, Workflow},
        transaction::SessionOrigin,
    },
};

const REMOTE_START_DELAY: Duration = Duration::from_millis(500);

impl ChargePointCore {
    fn reply_remote_start(&mut self, unique_id: String, status: RemoteStartStopStatus) {
        self.send_result(unique_id, RemoteStartTransactionResponse { status });
    }

    pub(crate) fn remote_start_transaction_ocpp(
        &mut self,
        unique_id: String,
        req: RemoteStartTransactionRequest,
    ) {
        let connector_id = req.connector_id.unwrap_or(self.default_connector_id);
        let free = self
            .connector_index(connector_id)
            .is_some_and(|idx| self.sessions[idx].is_none());
        if !free {
            log::warn!("RemoteStartTransaction: connector {} unavailable", connector_id);
            self.reply_remote_start(unique_id, RemoteStartStopStatus::Rejected);
            return;
        }
        self.ask(PendingDecision::RemoteStart {
            unique_id,
            connector_id,
            id_tag: req.id_tag,
        });
    }

    pub(crate) fn remote_start_decided(
        &mut self,
        unique_id: String,
        connector_id: usize,
        id_tag: String,
        accepted: bool,
    ) {
        if !accepted {
            self.reply_remote_start(unique_id, RemoteStartStopStatus::Rejected);
            return;
        }
        self.reply_remote_start(unique_id, RemoteStartStopStatus::Accepted);
        self.schedule(
            Workflow::Dispatcher,
            REMOTE_START_DELAY,
            Step::RemoteStart {
                connector_id,
                id_tag,
            },
        );
    }

    pub(crate) fn continue_remote_start(&mut self, connector_id: usize, id_tag: String) {
        if self.configs.authorize_remote_tx_requests.value {
            self.send_authorize(id_tag, connector_id, SessionOrigin::Remote);
        } else if let Err(e) = self.start_session(id_tag, connector_id, SessionOrigin::Remote) {
            log::warn!("remote start not carried out: {}", e);
        }
    }
}
