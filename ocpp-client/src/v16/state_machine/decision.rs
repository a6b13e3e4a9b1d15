use crate::v16::{
    cp::core::ChargePointCore,
    drivers::decision::{DecisionTicket, Prompt},
};

/// A server command parked until the decision provider answers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingDecision {
    RemoteStart {
        unique_id: String,
        connector_id: usize,
        id_tag: String,
    },
    RemoteStop {
        unique_id: String,
        connector_id: usize,
        transaction_id: i32,
    },
    GetCompositeSchedule {
        unique_id: String,
        connector_id: i32,
    },
    SetChargingProfile {
        unique_id: String,
    },
    ClearChargingProfile {
        unique_id: String,
    },
    Reset {
        unique_id: String,
    },
    UpdateFirmware,
    GetDiagnostics,
}

impl PendingDecision {
    pub fn prompt(&self) -> Prompt {
        match self {
            PendingDecision::RemoteStart { .. } => Prompt::RemoteStart,
            PendingDecision::RemoteStop { .. } => Prompt::RemoteStop,
            PendingDecision::GetCompositeSchedule { .. } => Prompt::GetCompositeSchedule,
            PendingDecision::SetChargingProfile { .. } => Prompt::SetChargingProfile,
            PendingDecision::ClearChargingProfile { .. } => Prompt::ClearChargingProfile,
            PendingDecision::Reset { .. } => Prompt::Reset,
            PendingDecision::UpdateFirmware => Prompt::UpdateFirmware,
            PendingDecision::GetDiagnostics => Prompt::GetDiagnostics,
        }
    }
}

impl ChargePointCore {
    pub(crate) fn ask(&mut self, pending: PendingDecision) {
        self.next_ticket += 1;
        let ticket: DecisionTicket = self.next_ticket;
        let prompt = pending.prompt();
        log::debug!("asking {:?} as ticket {}", prompt, ticket);
        self.decisions.insert(ticket, pending);
        self.ask_decision(ticket, prompt);
    }

    pub(crate) fn take_decision(&mut self, ticket: DecisionTicket) -> Option<PendingDecision> {
        self.decisions.remove(&ticket)
    }

    pub(crate) fn clear_decisions(&mut self) {
        if !self.decisions.is_empty() {
            log::debug!("discarding {} unanswered decisions", self.decisions.len());
        }
        self.decisions.clear();
        self.pending_authorizations.clear();
    }
}
