use crate::v16::{
    cp::core::ChargePointCore,
    drivers::decision::{DecisionTicket, Verdict},
    state_machine::decision::PendingDecision,
};

impl ChargePointCore {
    pub(crate) fn handle_verdict_helper(&mut self, ticket: DecisionTicket, verdict: Verdict) {
        let Some(pending) = self.take_decision(ticket) else {
            log::warn!("verdict for unknown ticket {}, ignoring", ticket);
            return;
        };
        let accepted = verdict.accepted();
        log::info!("{} {}", pending.prompt().name(), if accepted { "accepted" } else { "rejected" });
        match pending {
            PendingDecision::RemoteStart {
                unique_id,
                connector_id,
                id_tag,
            } => self.remote_start_decided(unique_id, connector_id, id_tag, accepted),
            PendingDecision::RemoteStop {
                unique_id,
                connector_id,
                transaction_id,
            } => self.remote_stop_decided(unique_id, connector_id, transaction_id, accepted),
            PendingDecision::GetCompositeSchedule {
                unique_id,
                connector_id,
            } => self.get_composite_schedule_decided(unique_id, connector_id, accepted),
            PendingDecision::SetChargingProfile { unique_id } => {
                self.set_charging_profile_decided(unique_id, accepted)
            }
            PendingDecision::ClearChargingProfile { unique_id } => {
                self.clear_charging_profile_decided(unique_id, accepted)
            }
            PendingDecision::Reset { unique_id } => self.reset_decided(unique_id, accepted),
            PendingDecision::UpdateFirmware => self.start_firmware_update(accepted),
            PendingDecision::GetDiagnostics => self.start_diagnostics_upload(accepted),
        }
    }
}
