use cpsim_core::v16::messages::get_diagnostics::{GetDiagnosticsRequest, GetDiagnosticsResponse};

use crate::v16::{cp::core::ChargePointCore, state_machine::decision::PendingDecision};

impl ChargePointCore {
    pub(crate) fn get_diagnostics_ocpp(&mut self, unique_id: String, req: GetDiagnosticsRequest) {
        log::info!("diagnostics upload to {} requested", req.location);
        self.send_result(unique_id, GetDiagnosticsResponse::default());
        self.ask(PendingDecision::GetDiagnostics);
    }
}
