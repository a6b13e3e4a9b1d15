use cpsim_core::v16::messages::start_transaction::{StartTransactionRequest, StartTransactionResponse};

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn start_transaction_response(
        &mut self,
        unique_id: String,
        req: StartTransactionRequest,
        res: Result<StartTransactionResponse, OcppError>,
    ) {
        let connector_id = req.connector_id;
        match res {
            Ok(t) if t.id_tag_info.is_accepted() => {
                self.activate_session(connector_id, &unique_id, t.transaction_id);
            }
            Ok(t) => {
                log::warn!(
                    "StartTransaction was not confirmed: {:?}, transaction {}",
                    t.id_tag_info.status,
                    t.transaction_id
                );
                if let Some(session) = self.abandon_session(connector_id, &unique_id) {
                    self.authorization_rejected(
                        "StartTransaction",
                        session.origin,
                        session.id_tag,
                        t.id_tag_info.status,
                    );
                }
            }
            Err(e) => {
                log::warn!("StartTransaction on connector {} failed: {}", connector_id, e);
                self.abandon_session(connector_id, &unique_id);
            }
        }
    }
}
