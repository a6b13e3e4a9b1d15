use cpsim_core::v16::messages::stop_transaction::StopTransactionResponse;

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn stop_transaction_response(&mut self, res: Result<StopTransactionResponse, OcppError>) {
        match res {
            Ok(StopTransactionResponse {
                id_tag_info: Some(info),
            }) if !info.is_accepted() => {
                log::warn!("StopTransaction id tag status {:?}", info.status)
            }
            Ok(_) => log::debug!("StopTransaction confirmed"),
            Err(e) => log::warn!("StopTransaction failed: {}", e),
        }
    }
}
