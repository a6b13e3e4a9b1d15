use cpsim_core::v16::{messages::data_transfer::DataTransferResponse, types::DataTransferStatus};

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn data_transfer_response(&mut self, res: Result<DataTransferResponse, OcppError>) {
        match res {
            Ok(t) if t.status == DataTransferStatus::Accepted => {}
            Ok(t) => log::info!("DataTransfer answered {:?}", t.status),
            Err(e) => log::warn!("DataTransfer failed: {}", e),
        }
    }
}
