use cpsim_core::v16::messages::authorize::AuthorizeResponse;

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn authorize_response(&mut self, unique_id: String, res: Result<AuthorizeResponse, OcppError>) {
        self.on_authorize_result(unique_id, res.map(|t| t.id_tag_info));
    }
}
