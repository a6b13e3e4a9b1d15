use chrono::Utc;
use cpsim_core::v16::{
    messages::authorize::AuthorizeRequest,
    types::{AuthorizationStatus, IdTagInfo},
};

use crate::v16::cp::{core::ChargePointCore, error::EngineError, OcppError};

use super::{call::CallAction, transaction::SessionOrigin};

/// Where a transaction goes once its Authorize is accepted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingAuthorization {
    pub connector_id: usize,
    pub id_tag: String,
    pub origin: SessionOrigin,
}

impl ChargePointCore {
    /// Sends Authorize for the whole charge point and remembers which connector should start.
    pub(crate) fn send_authorize(&mut self, id_tag: String, connector_id: usize, origin: SessionOrigin) {
        let unique_id = self.send_call(
            CallAction::Authorize,
            AuthorizeRequest {
                id_tag: id_tag.clone(),
                connector_id: Some(0),
                timestamp: Some(Utc::now()),
            },
        );
        if self.ws_connected {
            self.pending_authorizations.insert(
                unique_id,
                PendingAuthorization {
                    connector_id,
                    id_tag,
                    origin,
                },
            );
        }
    }

    pub(crate) fn authorization_rejected(&mut self, action: &'static str, origin: SessionOrigin, id_tag: String, status: AuthorizationStatus) {
        if origin == SessionOrigin::SelfTest {
            self.fatal(EngineError::SelfTestRejected {
                action,
                id_tag,
                status,
            });
        } else {
            log::warn!("{} for {} was not accepted: {:?}", action, id_tag, status);
        }
    }

    pub(crate) fn on_authorize_result(&mut self, unique_id: String, res: Result<IdTagInfo, OcppError>) {
        let Some(pending) = self.pending_authorizations.remove(&unique_id) else {
            log::warn!("Authorize {} has no waiting transaction", unique_id);
            return;
        };
        let info = match res {
            Ok(info) => info,
            Err(e) => {
                log::warn!("Authorize for {} failed: {}", pending.id_tag, e);
                return;
            }
        };
        if !info.is_accepted() {
            self.authorization_rejected("Authorize", pending.origin, pending.id_tag, info.status);
            return;
        }
        if let Err(e) = self.start_session(pending.id_tag, pending.connector_id, pending.origin) {
            log::warn!("authorized transaction not started: {}", e);
        }
    }
}
