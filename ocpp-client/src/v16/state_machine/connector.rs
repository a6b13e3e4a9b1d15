use chrono::Utc;
use cpsim_core::v16::{
    messages::status_notification::StatusNotificationRequest,
    types::{ChargePointErrorCode, ChargePointStatus},
};

use crate::v16::cp::core::ChargePointCore;

use super::call::CallAction;

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorState {
    pub status: ChargePointStatus,
    pub info: String,
}

impl ConnectorState {
    pub(crate) fn available() -> Self {
        Self {
            status: ChargePointStatus::Available,
            info: status_info(ChargePointStatus::Available, ""),
        }
    }
}

fn status_info(status: ChargePointStatus, plug_type: &str) -> String {
    if status.is_plugged() {
        format!("Status Update -{}-", plug_type)
    } else {
        String::from("Status Update")
    }
}

impl ChargePointCore {
    /// Store index of a 1-based connector id. Connector 0 is never stored.
    pub(crate) fn connector_index(&self, connector_id: usize) -> Option<usize> {
        (1..=self.connectors.len())
            .contains(&connector_id)
            .then(|| connector_id - 1)
    }

    pub(crate) fn set_connector_status(&mut self, connector_id: usize, status: ChargePointStatus) {
        let Some(idx) = self.connector_index(connector_id) else {
            log::warn!("connector {} does not exist, status {:?} ignored", connector_id, status);
            return;
        };
        let info = status_info(status, &self.plug_type);
        log::debug!("connector {}: {:?} -> {:?}", connector_id, self.connectors[idx].status, status);
        self.connectors[idx] = ConnectorState { status, info };
    }

    /// Sends one StatusNotification for `connector_id`, or one per connector for `None`.
    pub(crate) fn status_notification(&mut self, connector_id: Option<usize>) {
        let targets: Vec<usize> = match connector_id {
            Some(id) if self.connector_index(id).is_some() => vec![id],
            Some(id) => {
                log::warn!("connector {} does not exist, no status to report", id);
                return;
            }
            None => (1..=self.connectors.len()).collect(),
        };
        for id in targets {
            let state = self.connectors[id - 1].clone();
            self.send_call(
                CallAction::StatusNotification,
                StatusNotificationRequest {
                    connector_id: id,
                    error_code: ChargePointErrorCode::NoError,
                    info: Some(state.info),
                    status: state.status,
                    timestamp: Some(Utc::now()),
                    vendor_id: None,
                    vendor_error_code: None,
                },
            );
        }
    }
}
