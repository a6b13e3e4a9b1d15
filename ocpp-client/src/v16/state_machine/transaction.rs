use chrono::{DateTime, Utc};
use cpsim_core::v16::{
    messages::{
        start_transaction::StartTransactionRequest, stop_transaction::StopTransactionRequest,
    },
    types::{ChargePointStatus, Reason},
};

use crate::v16::{
    cp::{core::ChargePointCore, error::TransactionError},
    drivers::timers::TimerId,
};

use super::{call::CallAction, meter::METER_STEP_WH, parking::ParkingSpot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// StartTransaction sent, transaction id not yet assigned.
    PendingStart,
    /// Transaction id known, metering running.
    Active,
}

/// Who asked for the transaction. A rejected self-test transaction is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Local,
    Remote,
    SelfTest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSession {
    pub transaction_id: Option<i32>,
    pub connector_id: usize,
    pub id_tag: String,
    pub meter_start: u64,
    pub meter_current: u64,
    pub started_at: DateTime<Utc>,
    pub phase: SessionPhase,
    pub origin: SessionOrigin,
    pub(crate) start_unique_id: String,
}

impl ChargePointCore {
    pub(crate) fn start_session(
        &mut self,
        id_tag: String,
        connector_id: usize,
        origin: SessionOrigin,
    ) -> Result<(), TransactionError> {
        let idx = self
            .connector_index(connector_id)
            .ok_or(TransactionError::UnknownConnector(connector_id))?;
        if self.sessions[idx].is_some() {
            return Err(TransactionError::ConnectorOccupied(connector_id));
        }
        if !self.ws_connected {
            return Err(TransactionError::Offline);
        }
        let meter_start = self.meter_registers[idx];
        let started_at = Utc::now();
        self.send_parking_spot(connector_id, ParkingSpot::Occupied);
        let start_unique_id = self.send_call(
            CallAction::StartTransaction,
            StartTransactionRequest {
                connector_id,
                id_tag: id_tag.clone(),
                meter_start,
                reservation_id: None,
                timestamp: started_at,
            },
        );
        self.sessions[idx] = Some(TransactionSession {
            transaction_id: None,
            connector_id,
            id_tag,
            meter_start,
            meter_current: meter_start,
            started_at,
            phase: SessionPhase::PendingStart,
            origin,
            start_unique_id,
        });
        self.set_connector_status(connector_id, ChargePointStatus::Charging);
        self.status_notification(Some(connector_id));
        Ok(())
    }

    /// Records the server-assigned id and starts metering.
    pub(crate) fn activate_session(&mut self, connector_id: usize, unique_id: &str, transaction_id: i32) {
        let Some(idx) = self.connector_index(connector_id) else {
            return;
        };
        let session = self.sessions[idx]
            .as_mut()
            .filter(|s| s.phase == SessionPhase::PendingStart && s.start_unique_id == unique_id);
        let Some(session) = session else {
            log::warn!(
                "StartTransaction {} no longer matches a pending session on connector {}",
                unique_id,
                connector_id
            );
            return;
        };
        session.transaction_id = Some(transaction_id);
        session.phase = SessionPhase::Active;
        log::info!("transaction {} running on connector {}", transaction_id, connector_id);
        self.arm_meter_sampling(connector_id);
    }

    /// Drops a pending session whose StartTransaction was not confirmed. The connector keeps its status.
    pub(crate) fn abandon_session(&mut self, connector_id: usize, unique_id: &str) -> Option<TransactionSession> {
        let idx = self.connector_index(connector_id)?;
        let pending = matches!(
            &self.sessions[idx],
            Some(session) if session.phase == SessionPhase::PendingStart && session.start_unique_id == unique_id
        );
        if pending {
            self.sessions[idx].take()
        } else {
            None
        }
    }

    /// Stops the transaction on `connector_id`. Without a running transaction this only proceeds
    /// when `transaction_id_override` names the transaction to stop.
    pub(crate) fn stop_session(
        &mut self,
        connector_id: usize,
        id_tag: Option<String>,
        transaction_id_override: Option<i32>,
        reason: Reason,
    ) -> bool {
        let Some(idx) = self.connector_index(connector_id) else {
            log::warn!("connector {} does not exist, nothing to stop", connector_id);
            return false;
        };
        let active = self.sessions[idx]
            .as_ref()
            .filter(|s| s.phase == SessionPhase::Active)
            .cloned();
        let (transaction_id, begin, id_tag) = match (active, transaction_id_override) {
            (Some(session), _) => (
                session.transaction_id.or(transaction_id_override),
                Some((session.started_at, session.meter_start)),
                id_tag.or(Some(session.id_tag)),
            ),
            (None, Some(tx)) => {
                log::warn!(
                    "no running transaction on connector {}, stopping transaction {} anyway",
                    connector_id,
                    tx
                );
                (Some(tx), None, id_tag)
            }
            (None, None) => {
                log::warn!("no running transaction on connector {}", connector_id);
                return false;
            }
        };
        let Some(transaction_id) = transaction_id else {
            return false;
        };

        self.remove_timeout(TimerId::MeterSampled(connector_id));
        let meter_stop = self.meter_registers[idx] + METER_STEP_WH;
        self.meter_registers[idx] = meter_stop;
        let timestamp = Utc::now();
        let begin = begin.unwrap_or((timestamp, self.meter_registers[idx] - METER_STEP_WH));
        let transaction_data = self.signed_transaction_data(begin, (timestamp, meter_stop));

        self.send_call(
            CallAction::StopTransaction,
            StopTransactionRequest {
                id_tag,
                meter_stop,
                timestamp,
                transaction_id,
                reason: Some(reason),
                transaction_data,
            },
        );
        self.sessions[idx] = None;
        self.set_connector_status(connector_id, ChargePointStatus::Available);
        self.status_notification(Some(connector_id));
        self.send_parking_spot(connector_id, ParkingSpot::Free);
        true
    }

    pub(crate) fn connector_for_transaction(&self, transaction_id: i32) -> Option<usize> {
        self.sessions
            .iter()
            .flatten()
            .find(|s| s.transaction_id == Some(transaction_id))
            .map(|s| s.connector_id)
    }
}
