use std::collections::{BTreeMap, VecDeque};

use cpsim_core::v16::{
    messages::boot_notification::BootNotificationRequest,
    types::{ChargePointStatus, ConfigurationStatus, KeyValue, Reason, RegistrationStatus},
};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

use crate::v16::{
    drivers::{
        decision::{DecisionTicket, Verdict},
        timers::TimerId,
    },
    state_machine::{
        actions::CoreActions,
        auth::PendingAuthorization,
        call::{CallAction, CallRegistry},
        config::OcppConfigs,
        connector::ConnectorState,
        decision::PendingDecision,
        heartbeat::HeartbeatState,
        meter::METER_START_WH,
        schedule::TaskTable,
        signed::SignedMeterFormat,
        transaction::{SessionOrigin, TransactionSession},
    },
};

use super::{
    config::ChargePointConfig,
    error::{ConfigError, TransactionError},
};

/// Protocol session engine for one charge point.
///
/// Every event method returns the side effects it produced, in the order they must be executed.
pub struct ChargePointCore {
    pub(crate) rng: SmallRng,
    pub(crate) cms_url: String,
    pub(crate) boot_info: BootNotificationRequest,
    pub(crate) plug_type: String,
    pub(crate) default_connector_id: usize,
    pub(crate) id_tag: Option<String>,
    pub(crate) charging_seconds: Option<u64>,
    pub(crate) signed_meter_format: Option<SignedMeterFormat>,
    pub(crate) parking_vendor_id: Option<String>,
    pub(crate) ws_connected: bool,
    pub(crate) queued_actions: VecDeque<CoreActions>,
    pub(crate) registry: CallRegistry,
    pub(crate) registration_status: Option<RegistrationStatus>,
    pub(crate) heartbeat_state: HeartbeatState,
    pub(crate) connectors: Vec<ConnectorState>,
    pub(crate) meter_registers: Vec<u64>,
    pub(crate) sessions: Vec<Option<TransactionSession>>,
    pub(crate) pending_authorizations: BTreeMap<String, PendingAuthorization>,
    pub(crate) tasks: TaskTable,
    pub(crate) decisions: BTreeMap<DecisionTicket, PendingDecision>,
    pub(crate) next_ticket: DecisionTicket,
    pub(crate) configs: OcppConfigs,
}

impl ChargePointCore {
    pub fn new(config: ChargePointConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let configs = OcppConfigs::build(&config);
        let num_connectors = config.number_of_connectors;
        Ok(Self {
            rng: SmallRng::seed_from_u64(config.seed),
            cms_url: config.cms_url,
            boot_info: config.boot_info,
            plug_type: config.plug_type,
            default_connector_id: config.default_connector_id,
            id_tag: config.id_tag,
            charging_seconds: config.charging_seconds,
            signed_meter_format: config
                .signed_meter_values
                .then_some(config.signed_meter_format),
            parking_vendor_id: config.parking_vendor_id,
            ws_connected: false,
            queued_actions: VecDeque::new(),
            registry: CallRegistry::default(),
            registration_status: None,
            heartbeat_state: HeartbeatState::Idle,
            connectors: vec![ConnectorState::available(); num_connectors],
            meter_registers: vec![METER_START_WH; num_connectors],
            sessions: vec![None; num_connectors],
            pending_authorizations: BTreeMap::new(),
            tasks: TaskTable::default(),
            decisions: BTreeMap::new(),
            next_ticket: 0,
            configs,
        })
    }

    /// Requests the transport connection.
    pub fn init(&mut self) -> Vec<CoreActions> {
        self.connect(self.cms_url.clone());
        self.drain_actions()
    }
    pub fn ws_connected(&mut self) -> Vec<CoreActions> {
        self.ws_connected_helper();
        self.drain_actions()
    }
    pub fn ws_disconnected(&mut self, code: u16, reason: &str) -> Vec<CoreActions> {
        self.ws_disconnected_helper(code, reason);
        self.drain_actions()
    }
    pub fn ws_error(&mut self, err: &str) -> Vec<CoreActions> {
        self.ws_error_helper(err);
        self.drain_actions()
    }
    pub fn got_ws_msg(&mut self, msg: &str) -> Vec<CoreActions> {
        self.got_ws_msg_helper(msg);
        self.drain_actions()
    }
    pub fn handle_timeout(&mut self, id: TimerId) -> Vec<CoreActions> {
        self.handle_timeout_helper(id);
        self.drain_actions()
    }
    pub fn handle_verdict(&mut self, ticket: DecisionTicket, verdict: Verdict) -> Vec<CoreActions> {
        self.handle_verdict_helper(ticket, verdict);
        self.drain_actions()
    }

    /// Starts a locally authorized transaction on `connector_id`.
    pub fn start_transaction(
        &mut self,
        id_tag: impl Into<String>,
        connector_id: usize,
    ) -> Result<Vec<CoreActions>, TransactionError> {
        self.start_session(id_tag.into(), connector_id, SessionOrigin::Local)?;
        Ok(self.drain_actions())
    }

    /// Stops the transaction on `connector_id`. Without a running transaction nothing is sent
    /// unless `transaction_id` names the transaction to stop.
    pub fn stop_transaction(
        &mut self,
        connector_id: usize,
        id_tag: Option<String>,
        transaction_id: Option<i32>,
    ) -> Vec<CoreActions> {
        self.stop_session(connector_id, id_tag, transaction_id, Reason::Local);
        self.drain_actions()
    }

    /// Sends an arbitrary charge point initiated Call and returns its correlation id.
    pub fn call<T: Serialize>(&mut self, action: CallAction, payload: T) -> (String, Vec<CoreActions>) {
        let unique_id = self.send_call(action, payload);
        (unique_id, self.drain_actions())
    }

    /// Local configuration change. A new HeartbeatInterval applies from the next heartbeat.
    pub fn change_configuration(&mut self, key: &str, value: impl Into<String>) -> ConfigurationStatus {
        self.configs.set(key, value.into())
    }

    pub fn configuration(&self, keys: Option<Vec<String>>) -> (Vec<KeyValue>, Vec<String>) {
        self.configs.get_many(keys)
    }

    pub fn configuration_value(&self, key: &str) -> Option<String> {
        self.configs.get(key).and_then(|kv| kv.value)
    }

    pub fn connector_status(&self, connector_id: usize) -> Option<ChargePointStatus> {
        self.connector_info(connector_id).map(|c| c.status)
    }

    pub fn connector_info(&self, connector_id: usize) -> Option<&ConnectorState> {
        self.connector_index(connector_id).map(|idx| &self.connectors[idx])
    }

    pub fn transaction(&self, connector_id: usize) -> Option<&TransactionSession> {
        self.connector_index(connector_id)
            .and_then(|idx| self.sessions[idx].as_ref())
    }

    pub fn meter_register(&self, connector_id: usize) -> Option<u64> {
        self.connector_index(connector_id)
            .map(|idx| self.meter_registers[idx])
    }

    pub fn pending_call_ids(&self) -> Vec<String> {
        self.registry.ids().cloned().collect()
    }

    pub fn scheduled_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn registration_status(&self) -> Option<RegistrationStatus> {
        self.registration_status
    }

    pub fn is_connected(&self) -> bool {
        self.ws_connected
    }
}
