use std::time::Duration;

use crate::v16::{
    cp::{core::ChargePointCore, error::EngineError},
    drivers::{
        decision::{DecisionTicket, Prompt},
        timers::TimerId,
    },
};

/// Side effects requested by the engine, executed in order by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreActions {
    Connect(String),
    SendWsMsg(String),
    AddTimeout(TimerId, Duration),
    RemoveTimeout(TimerId),
    AskDecision(DecisionTicket, Prompt),
    Fatal(EngineError),
}

impl ChargePointCore {
    pub(crate) fn connect(&mut self, cms_url: String) {
        self.queued_actions.push_back(CoreActions::Connect(cms_url));
    }

    pub(crate) fn send_ws_msg(&mut self, msg: String) {
        if self.ws_connected {
            self.queued_actions.push_back(CoreActions::SendWsMsg(msg));
        } else {
            log::warn!("offline, dropping {}", msg);
        }
    }

    pub(crate) fn add_timeout(&mut self, timer_id: TimerId, timeout: Duration) {
        self.queued_actions
            .push_back(CoreActions::AddTimeout(timer_id, timeout));
    }

    pub(crate) fn remove_timeout(&mut self, timer_id: TimerId) {
        self.queued_actions
            .push_back(CoreActions::RemoveTimeout(timer_id));
    }

    pub(crate) fn ask_decision(&mut self, ticket: DecisionTicket, prompt: Prompt) {
        self.queued_actions
            .push_back(CoreActions::AskDecision(ticket, prompt));
    }

    pub(crate) fn fatal(&mut self, err: EngineError) {
        log::error!("{}", err);
        self.queued_actions.push_back(CoreActions::Fatal(err));
    }

    pub(crate) fn drain_actions(&mut self) -> Vec<CoreActions> {
        self.queued_actions.drain(..).collect()
    }
}
