use std::time::Duration;

use cpsim_core::v16::messages::heart_beat::HeartbeatRequest;

use crate::v16::{cp::core::ChargePointCore, drivers::timers::TimerId};

use super::call::CallAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeartbeatState {
    Idle,
    Sleeping,
}

impl ChargePointCore {
    pub(crate) fn set_sleep_heartbeat(&mut self) {
        match self.configs.heartbeat_interval.value {
            0 => {
                self.heartbeat_state = HeartbeatState::Idle;
            }
            secs => {
                self.add_timeout(TimerId::Heartbeat, Duration::from_secs(secs));
                self.heartbeat_state = HeartbeatState::Sleeping;
            }
        }
    }

    pub(crate) fn send_heartbeat(&mut self) {
        self.send_call(CallAction::Heartbeat, HeartbeatRequest {});
    }

    pub(crate) fn heartbeat_expired(&mut self) {
        if self.heartbeat_state != HeartbeatState::Sleeping {
            log::debug!("heartbeat fired while idle");
            return;
        }
        self.send_heartbeat();
        self.set_sleep_heartbeat();
    }

    pub(crate) fn on_heartbeat_online(&mut self) {
        self.set_sleep_heartbeat();
    }

    pub(crate) fn on_heartbeat_offline(&mut self) {
        if self.heartbeat_state == HeartbeatState::Sleeping {
            self.remove_timeout(TimerId::Heartbeat);
        }
        self.heartbeat_state = HeartbeatState::Idle;
    }

    /// Re-arms the interval after HeartbeatInterval changed.
    pub(crate) fn heartbeat_interval_changed(&mut self) {
        if !self.ws_connected {
            return;
        }
        self.on_heartbeat_offline();
        self.set_sleep_heartbeat();
    }
}
