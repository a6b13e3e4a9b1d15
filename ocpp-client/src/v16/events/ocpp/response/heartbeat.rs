use cpsim_core::v16::messages::heart_beat::HeartbeatResponse;

use crate::v16::cp::{core::ChargePointCore, OcppError};

impl ChargePointCore {
    pub(crate) fn heartbeat_response(&mut self, res: Result<HeartbeatResponse, OcppError>) {
        match res {
            Ok(t) => log::debug!("server time {}", t.current_time),
            Err(e) => log::warn!("Heartbeat failed: {}", e),
        }
    }
}
