use crate::v16::{cp::core::ChargePointCore, drivers::timers::TimerId};

impl ChargePointCore {
    pub(crate) fn handle_timeout_helper(&mut self, id: TimerId) {
        match id {
            TimerId::Heartbeat => self.heartbeat_expired(),
            TimerId::MeterSampled(connector_id) => self.meter_tick(connector_id),
            TimerId::Task(task_id) => self.run_task(task_id),
        }
    }
}
