use std::time::Duration;

use crate::v16::{cp::core::ChargePointCore, drivers::timers::TimerId};

use super::{
    call::CallAction,
    schedule::{Step, Workflow},
};

const PARKING_FREE_DELAY: Duration = Duration::from_secs(10);

impl ChargePointCore {
    pub(crate) fn send_boot_notification(&mut self) {
        self.send_call(CallAction::BootNotification, self.boot_info.clone());
    }

    pub(crate) fn on_boot_connected(&mut self) {
        self.send_boot_notification();
        self.on_heartbeat_online();
        if self.parking_vendor_id.is_some() {
            self.schedule(
                Workflow::Parking,
                PARKING_FREE_DELAY,
                Step::ParkingFree(self.default_connector_id),
            );
        }
        for connector_id in self.metered_connectors() {
            self.arm_meter_sampling(connector_id);
        }
        self.start_self_test();
    }

    pub(crate) fn on_boot_disconnected(&mut self) {
        self.on_heartbeat_offline();
        for connector_id in 1..=self.connectors.len() {
            self.remove_timeout(TimerId::MeterSampled(connector_id));
        }
        self.cancel_all_tasks();
        self.on_outgoing_offline();
        self.clear_decisions();
    }
}
