use chrono::Utc;
use cpsim_core::v16::{
    messages::get_composite_schedule::{GetCompositeScheduleRequest, GetCompositeScheduleResponse},
    types::{ChargingRateUnitType, ChargingSchedule, ChargingSchedulePeriod, GetCompositeScheduleStatus},
};

use crate::v16::{cp::core::ChargePointCore, state_machine::decision::PendingDecision};

impl ChargePointCore {
    pub(crate) fn get_composite_schedule_ocpp(&mut self, unique_id: String, req: GetCompositeScheduleRequest) {
        self.ask(PendingDecision::GetCompositeSchedule {
            unique_id,
            connector_id: req.connector_id,
        });
    }

    pub(crate) fn get_composite_schedule_decided(&mut self, unique_id: String, connector_id: i32, accepted: bool) {
        let payload = if accepted {
            let now = Utc::now();
            GetCompositeScheduleResponse {
                status: GetCompositeScheduleStatus::Accepted,
                connector_id: Some(connector_id),
                schedule_start: Some(now),
                charging_schedule: Some(ChargingSchedule {
                    duration: Some(100),
                    start_schedule: Some(now),
                    charging_rate_unit: ChargingRateUnitType::W,
                    charging_schedule_period: vec![
                        ChargingSchedulePeriod::new(0, 2.5, 3),
                        ChargingSchedulePeriod::new(100, 2.5, 3),
                    ],
                    min_charging_rate: Some(8.1),
                }),
            }
        } else {
            GetCompositeScheduleResponse {
                status: GetCompositeScheduleStatus::Rejected,
                connector_id: None,
                schedule_start: None,
                charging_schedule: None,
            }
        };
        self.send_result(unique_id, payload);
    }
}
