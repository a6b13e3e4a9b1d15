use chrono::Utc;
use cpsim_core::v16::messages::data_transfer::DataTransferRequest;
use serde_json::json;

use crate::v16::cp::core::ChargePointCore;

use super::call::CallAction;

const PARKING_MESSAGE_ID: &str = "ParkingSpotOccupation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParkingSpot {
    Free,
    Occupied,
}

impl ParkingSpot {
    fn as_str(&self) -> &'static str {
        match self {
            ParkingSpot::Free => "Free",
            ParkingSpot::Occupied => "Occupied",
        }
    }
}

impl ChargePointCore {
    /// Reports parking spot occupancy through a vendor DataTransfer, when a vendor id is configured.
    pub(crate) fn send_parking_spot(&mut self, connector_id: usize, spot: ParkingSpot) {
        let Some(vendor_id) = self.parking_vendor_id.clone() else {
            return;
        };
        let data = json!({
            "connectorId": connector_id,
            "status": spot.as_str(),
            "timestamp": Utc::now(),
        });
        self.send_call(
            CallAction::DataTransfer,
            DataTransferRequest {
                vendor_id,
                message_id: Some(PARKING_MESSAGE_ID.to_string()),
                data: Some(data.to_string()),
            },
        );
    }
}
