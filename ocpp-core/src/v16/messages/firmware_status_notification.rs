use super::super::types::FirmwareStatus;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct FirmwareStatusNotificationRequest {
    pub status: FirmwareStatus,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct FirmwareStatusNotificationResponse {}
