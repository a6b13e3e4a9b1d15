#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargingProfileStatus {
    Accepted,
    Rejected,
    NotSupported,
}
