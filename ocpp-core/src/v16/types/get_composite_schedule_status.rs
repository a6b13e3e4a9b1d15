#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GetCompositeScheduleStatus {
    Accepted,
    Rejected,
}
