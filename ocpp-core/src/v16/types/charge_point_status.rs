#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargePointStatus {
    Available,
    Preparing,
    Charging,
    SuspendedEVSE,
    SuspendedEV,
    Finishing,
    Reserved,
    Unavailable,
    Faulted,
}

impl ChargePointStatus {
    /// Whether a cable is physically plugged in for this status.
    pub fn is_plugged(&self) -> bool {
        matches!(
            self,
            ChargePointStatus::Preparing
                | ChargePointStatus::Charging
                | ChargePointStatus::SuspendedEVSE
                | ChargePointStatus::SuspendedEV
                | ChargePointStatus::Finishing
        )
    }
}
