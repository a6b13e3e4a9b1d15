mod authorization_status;
mod charge_point_error_code;
mod charge_point_status;
mod charging_profile;
mod charging_profile_status;
mod charging_rate_unit_type;
mod charging_schedule;
mod charging_schedule_period;
mod clear_charging_profile_status;
mod configuration_status;
mod data_transfer_status;
mod diagnostics_status;
mod firmware_status;
mod get_composite_schedule_status;
mod id_tag_info;
mod key_value;
mod location;
mod measurand;
mod message_trigger;
mod meter_value;
mod phase;
mod reading_context;
mod reason;
mod registration_status;
mod remote_start_stop_status;
mod reset;
mod sampled_value;
mod trigger_message_status;
mod unit_of_measure;
mod value_format;

pub use authorization_status::AuthorizationStatus;
pub use charge_point_error_code::ChargePointErrorCode;
pub use charge_point_status::ChargePointStatus;
pub use charging_profile::{
    ChargingProfile, ChargingProfileKindType, ChargingProfilePurposeType, RecurrencyKindType,
};
pub use charging_profile_status::ChargingProfileStatus;
pub use charging_rate_unit_type::ChargingRateUnitType;
pub use charging_schedule::ChargingSchedule;
pub use charging_schedule_period::ChargingSchedulePeriod;
pub use clear_charging_profile_status::ClearChargingProfileStatus;
pub use configuration_status::ConfigurationStatus;
pub use data_transfer_status::DataTransferStatus;
pub use diagnostics_status::DiagnosticsStatus;
pub use firmware_status::FirmwareStatus;
pub use get_composite_schedule_status::GetCompositeScheduleStatus;
pub use id_tag_info::IdTagInfo;
pub use key_value::KeyValue;
pub use location::Location;
pub use measurand::Measurand;
pub use message_trigger::MessageTrigger;
pub use meter_value::MeterValue;
pub use phase::Phase;
pub use reading_context::ReadingContext;
pub use reason::Reason;
pub use registration_status::RegistrationStatus;
pub use remote_start_stop_status::RemoteStartStopStatus;
pub use reset::{ResetStatus, ResetType};
pub use sampled_value::SampledValue;
pub use trigger_message_status::TriggerMessageStatus;
pub use unit_of_measure::UnitOfMeasure;
pub use value_format::ValueFormat;
