mod change_configuration;
mod clear_charging_profile;
mod get_composite_schedule;
mod get_configuration;
mod get_diagnostics;
mod remote_start_transaction;
mod remote_stop_transaction;
mod reset;
mod set_charging_profile;
mod trigger_message;
mod update_firmware;
