pub mod configuration;
pub mod dispatcher;
pub mod registry;
pub mod run_loop;
pub mod signed;
pub mod transaction;
