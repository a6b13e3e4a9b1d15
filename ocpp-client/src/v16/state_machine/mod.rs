pub(crate) mod actions;
pub(crate) mod auth;
pub(crate) mod boot;
pub(crate) mod call;
#[macro_use]
pub(crate) mod config;
pub(crate) mod connector;
pub(crate) mod decision;
pub(crate) mod diagnostics;
pub(crate) mod firmware;
pub(crate) mod heartbeat;
pub(crate) mod meter;
pub(crate) mod parking;
pub(crate) mod rng;
pub(crate) mod schedule;
pub(crate) mod signed;
pub(crate) mod transaction;
