use std::time::Duration;

use chrono::Utc;
use cpsim_core::v16::{
    messages::meter_values::MeterValuesRequest,
    types::{
        Location, Measurand, MeterValue, Phase, ReadingContext, SampledValue, UnitOfMeasure,
        ValueFormat,
    },
};
use rand::Rng;

use crate::v16::{cp::core::ChargePointCore, drivers::timers::TimerId};

use super::{call::CallAction, transaction::SessionPhase};

pub(crate) const METER_START_WH: u64 = 10_000;
pub(crate) const METER_STEP_WH: u64 = 100;

/// One entry of `MeterValuesSampledData`, e.g. `Voltage.L1`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeterDataType {
    pub measurand: Measurand,
    pub phase: Option<Phase>,
}

impl MeterDataType {
    pub fn energy_register() -> Self {
        Self {
            measurand: Measurand::EnergyActiveImportRegister,
            phase: None,
        }
    }

    pub fn parse_meter_data(s: &str) -> Option<Vec<MeterDataType>> {
        s.split(',')
            .map(|token| {
                let token = token.trim();
                if let Ok(measurand) = token.parse::<Measurand>() {
                    return Some(MeterDataType {
                        measurand,
                        phase: None,
                    });
                }
                let (left, right) = token.split_at(token.rfind('.')?);
                Some(MeterDataType {
                    measurand: left.parse().ok()?,
                    phase: Some(right[1..].parse().ok()?),
                })
            })
            .collect()
    }

    pub fn format_meter_data(v: &Vec<MeterDataType>) -> String {
        v.iter()
            .map(|data| match data.phase {
                Some(phase) => format!("{}.{}", data.measurand.as_str(), phase.as_str()),
                None => data.measurand.as_str().to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl ChargePointCore {
    pub(crate) fn meter_interval(&self) -> Option<Duration> {
        match self.configs.meter_value_sample_interval.value {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub(crate) fn arm_meter_sampling(&mut self, connector_id: usize) {
        if let Some(interval) = self.meter_interval() {
            self.add_timeout(TimerId::MeterSampled(connector_id), interval);
        }
    }

    pub(crate) fn metered_connectors(&self) -> Vec<usize> {
        self.sessions
            .iter()
            .flatten()
            .filter(|s| s.phase == SessionPhase::Active)
            .map(|s| s.connector_id)
            .collect()
    }

    /// Resumes metering for running transactions when sampling goes from disabled to enabled.
    /// Otherwise armed timers pick the new interval up on their next tick.
    pub(crate) fn meter_interval_changed(&mut self, previous: Option<Duration>) {
        if previous.is_some() || !self.ws_connected {
            return;
        }
        for connector_id in self.metered_connectors() {
            self.arm_meter_sampling(connector_id);
        }
    }

    fn synthetic_sample(&mut self, data: MeterDataType) -> Option<SampledValue> {
        let (value, unit) = match data.measurand {
            Measurand::PowerActiveImport => (self.rng.random_range(3600.0..3700.0), UnitOfMeasure::W),
            Measurand::Voltage => (self.rng.random_range(228.0..232.0), UnitOfMeasure::V),
            Measurand::CurrentImport => (self.rng.random_range(15.0..16.0), UnitOfMeasure::A),
            Measurand::SoC => (self.rng.random_range(20.0..100.0), UnitOfMeasure::Percent),
            other => {
                log::trace!("no synthetic source for {}", other.as_str());
                return None;
            }
        };
        Some(SampledValue {
            value: format!("{:.2}", round2(value)),
            context: Some(ReadingContext::SamplePeriodic),
            format: Some(ValueFormat::Raw),
            measurand: Some(data.measurand),
            phase: data.phase,
            location: Some(Location::Outlet),
            unit: Some(unit),
        })
    }

    pub(crate) fn sampled_values(&mut self, register_wh: u64) -> Vec<SampledValue> {
        let mut samples = vec![SampledValue {
            value: register_wh.to_string(),
            context: Some(ReadingContext::SamplePeriodic),
            format: Some(ValueFormat::Raw),
            measurand: Some(Measurand::EnergyActiveImportRegister),
            phase: None,
            location: Some(Location::Outlet),
            unit: Some(UnitOfMeasure::Wh),
        }];
        let requested = self.configs.meter_values_sampled_data.value.clone();
        for data in requested {
            if data.measurand == Measurand::EnergyActiveImportRegister {
                continue;
            }
            if let Some(sample) = self.synthetic_sample(data) {
                samples.push(sample);
            }
        }
        samples
    }

    /// Metering tick: advances the register and reports it for the running transaction.
    pub(crate) fn meter_tick(&mut self, connector_id: usize) {
        let Some(idx) = self.connector_index(connector_id) else {
            return;
        };
        let transaction_id = match &self.sessions[idx] {
            Some(session) if session.phase == SessionPhase::Active => session.transaction_id,
            _ => {
                log::debug!("connector {} has no active transaction, metering stopped", connector_id);
                return;
            }
        };
        self.meter_registers[idx] += METER_STEP_WH;
        let register = self.meter_registers[idx];
        if let Some(session) = self.sessions[idx].as_mut() {
            session.meter_current = register;
        }
        let sampled_value = self.sampled_values(register);
        let payload = MeterValuesRequest {
            connector_id,
            transaction_id,
            meter_value: vec![MeterValue {
                timestamp: Utc::now(),
                sampled_value,
            }],
        };
        self.send_call(CallAction::MeterValues, payload);
        self.arm_meter_sampling(connector_id);
    }
}
