use std::str::FromStr;

use cpsim_core::v16::types::{ConfigurationStatus, KeyValue};

use crate::v16::{cp::config::ChargePointConfig, state_machine::meter::MeterDataType};

pub(crate) struct OcppConfig<T> {
    pub key: &'static str,
    pub raw: String,
    pub value: T,
    pub read: bool,
    pub write: bool,
    pub reboot_required: bool,
    pub parser_fn: fn(&str) -> Option<T>,
    pub format_fn: fn(&T) -> String,
}

impl<T> OcppConfig<T> {
    pub fn new(key: &'static str, value: T) -> Self {
        Self {
            key,
            raw: String::new(),
            value,
            read: false,
            write: false,
            reboot_required: false,
            parser_fn: |_| None,
            format_fn: |_| String::new(),
        }
    }
    pub fn with_std(mut self) -> Self
    where
        T: ToString + FromStr,
    {
        self.parser_fn = |s| s.trim().parse().ok();
        self.format_fn = |v| v.to_string();
        self.raw = (self.format_fn)(&self.value);
        self
    }
    pub fn with_parse(mut self, parser_fn: fn(&str) -> Option<T>, format_fn: fn(&T) -> String) -> Self {
        self.parser_fn = parser_fn;
        self.format_fn = format_fn;
        self.raw = (self.format_fn)(&self.value);
        self
    }
    pub fn read(mut self) -> Self {
        self.read = true;
        self
    }
    pub fn write(mut self) -> Self {
        self.write = true;
        self
    }
    pub fn reboot_required(mut self) -> Self {
        self.reboot_required = true;
        self
    }
    fn key_value(&self) -> KeyValue {
        KeyValue {
            key: self.key.to_string(),
            readonly: !self.write,
            value: self.read.then(|| self.raw.clone()),
        }
    }
    fn update(&mut self, raw: String) -> Result<ConfigurationStatus, ConfigurationStatus> {
        if !self.write {
            return Err(ConfigurationStatus::Rejected);
        }
        let value = (self.parser_fn)(&raw).ok_or(ConfigurationStatus::Rejected)?;
        self.raw = (self.format_fn)(&value);
        self.value = value;
        Ok(if self.reboot_required {
            ConfigurationStatus::RebootRequired
        } else {
            ConfigurationStatus::Accepted
        })
    }
}

macro_rules! config_key_map {
    ($macro:ident, $this:expr $(, $args:expr)*) => {
        $macro!($this, {
            "HeartbeatInterval" => heartbeat_interval,
            "NumberOfConnectors" => number_of_connectors,
            "AuthorizeRemoteTxRequests" => authorize_remote_tx_requests,
            "MeterValueSampleInterval" => meter_value_sample_interval,
            "MeterValuesSampledData" => meter_values_sampled_data,
            "ClockAlignedDataInterval" => clock_aligned_data_interval,
            "SupportedFeatureProfiles" => supported_feature_profiles
        } $(, $args)*)
    };
}

macro_rules! gen_get_match {
    ($this:expr, { $($key_str:literal => $field:ident),+ }, $key:expr) => {
        match $key {
            $(
                $key_str => Some($this.$field.key_value()),
            )+
            _ => None,
        }
    };
}

macro_rules! gen_update_match {
    ($this:expr, { $($key_str:literal => $field:ident),+ }, $key:expr, $raw:expr) => {
        match $key {
            $(
                $key_str => $this.$field.update($raw),
            )+
            _ => Err(ConfigurationStatus::Rejected),
        }
    };
}

macro_rules! gen_all_keys {
    ($this:expr, { $($key_str:literal => $field:ident),+ }) => {
        [$($key_str),+]
    };
}

pub(crate) struct OcppConfigs {
    pub heartbeat_interval: OcppConfig<u64>,
    pub number_of_connectors: OcppConfig<usize>,
    pub authorize_remote_tx_requests: OcppConfig<bool>,
    pub meter_value_sample_interval: OcppConfig<u64>,
    pub meter_values_sampled_data: OcppConfig<Vec<MeterDataType>>,
    pub clock_aligned_data_interval: OcppConfig<u64>,
    pub supported_feature_profiles: OcppConfig<String>,
}

impl OcppConfigs {
    pub fn build(config: &ChargePointConfig) -> Self {
        Self {
            heartbeat_interval: OcppConfig::new("HeartbeatInterval", config.heartbeat_interval)
                .with_std()
                .read()
                .write(),
            number_of_connectors: OcppConfig::new("NumberOfConnectors", config.number_of_connectors)
                .with_std()
                .read(),
            authorize_remote_tx_requests: OcppConfig::new(
                "AuthorizeRemoteTxRequests",
                config.authorize_remote_tx_requests,
            )
            .with_std()
            .read()
            .write(),
            meter_value_sample_interval: OcppConfig::new(
                "MeterValueSampleInterval",
                config.meter_value_sample_interval,
            )
            .with_std()
            .read()
            .write(),
            meter_values_sampled_data: OcppConfig::new(
                "MeterValuesSampledData",
                config.meter_values_sampled_data.clone(),
            )
            .with_parse(MeterDataType::parse_meter_data, MeterDataType::format_meter_data)
            .read()
            .write(),
            clock_aligned_data_interval: OcppConfig::new("ClockAlignedDataInterval", 0)
                .with_std()
                .read()
                .write()
                .reboot_required(),
            supported_feature_profiles: OcppConfig::new(
                "SupportedFeatureProfiles",
                String::from("Core,FirmwareManagement,RemoteTrigger,SmartCharging"),
            )
            .with_std()
            .read(),
        }
    }

    pub fn keys(&self) -> [&'static str; 7] {
        config_key_map!(gen_all_keys, self)
    }

    pub fn get(&self, key: &str) -> Option<KeyValue> {
        config_key_map!(gen_get_match, self, key)
    }

    /// Partitions `keys` into known entries and unknown key names. No keys means every entry.
    pub fn get_many(&self, keys: Option<Vec<String>>) -> (Vec<KeyValue>, Vec<String>) {
        let keys = match keys {
            Some(keys) if !keys.is_empty() => keys,
            _ => self.keys().iter().map(|k| k.to_string()).collect(),
        };
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for key in keys {
            match self.get(&key) {
                Some(kv) => known.push(kv),
                None => unknown.push(key),
            }
        }
        (known, unknown)
    }

    pub fn set(&mut self, key: &str, raw: String) -> ConfigurationStatus {
        let res: Result<ConfigurationStatus, ConfigurationStatus> =
            config_key_map!(gen_update_match, self, key, raw);
        match res {
            Ok(status) | Err(status) => status,
        }
    }
}
