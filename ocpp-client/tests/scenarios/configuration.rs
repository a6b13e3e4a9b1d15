use std::time::Duration;

use cpsim_client::v16::TimerId;
use cpsim_core::v16::types::ConfigurationStatus;
use serde_json::json;

use crate::harness::harness::{test_config, CpHarness};

pub async fn read_only_keys() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call(
        "cc-1",
        "ChangeConfiguration",
        json!({"key": "NumberOfConnectors", "value": "4"}),
    );
    assert_eq!(h.reply_to("cc-1")?.payload(), &json!({"status": "Rejected"}));
    assert_eq!(h.cp.configuration_value("NumberOfConnectors"), Some(String::from("1")));

    h.server_call(
        "cc-2",
        "ChangeConfiguration",
        json!({"key": "NoSuchKey", "value": "1"}),
    );
    assert_eq!(h.reply_to("cc-2")?.payload(), &json!({"status": "Rejected"}));
    assert_eq!(h.cp.configuration_value("NoSuchKey"), None);
    Ok(())
}

pub async fn get_configuration_partitions_keys() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call(
        "gc-1",
        "GetConfiguration",
        json!({"key": ["HeartbeatInterval", "Foo"]}),
    );
    let reply = h.reply_to("gc-1")?.payload().clone();
    assert_eq!(
        reply["configurationKey"],
        json!([{"key": "HeartbeatInterval", "readonly": false, "value": "300"}])
    );
    assert_eq!(reply["unknownKey"], json!(["Foo"]));

    h.server_call("gc-2", "GetConfiguration", json!({}));
    let reply = h.reply_to("gc-2")?.payload().clone();
    let keys: Vec<&str> = reply["configurationKey"]
        .as_array()
        .map(|entries| entries.iter().filter_map(|e| e["key"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(
        keys,
        vec![
            "HeartbeatInterval",
            "NumberOfConnectors",
            "AuthorizeRemoteTxRequests",
            "MeterValueSampleInterval",
            "MeterValuesSampledData",
            "ClockAlignedDataInterval",
            "SupportedFeatureProfiles",
        ]
    );
    assert_eq!(reply["unknownKey"], json!([]));
    Ok(())
}

pub async fn typed_updates() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    assert_eq!(
        h.cp.change_configuration("ClockAlignedDataInterval", "900"),
        ConfigurationStatus::RebootRequired
    );
    assert_eq!(h.cp.configuration_value("ClockAlignedDataInterval"), Some(String::from("900")));

    assert_eq!(
        h.cp.change_configuration("MeterValueSampleInterval", "ten"),
        ConfigurationStatus::Rejected
    );
    assert_eq!(h.cp.configuration_value("MeterValueSampleInterval"), Some(String::from("5")));

    assert_eq!(
        h.cp.change_configuration("AuthorizeRemoteTxRequests", "true"),
        ConfigurationStatus::Accepted
    );
    assert_eq!(h.cp.configuration_value("AuthorizeRemoteTxRequests"), Some(String::from("true")));

    assert_eq!(
        h.cp.change_configuration("MeterValuesSampledData", "Bogus.Thing"),
        ConfigurationStatus::Rejected
    );
    assert_eq!(
        h.cp.change_configuration("MeterValuesSampledData", "Energy.Active.Import.Register,Voltage.L1,Power.Active.Import"),
        ConfigurationStatus::Accepted
    );
    assert_eq!(
        h.cp.configuration_value("MeterValuesSampledData"),
        Some(String::from("Energy.Active.Import.Register,Voltage.L1,Power.Active.Import"))
    );

    h.start_confirmed("A", 1, 1)?;
    h.advance_secs(5);
    let meter = h.last_call("MeterValues")?;
    let samples = meter.payload()["meterValue"][0]["sampledValue"].clone();
    assert_eq!(samples.as_array().map(Vec::len), Some(3));
    assert_eq!(samples[1]["measurand"], json!("Voltage"));
    assert_eq!(samples[1]["phase"], json!("L1"));
    assert_eq!(samples[1]["unit"], json!("V"));
    assert_eq!(samples[2]["measurand"], json!("Power.Active.Import"));
    Ok(())
}

pub async fn heartbeat_interval_change() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.advance_secs(100);
    h.server_call(
        "cc-1",
        "ChangeConfiguration",
        json!({"key": "HeartbeatInterval", "value": "60"}),
    );
    assert_eq!(h.reply_to("cc-1")?.payload(), &json!({"status": "Accepted"}));

    h.advance_secs(130);
    let beats: Vec<Duration> = h.calls("Heartbeat").iter().map(|s| s.at).collect();
    assert_eq!(beats, vec![Duration::from_secs(160), Duration::from_secs(220)]);

    h.server_call(
        "cc-2",
        "ChangeConfiguration",
        json!({"key": "HeartbeatInterval", "value": "0"}),
    );
    assert!(!h.armed(TimerId::Heartbeat));
    h.advance_secs(1000);
    assert_eq!(h.calls("Heartbeat").len(), 2);
    Ok(())
}

pub async fn local_change_keeps_heartbeat_schedule() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    assert_eq!(
        h.cp.change_configuration("HeartbeatInterval", "60"),
        ConfigurationStatus::Accepted
    );
    h.advance_secs(300);
    let beats: Vec<Duration> = h.calls("Heartbeat").iter().map(|s| s.at).collect();
    assert_eq!(beats, vec![Duration::from_secs(300)]);
    h.advance_secs(60);
    assert_eq!(h.calls("Heartbeat").len(), 2);
    Ok(())
}

pub async fn enabling_sampling_resumes_metering() -> anyhow::Result<()> {
    let mut config = test_config();
    config.meter_value_sample_interval = 0;
    let mut h = CpHarness::booted(config)?;
    h.start_confirmed("A", 1, 42)?;
    h.advance_secs(20);
    assert!(h.calls("MeterValues").is_empty());
    assert!(!h.armed(TimerId::MeterSampled(1)));

    h.server_call(
        "cc-1",
        "ChangeConfiguration",
        json!({"key": "MeterValueSampleInterval", "value": "5"}),
    );
    assert_eq!(h.reply_to("cc-1")?.payload(), &json!({"status": "Accepted"}));
    assert!(h.armed(TimerId::MeterSampled(1)));

    h.advance_secs(60);
    let ticks: Vec<Duration> = h.calls("MeterValues").iter().map(|s| s.at).collect();
    assert_eq!(ticks.len(), 12);
    assert_eq!(ticks[0], Duration::from_secs(25));
    assert_eq!(h.calls("MeterValues")[0].payload()["transactionId"], json!(42));
    Ok(())
}
