use std::time::Duration;

use cpsim_client::v16::{SessionOrigin, SessionPhase, TimerId, TransactionError};
use cpsim_core::v16::types::ChargePointStatus;
use serde_json::json;

use crate::harness::harness::{test_config, CpHarness};

pub async fn metered_transaction() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.start_transaction("04A2B3", 1)?;
    h.apply(actions);

    let start = h.last_call("StartTransaction")?.payload().clone();
    assert_eq!(start["connectorId"], json!(1));
    assert_eq!(start["idTag"], json!("04A2B3"));
    assert_eq!(start["meterStart"], json!(10000));
    let status = h.last_call("StatusNotification")?.payload().clone();
    assert_eq!(status["status"], json!("Charging"));
    assert_eq!(status["info"], json!("Status Update -Type2-"));
    assert_eq!(status["errorCode"], json!("NoError"));

    let session = h.cp.transaction(1).cloned();
    assert_eq!(session.as_ref().map(|s| s.phase), Some(SessionPhase::PendingStart));
    assert_eq!(session.map(|s| s.origin), Some(SessionOrigin::Local));
    assert!(!h.armed(TimerId::MeterSampled(1)));

    h.confirm_start(42)?;
    assert_eq!(h.cp.transaction(1).and_then(|s| s.transaction_id), Some(42));
    assert!(h.armed(TimerId::MeterSampled(1)));

    h.advance_secs(5);
    let meter = h.last_call("MeterValues")?;
    assert_eq!(meter.at, Duration::from_secs(5));
    let sample = &meter.payload()["meterValue"][0]["sampledValue"][0];
    assert_eq!(meter.payload()["transactionId"], json!(42));
    assert_eq!(sample["value"], json!("10100"));
    assert_eq!(sample["measurand"], json!("Energy.Active.Import.Register"));
    assert_eq!(sample["unit"], json!("Wh"));

    h.advance_secs(5);
    assert_eq!(h.calls("MeterValues").len(), 2);
    assert_eq!(h.cp.meter_register(1), Some(10200));
    assert_eq!(h.cp.transaction(1).map(|s| s.meter_current), Some(10200));
    Ok(())
}

pub async fn local_stop() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.start_confirmed("04A2B3", 1, 42)?;
    h.advance_secs(5);
    h.sent.clear();

    let actions = h.cp.stop_transaction(1, None, None);
    h.apply(actions);

    let actions: Vec<_> = h.sent.iter().filter_map(|s| s.action()).collect();
    assert_eq!(actions, vec!["StopTransaction", "StatusNotification"]);
    let stop = h.last_call("StopTransaction")?.payload().clone();
    assert_eq!(stop["transactionId"], json!(42));
    assert_eq!(stop["meterStop"], json!(10200));
    assert_eq!(stop["idTag"], json!("04A2B3"));
    assert_eq!(stop["reason"], json!("Local"));
    assert!(stop.get("transactionData").is_none());

    let status = h.last_call("StatusNotification")?.payload().clone();
    assert_eq!(status["status"], json!("Available"));
    assert_eq!(status["info"], json!("Status Update"));
    assert_eq!(h.cp.connector_status(1), Some(ChargePointStatus::Available));
    assert!(h.cp.transaction(1).is_none());
    assert!(!h.armed(TimerId::MeterSampled(1)));

    h.advance_secs(20);
    assert!(h.calls("MeterValues").is_empty());
    Ok(())
}

pub async fn start_refused_without_mutation() -> anyhow::Result<()> {
    let mut offline = CpHarness::new(test_config())?;
    assert_eq!(
        offline.cp.start_transaction("A", 1).err(),
        Some(TransactionError::Offline)
    );
    assert!(offline.cp.transaction(1).is_none());

    let mut h = CpHarness::booted(test_config())?;
    assert_eq!(
        h.cp.start_transaction("A", 2).err(),
        Some(TransactionError::UnknownConnector(2))
    );
    assert_eq!(
        h.cp.start_transaction("A", 0).err(),
        Some(TransactionError::UnknownConnector(0))
    );

    h.start_confirmed("A", 1, 9)?;
    let sent = h.sent.len();
    assert_eq!(
        h.cp.start_transaction("B", 1).err(),
        Some(TransactionError::ConnectorOccupied(1))
    );
    assert_eq!(h.sent.len(), sent);
    assert_eq!(h.cp.transaction(1).map(|s| s.id_tag.clone()), Some(String::from("A")));
    assert_eq!(h.cp.transaction(1).and_then(|s| s.transaction_id), Some(9));
    Ok(())
}

pub async fn stop_without_transaction() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.stop_transaction(1, None, None);
    h.apply(actions);
    assert!(h.sent.is_empty());

    let actions = h.cp.stop_transaction(1, Some(String::from("TAG")), Some(77));
    h.apply(actions);
    let stop = h.last_call("StopTransaction")?.payload().clone();
    assert_eq!(stop["transactionId"], json!(77));
    assert_eq!(stop["idTag"], json!("TAG"));
    assert_eq!(stop["meterStop"], json!(10100));
    assert_eq!(h.cp.connector_status(1), Some(ChargePointStatus::Available));
    Ok(())
}

pub async fn start_rejected_by_server() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.start_transaction("BLOCKED", 1)?;
    h.apply(actions);
    let unique_id = h.last_call("StartTransaction")?.unique_id();
    h.respond(
        &unique_id,
        json!({"idTagInfo": {"status": "Blocked"}, "transactionId": 3}),
    );

    assert!(h.cp.transaction(1).is_none());
    assert_eq!(h.cp.connector_status(1), Some(ChargePointStatus::Charging));
    assert!(!h.armed(TimerId::MeterSampled(1)));
    assert!(h.fatal.is_none());

    let actions = h.cp.start_transaction("NEXT", 1)?;
    h.apply(actions);
    assert_eq!(h.calls("StartTransaction").len(), 2);
    Ok(())
}

pub async fn late_confirmation_ignored() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.start_transaction("A", 1)?;
    h.apply(actions);
    let first = h.last_call("StartTransaction")?.unique_id();
    let actions = h.cp.stop_transaction(1, None, Some(5));
    h.apply(actions);

    h.respond(&first, json!({"idTagInfo": {"status": "Accepted"}, "transactionId": 5}));
    assert!(h.cp.transaction(1).is_none());
    assert!(!h.armed(TimerId::MeterSampled(1)));
    Ok(())
}
