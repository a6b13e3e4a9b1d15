use std::collections::BTreeSet;

use cpsim_client::v16::CallAction;
use cpsim_core::v16::types::RegistrationStatus;
use serde_json::json;

use crate::harness::harness::{test_config, CpHarness};

pub async fn boot_registers() -> anyhow::Result<()> {
    let mut h = CpHarness::new(test_config())?;
    h.connect();
    assert_eq!(h.connect_urls, vec![String::from("ws://cms.test/ocpp/CP-1")]);
    assert!(h.cp.is_connected());

    let boot = h.last_call("BootNotification")?.clone();
    assert_eq!(boot.payload()["chargePointVendor"], json!("Wirelane"));
    assert_eq!(boot.payload()["chargePointModel"], json!("NodeJS"));
    assert_eq!(h.cp.pending_call_ids(), vec![boot.unique_id()]);
    assert_eq!(h.cp.registration_status(), None);

    h.accept_boot()?;
    assert_eq!(h.cp.registration_status(), Some(RegistrationStatus::Accepted));
    assert!(h.cp.pending_call_ids().is_empty());
    Ok(())
}

pub async fn correlation_ids_are_unique() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let mut ids = BTreeSet::new();
    for _ in 0..50 {
        let (unique_id, actions) = h.cp.call(CallAction::Heartbeat, json!({}));
        h.apply(actions);
        ids.insert(unique_id);
    }
    assert_eq!(ids.len(), 50);
    assert_eq!(h.cp.pending_call_ids().into_iter().collect::<BTreeSet<_>>(), ids);
    for id in &ids {
        assert_eq!(id.len(), 36);
        assert_eq!(id.as_bytes()[14], b'4');
    }
    Ok(())
}

pub async fn reply_resolves_once() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let (first, actions) = h.cp.call(CallAction::Heartbeat, json!({}));
    h.apply(actions);
    let (second, actions) = h.cp.call(CallAction::Heartbeat, json!({}));
    h.apply(actions);
    h.sent.clear();

    h.respond(&first, json!({"currentTime": "2024-01-01T00:00:00Z"}));
    assert_eq!(h.cp.pending_call_ids(), vec![second.clone()]);

    h.respond(&first, json!({"currentTime": "2024-01-01T00:00:00Z"}));
    h.respond("no-such-call", json!({}));
    assert_eq!(h.cp.pending_call_ids(), vec![second.clone()]);
    assert!(h.sent.is_empty());

    h.respond_error(&second, "InternalError");
    assert!(h.cp.pending_call_ids().is_empty());
    Ok(())
}

pub async fn error_reply_abandons_start() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.start_transaction("A", 1)?;
    h.apply(actions);
    let unique_id = h.last_call("StartTransaction")?.unique_id();
    h.respond_error(&unique_id, "InternalError");
    assert!(h.cp.transaction(1).is_none());
    assert!(h.fatal.is_none());
    Ok(())
}

pub async fn offline_calls_are_dropped() -> anyhow::Result<()> {
    let mut h = CpHarness::new(test_config())?;
    let (unique_id, actions) = h.cp.call(CallAction::Heartbeat, json!({}));
    assert!(!unique_id.is_empty());
    assert!(actions.is_empty());
    assert!(h.cp.pending_call_ids().is_empty());
    Ok(())
}

pub async fn unlisted_error_code_settles_start() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.start_transaction("A", 1)?;
    h.apply(actions);
    let unique_id = h.last_call("StartTransaction")?.unique_id();
    h.sent.clear();

    h.receive_raw(&json!([4, unique_id, "OccurrenceConstraintViolation", "bad", {}]).to_string());
    assert!(h.sent.is_empty());
    assert!(h.cp.pending_call_ids().is_empty());
    assert!(h.cp.transaction(1).is_none());

    let actions = h.cp.start_transaction("A", 1)?;
    h.apply(actions);
    assert_eq!(h.calls("StartTransaction").len(), 1);
    Ok(())
}

pub async fn malformed_reply_settles_pending_call() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.start_transaction("A", 1)?;
    h.apply(actions);
    let start = h.last_call("StartTransaction")?.unique_id();
    let (heartbeat, actions) = h.cp.call(CallAction::Heartbeat, json!({}));
    h.apply(actions);
    h.sent.clear();

    h.receive_raw(&json!([3, start, {"transactionId": 1}, "extra"]).to_string());
    h.receive_raw(&json!([4, heartbeat, 17]).to_string());
    assert!(h.sent.is_empty());
    assert!(h.cp.pending_call_ids().is_empty());
    assert!(h.cp.transaction(1).is_none());

    h.receive_raw(&json!([3, "no-such-call", {}, "extra"]).to_string());
    assert!(h.sent.is_empty());
    assert!(h.fatal.is_none());
    Ok(())
}
