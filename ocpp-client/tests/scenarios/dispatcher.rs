use std::time::Duration;

use cpsim_client::v16::{Prompt, SessionOrigin, Verdict};
use serde_json::json;

use crate::harness::harness::{test_config, CpHarness};

pub async fn remote_start_refused() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call(
        "rs-1",
        "RemoteStartTransaction",
        json!({"connectorId": 1, "idTag": "TAG1"}),
    );
    assert!(h.sent.is_empty());
    assert_eq!(h.asked.iter().map(|(_, p)| *p).collect::<Vec<_>>(), vec![Prompt::RemoteStart]);

    h.decide(Prompt::RemoteStart, Verdict::No)?;
    h.advance_secs(5);
    assert_eq!(h.sent.len(), 1);
    assert_eq!(h.sent[0].frame, json!([3, "rs-1", {"status": "Rejected"}]));
    assert!(h.cp.transaction(1).is_none());
    Ok(())
}

pub async fn remote_start_accepted() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call("rs-1", "RemoteStartTransaction", json!({"idTag": "TAG1"}));
    h.decide(Prompt::RemoteStart, Verdict::Yes)?;
    assert_eq!(h.reply_to("rs-1")?.payload(), &json!({"status": "Accepted"}));
    assert!(h.calls("StartTransaction").is_empty());

    h.advance(Duration::from_millis(500));
    let start = h.last_call("StartTransaction")?;
    assert_eq!(start.at, Duration::from_millis(500));
    assert_eq!(start.payload()["idTag"], json!("TAG1"));
    assert_eq!(start.payload()["connectorId"], json!(1));
    assert_eq!(h.cp.transaction(1).map(|s| s.origin), Some(SessionOrigin::Remote));
    Ok(())
}

pub async fn remote_start_authorizes_first() -> anyhow::Result<()> {
    let mut config = test_config();
    config.authorize_remote_tx_requests = true;
    let mut h = CpHarness::booted(config)?;
    h.server_call("rs-1", "RemoteStartTransaction", json!({"idTag": "TAG1"}));
    h.decide(Prompt::RemoteStart, Verdict::Yes)?;
    h.advance(Duration::from_millis(500));

    let authorize = h.last_call("Authorize")?.payload().clone();
    assert_eq!(authorize["idTag"], json!("TAG1"));
    assert_eq!(authorize["connectorId"], json!(0));
    assert!(authorize.get("timestamp").is_some());
    assert!(h.calls("StartTransaction").is_empty());

    h.authorize_reply("Accepted")?;
    let start = h.last_call("StartTransaction")?.payload().clone();
    assert_eq!(start["idTag"], json!("TAG1"));
    assert_eq!(start["connectorId"], json!(1));
    Ok(())
}

pub async fn remote_start_on_busy_connector() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.start_confirmed("LOCAL", 1, 4)?;
    h.sent.clear();
    h.server_call("rs-1", "RemoteStartTransaction", json!({"idTag": "TAG1"}));
    assert!(h.asked.is_empty());
    assert_eq!(h.sent.len(), 1);
    assert_eq!(h.reply_to("rs-1")?.payload(), &json!({"status": "Rejected"}));
    Ok(())
}

pub async fn remote_stop() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.start_confirmed("LOCAL", 1, 42)?;
    h.server_call("st-1", "RemoteStopTransaction", json!({"transactionId": 42}));
    h.decide(Prompt::RemoteStop, Verdict::Yes)?;
    assert_eq!(h.reply_to("st-1")?.payload(), &json!({"status": "Accepted"}));

    h.advance(Duration::from_millis(500));
    let stop = h.last_call("StopTransaction")?.payload().clone();
    assert_eq!(stop["transactionId"], json!(42));
    assert_eq!(stop["reason"], json!("Remote"));
    assert!(h.cp.transaction(1).is_none());

    h.server_call("st-2", "RemoteStopTransaction", json!({"transactionId": 42}));
    h.decide(Prompt::RemoteStop, Verdict::No)?;
    assert_eq!(h.reply_to("st-2")?.payload(), &json!({"status": "Rejected"}));
    h.advance_secs(1);
    assert_eq!(h.calls("StopTransaction").len(), 1);
    Ok(())
}

pub async fn unknown_and_malformed_calls() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call("u-1", "CancelReservation", json!({"reservationId": 1}));
    assert!(h.sent.is_empty());

    h.server_call("b-1", "ChangeConfiguration", json!({"key": 5}));
    let error = h.reply_to("b-1")?.frame.clone();
    assert_eq!(error[0], json!(4));
    assert_eq!(error[2], json!("FormationViolation"));

    h.receive_raw(r#"[2,"m-1"]"#);
    assert_eq!(h.reply_to("m-1")?.frame[2], json!("FormationViolation"));

    let before = h.sent.len();
    h.receive_raw("not json at all");
    h.receive_raw(r#"{"hello": "world"}"#);
    assert_eq!(h.sent.len(), before);
    assert!(h.fatal.is_none());
    Ok(())
}

pub async fn trigger_message() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call(
        "tm-1",
        "TriggerMessage",
        json!({"requestedMessage": "StatusNotification", "connectorId": 1}),
    );
    assert_eq!(h.reply_to("tm-1")?.payload(), &json!({"status": "Accepted"}));
    assert!(h.calls("StatusNotification").is_empty());
    h.advance_secs(1);
    let status = h.last_call("StatusNotification")?;
    assert_eq!(status.at, Duration::from_secs(1));
    assert_eq!(status.payload()["connectorId"], json!(1));
    assert_eq!(status.payload()["status"], json!("Available"));

    h.server_call("tm-2", "TriggerMessage", json!({"requestedMessage": "Heartbeat"}));
    assert_eq!(h.reply_to("tm-2")?.payload(), &json!({"status": "Accepted"}));
    h.advance_secs(1);
    assert_eq!(h.last_call("Heartbeat")?.at, Duration::from_secs(2));

    h.server_call("tm-3", "TriggerMessage", json!({"requestedMessage": "MeterValues"}));
    assert_eq!(h.reply_to("tm-3")?.payload(), &json!({"status": "NotImplemented"}));

    h.server_call(
        "tm-4",
        "TriggerMessage",
        json!({"requestedMessage": "StatusNotification", "connectorId": 5}),
    );
    assert_eq!(h.reply_to("tm-4")?.payload(), &json!({"status": "Rejected"}));
    h.advance_secs(2);
    assert_eq!(h.calls("StatusNotification").len(), 1);
    Ok(())
}

pub async fn trigger_status_for_all_connectors() -> anyhow::Result<()> {
    let mut config = test_config();
    config.number_of_connectors = 2;
    let mut h = CpHarness::booted(config)?;
    h.server_call("tm-1", "TriggerMessage", json!({"requestedMessage": "StatusNotification"}));
    h.advance_secs(1);
    let connectors: Vec<_> = h
        .calls("StatusNotification")
        .iter()
        .map(|s| s.payload()["connectorId"].clone())
        .collect();
    assert_eq!(connectors, vec![json!(1), json!(2)]);
    Ok(())
}

pub async fn smart_charging_prompts() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call(
        "cs-1",
        "GetCompositeSchedule",
        json!({"connectorId": 1, "duration": 3600}),
    );
    h.decide(Prompt::GetCompositeSchedule, Verdict::Yes)?;
    let reply = h.reply_to("cs-1")?.payload().clone();
    assert_eq!(reply["status"], json!("Accepted"));
    assert_eq!(reply["connectorId"], json!(1));
    assert_eq!(reply["chargingSchedule"]["chargingRateUnit"], json!("W"));
    assert_eq!(reply["chargingSchedule"]["minChargingRate"], json!(8.1));
    assert_eq!(
        reply["chargingSchedule"]["chargingSchedulePeriod"],
        json!([
            {"startPeriod": 0, "limit": 2.5, "numberPhases": 3},
            {"startPeriod": 100, "limit": 2.5, "numberPhases": 3}
        ])
    );

    h.server_call(
        "cs-2",
        "GetCompositeSchedule",
        json!({"connectorId": 1, "duration": 3600}),
    );
    h.decide(Prompt::GetCompositeSchedule, Verdict::No)?;
    assert_eq!(h.reply_to("cs-2")?.payload(), &json!({"status": "Rejected"}));

    h.server_call(
        "sp-1",
        "SetChargingProfile",
        json!({
            "connectorId": 1,
            "csChargingProfiles": {
                "chargingProfileId": 8,
                "stackLevel": 0,
                "chargingProfilePurpose": "TxDefaultProfile",
                "chargingProfileKind": "Absolute",
                "chargingSchedule": {
                    "chargingRateUnit": "A",
                    "chargingSchedulePeriod": [{"startPeriod": 0, "limit": 16.0}]
                }
            }
        }),
    );
    h.decide(Prompt::SetChargingProfile, Verdict::No)?;
    assert_eq!(h.reply_to("sp-1")?.payload(), &json!({"status": "Rejected"}));

    h.server_call("cp-1", "ClearChargingProfile", json!({}));
    h.decide(Prompt::ClearChargingProfile, Verdict::No)?;
    assert_eq!(h.reply_to("cp-1")?.payload(), &json!({"status": "Unknown"}));
    h.server_call("cp-2", "ClearChargingProfile", json!({"id": 8}));
    h.decide(Prompt::ClearChargingProfile, Verdict::Yes)?;
    assert_eq!(h.reply_to("cp-2")?.payload(), &json!({"status": "Accepted"}));
    Ok(())
}

pub async fn reset_reboots() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.server_call("r-1", "Reset", json!({"type": "Soft"}));
    h.decide(Prompt::Reset, Verdict::Yes)?;
    assert_eq!(h.reply_to("r-1")?.payload(), &json!({"status": "Accepted"}));

    h.advance_secs(9);
    assert!(h.calls("BootNotification").is_empty());
    h.advance_secs(1);
    assert_eq!(h.last_call("BootNotification")?.at, Duration::from_secs(10));

    h.server_call("r-2", "Reset", json!({"type": "Hard"}));
    h.decide(Prompt::Reset, Verdict::No)?;
    assert_eq!(h.reply_to("r-2")?.payload(), &json!({"status": "Rejected"}));
    h.advance_secs(20);
    assert_eq!(h.calls("BootNotification").len(), 1);
    Ok(())
}

pub async fn unknown_ticket_ignored() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    let actions = h.cp.handle_verdict(99, Verdict::Yes);
    assert!(actions.is_empty());
    Ok(())
}
