use std::time::Duration;

use anyhow::anyhow;
use cpsim_client::v16::{AutoAccept, ChargePointAsync, EngineError, TransportEvent};
use cpsim_core::v16::types::AuthorizationStatus;
use serde_json::{json, Value};

use crate::harness::{
    harness::{init_logger, test_config},
    transport::{InstantTimers, MockWs, MockWsHandle},
};

async fn next_frame(server: &mut MockWsHandle) -> anyhow::Result<Value> {
    let raw = tokio::time::timeout(Duration::from_secs(5), server.from_cp.recv())
        .await?
        .ok_or_else(|| anyhow!("charge point hung up"))?;
    Ok(serde_json::from_str(&raw)?)
}

async fn next_call(server: &mut MockWsHandle, action: &str) -> anyhow::Result<Value> {
    loop {
        let frame = next_frame(server).await?;
        if frame[0] == json!(2) && frame[2] == json!(action) {
            return Ok(frame);
        }
    }
}

fn message(frame: Value) -> TransportEvent {
    TransportEvent::Message(frame.to_string())
}

pub async fn closes_cleanly() -> anyhow::Result<()> {
    init_logger();
    let (ws, mut server) = MockWs::new();
    let mut config = test_config();
    config.heartbeat_interval = 0;
    let cp = ChargePointAsync::new(ws, InstantTimers::default(), AutoAccept::new(), config);

    let script = async move {
        let boot = next_call(&mut server, "BootNotification").await?;
        server.to_cp.send(message(json!([
            3,
            boot[1],
            {"currentTime": "2024-01-01T00:00:00Z", "interval": 0, "status": "Accepted"}
        ])))?;
        server.to_cp.send(message(json!([2, "rs-1", "RemoteStartTransaction", {"idTag": "T1"}])))?;
        let reply = next_frame(&mut server).await?;
        assert_eq!(reply, json!([3, "rs-1", {"status": "Accepted"}]));
        let start = next_call(&mut server, "StartTransaction").await?;
        assert_eq!(start[3]["idTag"], json!("T1"));
        server.to_cp.send(TransportEvent::Closed {
            code: 1000,
            reason: String::from("bye"),
        })?;
        anyhow::Ok(())
    };

    let (res, script) = tokio::join!(cp.run(), script);
    script?;
    assert_eq!(res, Ok(()));
    Ok(())
}

pub async fn self_test_rejection_ends_run() -> anyhow::Result<()> {
    init_logger();
    let (ws, mut server) = MockWs::new();
    let mut config = test_config();
    config.heartbeat_interval = 0;
    config.id_tag = Some(String::from("NFC-1"));
    let cp = ChargePointAsync::new(ws, InstantTimers::default(), AutoAccept::new(), config);

    let script = async move {
        let authorize = next_call(&mut server, "Authorize").await?;
        server.to_cp.send(message(json!([3, authorize[1], {"idTagInfo": {"status": "Invalid"}}])))?;
        anyhow::Ok(server)
    };

    let (res, script) = tokio::join!(cp.run(), script);
    let _server = script?;
    assert_eq!(
        res,
        Err(EngineError::SelfTestRejected {
            action: "Authorize",
            id_tag: String::from("NFC-1"),
            status: AuthorizationStatus::Invalid,
        })
    );
    Ok(())
}

pub async fn refused_connection_ends_run() -> anyhow::Result<()> {
    init_logger();
    let (ws, _server) = MockWs::refusing();
    let cp = ChargePointAsync::new(ws, InstantTimers::default(), AutoAccept::new(), test_config());
    let res = tokio::time::timeout(Duration::from_secs(5), cp.run()).await?;
    assert_eq!(res, Ok(()));
    Ok(())
}
