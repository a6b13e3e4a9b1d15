use cpsim_client::v16::SignedMeterFormat;
use serde_json::{json, Value};

use crate::harness::harness::{test_config, CpHarness};

fn signed_stop(format: SignedMeterFormat) -> anyhow::Result<Value> {
    let mut config = test_config();
    config.signed_meter_values = true;
    config.signed_meter_format = format;
    let mut h = CpHarness::booted(config)?;
    h.start_confirmed("A", 1, 5)?;
    let actions = h.cp.stop_transaction(1, None, None);
    h.apply(actions);
    Ok(h.last_call("StopTransaction")?.payload()["transactionData"].clone())
}

pub async fn edl_evidence() -> anyhow::Result<()> {
    let data = signed_stop(SignedMeterFormat::Edl)?;
    assert_eq!(data.as_array().map(Vec::len), Some(2));

    let begin = &data[0]["sampledValue"][0];
    assert_eq!(begin["context"], json!("Transaction.Begin"));
    assert_eq!(begin["format"], json!("SignedData"));
    assert_eq!(begin["measurand"], json!("Energy.Active.Import.Register"));
    let envelope = begin["value"].as_str().unwrap_or_default();
    assert!(envelope.starts_with(r#"<?xml version="1.0" encoding="UTF-8" ?><signedMeterValue>"#));
    assert!(envelope.contains("<encodingMethod>EDL</encodingMethod>"));
    assert!(envelope.contains("<signatureMethod>ECDSA192SHA256</signatureMethod>"));

    let end = &data[1]["sampledValue"][0];
    assert_eq!(end["context"], json!("Transaction.End"));
    assert_ne!(end["value"], begin["value"]);
    Ok(())
}

fn ocmf_parts(value: &Value) -> anyhow::Result<(Value, Value)> {
    let raw = value.as_str().unwrap_or_default();
    let parts: Vec<&str> = raw.splitn(3, '|').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "OCMF");
    Ok((serde_json::from_str(parts[1])?, serde_json::from_str(parts[2])?))
}

pub async fn ocmf_evidence() -> anyhow::Result<()> {
    let data = signed_stop(SignedMeterFormat::Ocmf)?;
    let (begin, begin_sig) = ocmf_parts(&data[0]["sampledValue"][0]["value"])?;
    let (end, _) = ocmf_parts(&data[1]["sampledValue"][0]["value"])?;

    assert_eq!(begin["FV"], json!("1.0"));
    assert_eq!(begin["GI"], json!("NodeJS"));
    assert_eq!(begin["GS"], json!("0123456"));
    assert_eq!(begin["PG"], json!("T1"));
    assert_eq!(begin["RD"][0]["TX"], json!("B"));
    assert_eq!(begin["RD"][0]["RV"], json!(10.0));
    assert_eq!(begin["RD"][0]["RU"], json!("kWh"));
    assert_eq!(end["PG"], json!("T2"));
    assert_eq!(end["RD"][0]["TX"], json!("E"));
    assert_eq!(end["RD"][0]["RV"], json!(10.1));

    let signature = begin_sig["SD"].as_str().unwrap_or_default();
    assert_eq!(signature.len(), 128);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    Ok(())
}

pub async fn unsigned_by_default() -> anyhow::Result<()> {
    let mut h = CpHarness::booted(test_config())?;
    h.start_confirmed("A", 1, 5)?;
    let actions = h.cp.stop_transaction(1, None, None);
    h.apply(actions);
    assert!(h.last_call("StopTransaction")?.payload().get("transactionData").is_none());
    Ok(())
}
