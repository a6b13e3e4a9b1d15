use serde_json::Value;

use super::frame::{Call, CallError, CallResult};

pub const CALL: u64 = 2;
pub const CALL_RESULT: u64 = 3;
pub const CALL_ERROR: u64 = 4;

/// A frame that could not be decoded. `unique_id` is set whenever the
/// correlation id itself was readable, `message_type_id` whenever the leading
/// type number was.
#[derive(Debug, Clone, PartialEq)]
pub struct Invalid {
    pub message_type_id: Option<u64>,
    pub unique_id: Option<String>,
    pub message: String,
    pub err_msg: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallResponse<T> {
    CallResult(CallResult),
    CallError(CallError<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OcppMessage<T> {
    Call(Call),
    CallResponse(CallResponse<T>),
    Invalid(Invalid),
}

pub trait EncodeDecode {
    fn encode(&self) -> String;
}

impl<T> CallResponse<T> {
    pub fn unique_id(&self) -> &str {
        match self {
            CallResponse::CallResult(t) => &t.unique_id,
            CallResponse::CallError(t) => &t.unique_id,
        }
    }
}

impl<T: serde::de::DeserializeOwned> OcppMessage<T> {
    pub fn decode(message: &str) -> OcppMessage<T> {
        let invalid = |message_type_id: Option<u64>, unique_id: Option<String>, err_msg: String| {
            OcppMessage::Invalid(Invalid {
                message_type_id,
                unique_id,
                message: message.to_string(),
                err_msg,
            })
        };

        let arr = match serde_json::from_str::<Value>(message) {
            Ok(Value::Array(arr)) => arr,
            Ok(_) => return invalid(None, None, "Expected JSON array".into()),
            Err(e) => return invalid(None, None, format!("JSON parse error: {}", e)),
        };

        let unique_id = arr.get(1).and_then(Value::as_str).map(str::to_string);

        let message_type_id = arr.first().and_then(Value::as_u64);

        match message_type_id {
            Some(CALL) if arr.len() == 4 => match (unique_id, arr[2].as_str()) {
                (Some(unique_id), Some(action)) => OcppMessage::Call(Call {
                    unique_id,
                    action: action.to_string(),
                    payload: arr[3].clone(),
                }),
                (unique_id, _) => invalid(message_type_id, unique_id, "Invalid Call structure".into()),
            },
            Some(CALL_RESULT) if arr.len() == 3 => match unique_id {
                Some(unique_id) => OcppMessage::CallResponse(CallResponse::CallResult(CallResult {
                    unique_id,
                    payload: arr[2].clone(),
                })),
                None => invalid(message_type_id, None, "Invalid CallResult structure".into()),
            },
            Some(CALL_ERROR) if arr.len() == 5 => {
                let error_code = serde_json::from_value::<T>(arr[2].clone());
                match (unique_id, error_code, arr[3].as_str()) {
                    (Some(unique_id), Ok(error_code), Some(description)) => {
                        OcppMessage::CallResponse(CallResponse::CallError(CallError {
                            unique_id,
                            error_code,
                            error_description: description.to_string(),
                            error_details: arr[4].clone(),
                        }))
                    }
                    (unique_id, _, _) => invalid(message_type_id, unique_id, "Invalid CallError structure".into()),
                }
            }
            _ => invalid(message_type_id, unique_id, "Unknown or malformed message".into()),
        }
    }
}

impl EncodeDecode for Call {
    fn encode(&self) -> String {
        Value::Array(vec![
            Value::from(CALL),
            Value::from(self.unique_id.as_str()),
            Value::from(self.action.as_str()),
            self.payload.clone(),
        ])
        .to_string()
    }
}

impl EncodeDecode for CallResult {
    fn encode(&self) -> String {
        Value::Array(vec![
            Value::from(CALL_RESULT),
            Value::from(self.unique_id.as_str()),
            self.payload.clone(),
        ])
        .to_string()
    }
}

impl<T: ToString> EncodeDecode for CallError<T> {
    fn encode(&self) -> String {
        Value::Array(vec![
            Value::from(CALL_ERROR),
            Value::from(self.unique_id.as_str()),
            Value::from(self.error_code.to_string()),
            Value::from(self.error_description.as_str()),
            self.error_details.clone(),
        ])
        .to_string()
    }
}

impl<T: ToString> EncodeDecode for CallResponse<T> {
    fn encode(&self) -> String {
        match self {
            CallResponse::CallResult(t) => t.encode(),
            CallResponse::CallError(t) => t.encode(),
        }
    }
}
