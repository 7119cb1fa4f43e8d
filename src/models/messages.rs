use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ControllerOnMessage {}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ControllerOffMessage {}

/// Requested cursor change. Absent fields keep the room's current value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SetStateMessage {
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub pdf_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub page: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PingMessage {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ReceivedMessage {
    #[serde(rename = "controller_on")]
    ControllerOn(ControllerOnMessage),
    #[serde(rename = "controller_off")]
    ControllerOff(ControllerOffMessage),
    #[serde(rename = "set_state")]
    SetState(SetStateMessage),
    #[serde(rename = "ping")]
    Ping(PingMessage),
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HelloMessage {
    pub client_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SnapshotMessage {
    pub controller_id: Option<String>,
    pub pdf_id: u32,
    pub page: u32,
    pub total_pdfs: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ControllerChangedMessage {
    pub controller_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StateChangedMessage {
    pub pdf_id: u32,
    pub page: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum SendMessage {
    #[serde(rename = "hello")]
    Hello(HelloMessage),
    #[serde(rename = "snapshot")]
    Snapshot(SnapshotMessage),
    #[serde(rename = "controller_changed")]
    ControllerChanged(ControllerChangedMessage),
    #[serde(rename = "state_changed")]
    StateChanged(StateChangedMessage),
    #[serde(rename = "error")]
    Error(ErrorMessage),
    #[serde(rename = "pong")]
    Pong,
}

impl SendMessage {
    pub fn hello(client_id: impl Into<String>) -> Self {
        SendMessage::Hello(HelloMessage { client_id: client_id.into() })
    }

    pub fn controller_changed(controller_id: Option<String>) -> Self {
        SendMessage::ControllerChanged(ControllerChangedMessage { controller_id })
    }

    pub fn state_changed(pdf_id: u32, page: u32) -> Self {
        SendMessage::StateChanged(StateChangedMessage { pdf_id, page })
    }

    pub fn error(message: impl Into<String>) -> Self {
        SendMessage::Error(ErrorMessage { message: message.into() })
    }

    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Accepts integers, floats (truncated) and numeric strings. Anything else reads as absent.
fn deserialize_lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_int))
}

fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}
