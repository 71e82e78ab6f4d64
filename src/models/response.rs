use serde::{Deserialize, Deserializer, Serialize};

/// `ret_code` carried by responses produced locally, without the platform.
pub const LOCAL_ERROR_CODE: i32 = -1;

/// Response envelope returned by every platform endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XgResponse {
    pub ret_code: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_msg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<XgResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XgResult {
    #[serde(
        default,
        deserialize_with = "deserialize_push_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub push_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_num: Option<i64>,

    #[serde(rename = "isReg", default, skip_serializing_if = "Option::is_none")]
    pub is_reg: Option<i64>,

    #[serde(
        rename = "connTimestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conn_timestamp: Option<i64>,

    #[serde(rename = "msgsNum", default, skip_serializing_if = "Option::is_none")]
    pub msgs_num: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<PushStatus>,
}

/// Progress of one push task, as reported by the status query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushStatus {
    #[serde(default)]
    pub push_id: String,

    #[serde(default)]
    pub status: i32,

    #[serde(default)]
    pub start_time: String,

    #[serde(default)]
    pub finished: i64,

    #[serde(default)]
    pub total: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PushIdRepr {
    Number(i64),
    Text(String),
}

// The platform sends push ids as strings; numbers are accepted too.
fn deserialize_push_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PushIdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PushIdRepr::Number(id)) => Ok(Some(id)),
        Some(PushIdRepr::Text(text)) if text.is_empty() => Ok(None),
        Some(PushIdRepr::Text(text)) => text
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl XgResponse {
    pub fn new(ret_code: i32, err_msg: String) -> Self {
        Self {
            ret_code,
            err_msg: Some(err_msg),
            result: None,
        }
    }

    pub fn error(err_msg: String) -> Self {
        Self::new(LOCAL_ERROR_CODE, err_msg)
    }

    pub fn is_success(&self) -> bool {
        self.ret_code == 0
    }

    /// Push id assigned by the platform, when present and positive.
    pub fn push_id(&self) -> Option<i64> {
        self.result
            .as_ref()
            .and_then(|result| result.push_id)
            .filter(|id| *id > 0)
    }
}
