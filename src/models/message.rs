use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use chrono::Local;
use serde_json::{Map, Value as JsonValue, json};

use crate::models::{
    click_action::ClickAction,
    platform::IOSENV_DEV,
    style::Style,
    time_interval::TimeInterval,
    validation::{
        DATETIME_FORMAT, validate_expire_time, validate_flag, validate_loop, validate_send_time,
    },
};

pub const TYPE_NOTIFICATION: i32 = 1;
pub const TYPE_MESSAGE: i32 = 2;
pub const TYPE_APNS_NOTIFICATION: i32 = 11;
pub const TYPE_REMOTE_NOTIFICATION: i32 = 12;

/// Caller-supplied key/value data passed through verbatim.
pub type CustomContent = Map<String, JsonValue>;

fn now_send_time() -> String {
    Local::now().format(DATETIME_FORMAT).to_string()
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|raw| !raw.is_empty())
}

fn validate_accept_times(accept_time: &[TimeInterval]) -> Result<()> {
    accept_time.iter().try_for_each(TimeInterval::validate)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AndroidMessage {
    pub title: String,
    pub content: String,
    pub expire_time: i64,
    pub send_time: String,
    pub accept_time: Vec<TimeInterval>,
    pub message_type: i32,
    pub multi_pkg: i32,
    pub style: Style,
    pub action: ClickAction,
    pub custom: CustomContent,
    pub raw: Option<String>,
    pub loop_interval: i32,
    pub loop_times: i32,
}

impl AndroidMessage {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expire_time: 0,
            send_time: now_send_time(),
            accept_time: Vec::new(),
            message_type: TYPE_NOTIFICATION,
            multi_pkg: 0,
            style: Style::new(0),
            action: ClickAction::default(),
            custom: CustomContent::new(),
            raw: None,
            loop_interval: -1,
            loop_times: -1,
        }
    }

    pub fn easy(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            ..Self::new()
        }
    }

    pub fn with_type(mut self, message_type: i32) -> Self {
        self.message_type = message_type;
        self
    }

    pub fn with_multi_pkg(mut self, multi_pkg: i32) -> Self {
        self.multi_pkg = multi_pkg;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_action(mut self, action: ClickAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_custom(mut self, custom: CustomContent) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_expire_time(mut self, expire_time: i64) -> Self {
        self.expire_time = expire_time;
        self
    }

    pub fn with_send_time(mut self, send_time: &str) -> Self {
        self.send_time = send_time.to_string();
        self
    }

    pub fn with_loop(mut self, loop_interval: i32, loop_times: i32) -> Self {
        self.loop_interval = loop_interval;
        self.loop_times = loop_times;
        self
    }

    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.to_string());
        self
    }

    pub fn add_accept_time(&mut self, accept_time: TimeInterval) {
        self.accept_time.push(accept_time);
    }

    pub fn validate(&self) -> Result<()> {
        if non_empty(&self.raw).is_some() {
            return Ok(());
        }

        if !(TYPE_NOTIFICATION..=TYPE_MESSAGE).contains(&self.message_type) {
            return Err(anyhow!("unknown Android message type {}", self.message_type));
        }

        validate_flag("multi_pkg", self.multi_pkg)?;

        if self.message_type == TYPE_NOTIFICATION {
            self.style.validate()?;
            self.action.validate()?;
        }

        validate_expire_time(self.expire_time)?;
        validate_send_time(&self.send_time)?;
        validate_accept_times(&self.accept_time)?;
        validate_loop(self.loop_interval, self.loop_times)?;

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn to_json(&self) -> String {
        if let Some(raw) = non_empty(&self.raw) {
            return raw.to_string();
        }

        self.build_json().unwrap_or_else(|_| "{}".to_string())
    }

    // Top-level keys are emitted in ascending order.
    fn build_json(&self) -> Result<String, serde_json::Error> {
        let mut body = BTreeMap::new();

        match self.message_type {
            TYPE_NOTIFICATION => {
                body.insert("title".to_string(), json!(self.title));
                body.insert("content".to_string(), json!(self.content));

                if let JsonValue::Object(style) = serde_json::to_value(&self.style)? {
                    body.extend(style);
                }

                body.insert("action".to_string(), serde_json::to_value(&self.action)?);
            }
            TYPE_MESSAGE => {
                body.insert("title".to_string(), json!(self.title));
                body.insert("content".to_string(), json!(self.content));
            }
            _ => {}
        }

        if !self.accept_time.is_empty() {
            body.insert(
                "accept_time".to_string(),
                serde_json::to_value(&self.accept_time)?,
            );
        }

        if !self.custom.is_empty() {
            body.insert(
                "custom_content".to_string(),
                JsonValue::Object(self.custom.clone()),
            );
        }

        serde_json::to_string(&body)
    }
}

impl Default for AndroidMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IosMessage {
    pub expire_time: i64,
    pub send_time: String,
    pub accept_time: Vec<TimeInterval>,
    pub message_type: i32,
    pub custom: CustomContent,
    pub raw: Option<String>,
    pub alert: String,
    /// Structured alert; takes precedence over `alert` when non-empty.
    pub alert_list: Vec<String>,
    pub badge: i32,
    pub sound: String,
    pub category: String,
    pub loop_interval: i32,
    pub loop_times: i32,
    pub environment: i32,
}

impl IosMessage {
    pub fn new() -> Self {
        Self {
            expire_time: 0,
            send_time: now_send_time(),
            accept_time: Vec::new(),
            message_type: TYPE_APNS_NOTIFICATION,
            custom: CustomContent::new(),
            raw: None,
            alert: String::new(),
            alert_list: Vec::new(),
            badge: 1,
            sound: "beep.wav".to_string(),
            category: String::new(),
            loop_interval: -1,
            loop_times: -1,
            environment: IOSENV_DEV,
        }
    }

    pub fn easy(alert: &str, environment: i32) -> Self {
        Self {
            alert: alert.to_string(),
            environment,
            ..Self::new()
        }
    }

    pub fn with_type(mut self, message_type: i32) -> Self {
        self.message_type = message_type;
        self
    }

    pub fn with_alert_list(mut self, alert_list: Vec<String>) -> Self {
        self.alert_list = alert_list;
        self
    }

    pub fn with_badge(mut self, badge: i32) -> Self {
        self.badge = badge;
        self
    }

    pub fn with_sound(mut self, sound: &str) -> Self {
        self.sound = sound.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_environment(mut self, environment: i32) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_custom(mut self, custom: CustomContent) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_expire_time(mut self, expire_time: i64) -> Self {
        self.expire_time = expire_time;
        self
    }

    pub fn with_send_time(mut self, send_time: &str) -> Self {
        self.send_time = send_time.to_string();
        self
    }

    pub fn with_loop(mut self, loop_interval: i32, loop_times: i32) -> Self {
        self.loop_interval = loop_interval;
        self.loop_times = loop_times;
        self
    }

    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.to_string());
        self
    }

    pub fn add_accept_time(&mut self, accept_time: TimeInterval) {
        self.accept_time.push(accept_time);
    }

    pub fn validate(&self) -> Result<()> {
        if non_empty(&self.raw).is_some() {
            return Ok(());
        }

        if !(TYPE_APNS_NOTIFICATION..=TYPE_REMOTE_NOTIFICATION).contains(&self.message_type) {
            return Err(anyhow!("unknown iOS message type {}", self.message_type));
        }

        validate_expire_time(self.expire_time)?;
        validate_send_time(&self.send_time)?;
        validate_accept_times(&self.accept_time)?;

        // Silent pushes carry no alert.
        if self.message_type == TYPE_REMOTE_NOTIFICATION {
            return Ok(());
        }

        if self.alert.is_empty() && self.alert_list.is_empty() {
            return Err(anyhow!("iOS notification requires an alert"));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn to_json(&self) -> String {
        if let Some(raw) = non_empty(&self.raw) {
            return raw.to_string();
        }

        self.build_json().unwrap_or_else(|_| "{}".to_string())
    }

    // Top-level keys are emitted in ascending order.
    fn build_json(&self) -> Result<String, serde_json::Error> {
        let mut body = BTreeMap::new();

        if !self.custom.is_empty() {
            body.insert("custom".to_string(), JsonValue::Object(self.custom.clone()));
        }

        if !self.accept_time.is_empty() {
            body.insert(
                "accept_time".to_string(),
                serde_json::to_value(&self.accept_time)?,
            );
        }

        let mut aps = BTreeMap::new();

        match self.message_type {
            TYPE_REMOTE_NOTIFICATION => {
                aps.insert("content-available".to_string(), json!(1));
            }
            TYPE_APNS_NOTIFICATION => {
                if self.alert_list.is_empty() {
                    aps.insert("alert".to_string(), json!(self.alert));
                } else {
                    aps.insert("alert".to_string(), json!(self.alert_list));
                }

                if self.badge != 0 {
                    aps.insert("badge".to_string(), json!(self.badge));
                }

                if !self.sound.is_empty() {
                    aps.insert("sound".to_string(), json!(self.sound));
                }

                // Omitted when empty, like sound.
                if !self.category.is_empty() {
                    aps.insert("category".to_string(), json!(self.category));
                }
            }
            _ => {}
        }

        body.insert("aps".to_string(), serde_json::to_value(aps)?);

        serde_json::to_string(&body)
    }
}

impl Default for IosMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// A push payload for one of the two device families.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Android(AndroidMessage),
    Ios(IosMessage),
}

impl Message {
    pub fn validate(&self) -> Result<()> {
        match self {
            Message::Android(message) => message.validate(),
            Message::Ios(message) => message.validate(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn to_json(&self) -> String {
        match self {
            Message::Android(message) => message.to_json(),
            Message::Ios(message) => message.to_json(),
        }
    }

    pub fn message_type(&self) -> i32 {
        match self {
            Message::Android(message) => message.message_type,
            Message::Ios(message) => message.message_type,
        }
    }

    pub fn multi_pkg(&self) -> i32 {
        match self {
            Message::Android(message) => message.multi_pkg,
            Message::Ios(_) => 1,
        }
    }

    /// Android messages have no delivery environment and report 0.
    pub fn environment(&self) -> i32 {
        match self {
            Message::Android(_) => 0,
            Message::Ios(message) => message.environment,
        }
    }

    pub fn loop_interval(&self) -> i32 {
        match self {
            Message::Android(message) => message.loop_interval,
            Message::Ios(message) => message.loop_interval,
        }
    }

    pub fn loop_times(&self) -> i32 {
        match self {
            Message::Android(message) => message.loop_times,
            Message::Ios(message) => message.loop_times,
        }
    }
}

impl From<AndroidMessage> for Message {
    fn from(message: AndroidMessage) -> Self {
        Message::Android(message)
    }
}

impl From<IosMessage> for Message {
    fn from(message: IosMessage) -> Self {
        Message::Ios(message)
    }
}
