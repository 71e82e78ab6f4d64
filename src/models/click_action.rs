use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::models::validation::validate_flag;

pub const ACTION_ACTIVITY: i32 = 1;
pub const ACTION_URL: i32 = 2;
pub const ACTION_INTENT: i32 = 3;

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// What happens when the user taps an Android notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickAction {
    #[serde(skip_serializing_if = "is_zero", default)]
    pub action_type: i32,

    #[serde(default)]
    pub browser: Browser,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub activity: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub intent: String,

    #[serde(default)]
    pub aty_attr: AtyAttr,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub package_name: String,
}

impl ClickAction {
    pub fn activity(activity: &str) -> Self {
        Self {
            activity: activity.to_string(),
            ..Self::default()
        }
    }

    pub fn url(url: &str, confirm: i32) -> Self {
        Self {
            action_type: ACTION_URL,
            browser: Browser {
                url: url.to_string(),
                confirm,
            },
            ..Self::default()
        }
    }

    pub fn intent(intent: &str) -> Self {
        Self {
            action_type: ACTION_INTENT,
            intent: intent.to_string(),
            ..Self::default()
        }
    }

    pub fn with_package_name(mut self, package_name: &str) -> Self {
        self.package_name = package_name.to_string();
        self
    }

    pub fn with_aty_attr(mut self, aty_attr: AtyAttr) -> Self {
        self.aty_attr = aty_attr;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.action_type {
            ACTION_ACTIVITY => Ok(()),
            ACTION_URL => {
                if self.browser.url.is_empty() {
                    return Err(anyhow!("URL action requires a non-empty url"));
                }
                validate_flag("browser confirm", self.browser.confirm)
            }
            ACTION_INTENT => {
                if self.intent.is_empty() {
                    return Err(anyhow!("intent action requires a non-empty intent"));
                }
                Ok(())
            }
            other => Err(anyhow!("unknown action_type {}", other)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for ClickAction {
    fn default() -> Self {
        Self {
            action_type: ACTION_ACTIVITY,
            browser: Browser::default(),
            activity: String::new(),
            intent: String::new(),
            aty_attr: AtyAttr::default(),
            package_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browser {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub url: String,

    #[serde(skip_serializing_if = "is_zero", default)]
    pub confirm: i32,
}

/// Activity launch flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtyAttr {
    #[serde(rename = "if", skip_serializing_if = "is_zero", default)]
    pub intent_flag: i32,

    #[serde(rename = "pf", skip_serializing_if = "is_zero", default)]
    pub pending_intent_flag: i32,
}
