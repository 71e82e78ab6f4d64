use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::validation::validate_flag;

/// Android notification presentation.
///
/// Every field is written into the notification body, zero values included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub builder_id: i32,
    pub ring: i32,
    pub vibrate: i32,
    pub clearable: i32,
    pub n_id: i32,
    pub ring_raw: String,
    pub lights: i32,
    pub icon_type: i32,
    pub icon_res: String,
    pub style_id: i32,
    pub small_icon: String,
}

impl Style {
    pub fn new(builder_id: i32) -> Self {
        Self::base(builder_id, 0, 1, 1, 0)
    }

    pub fn base(builder_id: i32, ring: i32, vibrate: i32, clearable: i32, n_id: i32) -> Self {
        Self {
            builder_id,
            ring,
            vibrate,
            clearable,
            n_id,
            ring_raw: String::new(),
            lights: 1,
            icon_type: 0,
            icon_res: String::new(),
            style_id: 1,
            small_icon: String::new(),
        }
    }

    pub fn with_lights(mut self, lights: i32) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_icon_type(mut self, icon_type: i32) -> Self {
        self.icon_type = icon_type;
        self
    }

    pub fn with_style_id(mut self, style_id: i32) -> Self {
        self.style_id = style_id;
        self
    }

    pub fn with_ring_raw(mut self, ring_raw: &str) -> Self {
        self.ring_raw = ring_raw.to_string();
        self
    }

    pub fn with_icon_res(mut self, icon_res: &str) -> Self {
        self.icon_res = icon_res.to_string();
        self
    }

    pub fn with_small_icon(mut self, small_icon: &str) -> Self {
        self.small_icon = small_icon.to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_flag("ring", self.ring)?;
        validate_flag("vibrate", self.vibrate)?;
        validate_flag("clearable", self.clearable)?;
        validate_flag("lights", self.lights)?;
        validate_flag("icon_type", self.icon_type)?;
        validate_flag("style_id", self.style_id)?;

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(0)
    }
}
