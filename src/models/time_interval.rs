use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: i32,
    pub min: i32,
}

impl ClockTime {
    pub fn new(hour: i32, min: i32) -> Self {
        Self { hour, min }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=23).contains(&self.hour) {
            return Err(anyhow!("hour must be within 0..=23 (got {})", self.hour));
        }

        if !(0..=59).contains(&self.min) {
            return Err(anyhow!("minute must be within 0..=59 (got {})", self.min));
        }

        Ok(())
    }
}

/// Daily window during which a device accepts pushes.
///
/// Start and end are not ordered against each other; a window such as
/// 22:00 to 06:00 is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeInterval {
    pub fn new(start_hour: i32, start_min: i32, end_hour: i32, end_min: i32) -> Self {
        Self {
            start: ClockTime::new(start_hour, start_min),
            end: ClockTime::new(end_hour, end_min),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.start
            .validate()
            .map_err(|e| anyhow!("accept_time start: {}", e))?;
        self.end
            .validate()
            .map_err(|e| anyhow!("accept_time end: {}", e))?;

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for TimeInterval {
    fn default() -> Self {
        Self::new(0, 0, 23, 59)
    }
}
