use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;

use crate::models::platform::IOS_MIN_ACCESS_ID;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Three days.
pub const MAX_EXPIRE_SECONDS: i64 = 3 * 24 * 60 * 60;

/// Furthest day, counted from the first send, a looping push may reach.
pub const MAX_LOOP_DAYS: i64 = 15;

pub fn validate_token(token: &str, access_id: i64) -> Result<()> {
    if token.is_empty() {
        return Err(anyhow!("Device token cannot be empty"));
    }

    let len = token.len();

    if access_id >= IOS_MIN_ACCESS_ID {
        if len != 64 {
            return Err(anyhow!(
                "Device token must be 64 characters for iOS applications (got {})",
                len
            ));
        }
    } else if len != 40 && len != 64 {
        return Err(anyhow!(
            "Device token must be 40 or 64 characters (got {})",
            len
        ));
    }

    Ok(())
}

pub fn validate_flag(name: &str, value: i32) -> Result<()> {
    if value != 0 && value != 1 {
        return Err(anyhow!("{} must be 0 or 1 (got {})", name, value));
    }

    Ok(())
}

pub fn validate_expire_time(expire_time: i64) -> Result<()> {
    if !(0..=MAX_EXPIRE_SECONDS).contains(&expire_time) {
        return Err(anyhow!(
            "expire_time must be within 0..={} seconds (got {})",
            MAX_EXPIRE_SECONDS,
            expire_time
        ));
    }

    Ok(())
}

pub fn validate_send_time(send_time: &str) -> Result<()> {
    NaiveDateTime::parse_from_str(send_time, DATETIME_FORMAT)
        .map_err(|e| anyhow!("send_time '{}' is not YYYY-MM-DD HH:MM:SS: {}", send_time, e))?;

    Ok(())
}

pub fn validate_loop(loop_interval: i32, loop_times: i32) -> Result<()> {
    if loop_interval <= 0 || loop_times <= 0 {
        return Ok(());
    }

    let last_day = (i64::from(loop_times) - 1) * i64::from(loop_interval) + 1;

    if last_day > MAX_LOOP_DAYS {
        return Err(anyhow!(
            "loop of {} times every {} days ends on day {}, beyond {}",
            loop_times,
            loop_interval,
            last_day,
            MAX_LOOP_DAYS
        ));
    }

    Ok(())
}
