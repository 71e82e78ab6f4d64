pub mod click_action;
pub mod endpoint;
pub mod message;
pub mod params;
pub mod platform;
pub mod response;
pub mod style;
pub mod tag_token_pair;
pub mod time_interval;
pub mod validation;
