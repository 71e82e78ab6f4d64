use anyhow::{Error, Result, anyhow};
use chrono::Utc;
use url::Url;

use crate::models::params::Params;

pub const HTTP_POST: &str = "POST";

/// Parameter that carries the signature; never part of its own input.
pub const SIGN_KEY: &str = "sign";

/// Builds the string that gets digested:
/// `METHOD host[:port] path` followed by every `key=value` in ascending key
/// order and the secret key, with no separators.
pub fn sign_content(
    method: &str,
    uri: &str,
    secret_key: &str,
    params: &Params,
) -> Result<String, Error> {
    let url = Url::parse(uri).map_err(|e| anyhow!("Invalid request URI '{}': {}", uri, e))?;

    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("Request URI '{}' has no host", uri))?;

    let mut content = method.to_uppercase();
    content.push_str(host);
    if let Some(port) = url.port() {
        content.push(':');
        content.push_str(&port.to_string());
    }
    content.push_str(url.path());

    for (key, value) in params.sorted() {
        if key == SIGN_KEY {
            continue;
        }
        content.push_str(key);
        content.push('=');
        content.push_str(value);
    }

    content.push_str(secret_key);

    Ok(content)
}

/// Lowercase hex MD5 over [`sign_content`].
pub fn sign(method: &str, uri: &str, secret_key: &str, params: &Params) -> Result<String, Error> {
    let content = sign_content(method, uri, secret_key, params)?;

    Ok(format!("{:x}", md5::compute(content.as_bytes())))
}

pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}
