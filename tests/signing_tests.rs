use anyhow::Result;
use xinge_push::{
    models::params::Params,
    utils::{sign, sign_content},
};

const URI: &str = "http://openapi.xg.qq.com/v2/push/single_device?x=1";

fn sample_params() -> Params {
    [
        ("timestamp", "1500000000"),
        ("access_id", "2100259827"),
        ("device_token", "abc"),
    ]
    .into_iter()
    .collect()
}

/// Test: Canonical content is method, host, path, sorted pairs, secret
#[test]
fn test_sign_content_layout() -> Result<()> {
    let content = sign_content("post", URI, "secret", &sample_params())?;

    assert_eq!(
        content,
        "POSTopenapi.xg.qq.com/v2/push/single_device\
         access_id=2100259827device_token=abctimestamp=1500000000secret"
    );

    Ok(())
}

/// Test: Signature matches a precomputed MD5 digest
#[test]
fn test_sign_known_digest() -> Result<()> {
    let signature = sign("POST", URI, "secret", &sample_params())?;

    assert_eq!(signature, "e319d0594a1fcb68512de8386dbe64ac");

    Ok(())
}

/// Test: Repeated signing yields identical output
#[test]
fn test_sign_is_deterministic() -> Result<()> {
    let params = sample_params();

    let first = sign("POST", URI, "secret", &params)?;
    for _ in 0..10 {
        assert_eq!(sign("POST", URI, "secret", &params)?, first);
    }

    Ok(())
}

/// Test: Insertion order does not affect the signature
#[test]
fn test_sign_ignores_insertion_order() -> Result<()> {
    let mut forward = Params::new();
    let mut backward = Params::new();
    let pairs = [("a", "1"), ("b", "2"), ("c", "3"), ("message", "{\"k\":1}")];

    for (key, value) in pairs {
        forward.set(key, value);
    }
    for (key, value) in pairs.iter().rev() {
        backward.set(key, value);
    }

    assert_eq!(
        sign("POST", URI, "secret", &forward)?,
        sign("POST", URI, "secret", &backward)?
    );

    Ok(())
}

/// Test: Changing a value, a key's presence or the secret changes the signature
#[test]
fn test_sign_changes_with_inputs() -> Result<()> {
    let base = sign("POST", URI, "secret", &sample_params())?;

    let mut changed_value = sample_params();
    changed_value.set("device_token", "abd");
    assert_ne!(sign("POST", URI, "secret", &changed_value)?, base);

    let mut extra_key = sample_params();
    extra_key.set("account", "");
    assert_ne!(sign("POST", URI, "secret", &extra_key)?, base);

    let mut missing_key = sample_params();
    missing_key.remove("device_token");
    assert_ne!(sign("POST", URI, "secret", &missing_key)?, base);

    assert_ne!(sign("POST", URI, "other", &sample_params())?, base);

    Ok(())
}

/// Test: The sign parameter is never part of its own input
#[test]
fn test_sign_excludes_itself() -> Result<()> {
    let base = sign("POST", URI, "secret", &sample_params())?;

    let mut with_sign = sample_params();
    with_sign.set("sign", "stale");

    assert_eq!(sign("POST", URI, "secret", &with_sign)?, base);

    Ok(())
}

/// Test: Scheme and query are excluded, explicit ports are kept
#[test]
fn test_sign_uses_host_and_path_only() -> Result<()> {
    let params = sample_params();

    assert_eq!(
        sign("POST", "http://openapi.xg.qq.com/v2/push/single_device", "secret", &params)?,
        sign("POST", "https://openapi.xg.qq.com/v2/push/single_device?a=b", "secret", &params)?
    );

    let content = sign_content("POST", "http://127.0.0.1:8080/v2/x", "s", &Params::new())?;
    assert_eq!(content, "POST127.0.0.1:8080/v2/xs");

    Ok(())
}

/// Test: Keys sort byte-wise, so uppercase comes before lowercase
#[test]
fn test_sign_sorts_bytewise() -> Result<()> {
    let params: Params = [("b", "2"), ("B", "1"), ("a_b", "3"), ("ab", "4")]
        .into_iter()
        .collect();

    let content = sign_content("GET", "http://h/p", "", &params)?;

    assert_eq!(content, "GETh/pB=1a_b=3ab=4b=2");

    Ok(())
}

/// Test: An unparseable URI is an error rather than a panic
#[test]
fn test_sign_rejects_invalid_uri() {
    assert!(sign("POST", "not a uri", "secret", &sample_params()).is_err());
}
