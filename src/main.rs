use anyhow::{Error, Result, anyhow};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xinge_push::{clients::xinge::XingeClient, config::Config};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let client = XingeClient::new(&config)?;

    let res = client.query_device_count().await;

    if !res.is_success() {
        return Err(anyhow!(
            "Device count query failed ({}): {}",
            res.ret_code,
            res.err_msg.unwrap_or_default()
        ));
    }

    let device_num = res
        .result
        .and_then(|result| result.device_num)
        .unwrap_or_default();

    info!(access_id = config.xinge_access_id, device_num, "Configuration validated");

    Ok(())
}
