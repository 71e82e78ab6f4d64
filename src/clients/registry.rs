use std::collections::HashMap;

use anyhow::{Error, Result, anyhow};
use tracing::info;

use crate::{clients::xinge::XingeClient, config::Config};

/// Caller-owned cache of clients, one per access id.
///
/// A cached client is only reused when the secret key matches; switching
/// credentials for an access id goes through [`ClientRegistry::replace`].
pub struct ClientRegistry {
    template: Config,
    clients: HashMap<i64, XingeClient>,
}

impl ClientRegistry {
    /// `config` supplies the API URL and timeout for every client created.
    pub fn new(config: &Config) -> Self {
        Self {
            template: config.clone(),
            clients: HashMap::new(),
        }
    }

    pub fn get_or_create(
        &mut self,
        access_id: i64,
        secret_key: &str,
    ) -> Result<&XingeClient, Error> {
        let same_secret = self
            .clients
            .get(&access_id)
            .map(|existing| existing.has_secret_key(secret_key));

        match same_secret {
            Some(true) => {}
            Some(false) => {
                return Err(anyhow!(
                    "access id {} is already registered with a different secret key",
                    access_id
                ));
            }
            None => {
                let client = self.build(access_id, secret_key)?;
                self.clients.insert(access_id, client);
            }
        }

        self.clients
            .get(&access_id)
            .ok_or_else(|| anyhow!("client for access id {} is missing", access_id))
    }

    pub fn replace(&mut self, access_id: i64, secret_key: &str) -> Result<&XingeClient, Error> {
        let client = self.build(access_id, secret_key)?;

        if self.clients.insert(access_id, client).is_some() {
            info!(access_id, "Replaced cached XG client credentials");
        }

        self.clients
            .get(&access_id)
            .ok_or_else(|| anyhow!("client for access id {} is missing", access_id))
    }

    pub fn get(&self, access_id: i64) -> Option<&XingeClient> {
        self.clients.get(&access_id)
    }

    pub fn remove(&mut self, access_id: i64) -> Option<XingeClient> {
        self.clients.remove(&access_id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn build(&self, access_id: i64, secret_key: &str) -> Result<XingeClient, Error> {
        let config = Config {
            xinge_access_id: access_id,
            xinge_secret_key: secret_key.to_string(),
            ..self.template.clone()
        };

        XingeClient::new(&config)
    }
}
