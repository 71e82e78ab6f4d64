use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    models::{
        endpoint::Endpoint,
        message::{AndroidMessage, IosMessage, Message},
        params::Params,
        platform::{DeviceType, IOS_MIN_ACCESS_ID, is_ios_environment},
        response::XgResponse,
        tag_token_pair::TagTokenPair,
        validation::validate_token,
    },
    utils::{HTTP_POST, SIGN_KEY, sign, unix_timestamp},
};

/// Expiry sent with every push, overriding the message's own.
pub const PUSH_EXPIRE_SECONDS: i64 = 600;

pub const TAG_OP_AND: &str = "AND";
pub const TAG_OP_OR: &str = "OR";

fn invalid_param(reason: &str) -> XgResponse {
    warn!(reason, "Rejecting request with invalid parameters");
    XgResponse::error(format!("param invalid: {}", reason))
}

fn json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| anyhow!("json marshal fail: {}", e))
}

/// Client for one XG application, identified by its access id.
///
/// Every operation performs at most one HTTP request. Failures of any kind
/// come back as an [`XgResponse`] with a non-zero `ret_code`.
pub struct XingeClient {
    http_client: Client,
    access_id: i64,
    secret_key: String,
    base_url: String,
}

impl XingeClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if config.request_timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_seconds));
        }

        let http_client = builder
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(
            access_id = config.xinge_access_id,
            base_url = %config.xinge_api_url,
            "XG client initialized"
        );

        Ok(Self {
            http_client,
            access_id: config.xinge_access_id,
            secret_key: config.xinge_secret_key.clone(),
            base_url: config.xinge_api_url.clone(),
        })
    }

    pub fn access_id(&self) -> i64 {
        self.access_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn has_secret_key(&self, secret_key: &str) -> bool {
        self.secret_key == secret_key
    }

    pub fn validate_token(&self, token: &str) -> bool {
        validate_token(token, self.access_id).is_ok()
    }

    pub fn resolve_platform(&self, message: &Message) -> Result<DeviceType, Error> {
        if self.access_id <= 0 {
            return Err(anyhow!(
                "access id {} does not belong to a known platform",
                self.access_id
            ));
        }

        if self.access_id < IOS_MIN_ACCESS_ID {
            return Ok(DeviceType::Android);
        }

        if is_ios_environment(message.environment()) {
            return Ok(DeviceType::Ios);
        }

        Err(anyhow!(
            "unknown message environment {} for iOS access id {}",
            message.environment(),
            self.access_id
        ))
    }

    /// Adds the message-derived parameters and sends the push.
    pub async fn push(
        &self,
        endpoint: Endpoint,
        message: &Message,
        mut params: Params,
    ) -> XgResponse {
        let device_type = match self.resolve_platform(message) {
            Ok(device_type) => device_type,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Cannot resolve target platform");
                return XgResponse::error(e.to_string());
            }
        };

        debug!(endpoint = %endpoint, device_type = %device_type, "Preparing push");

        params.set("message_type", message.message_type());
        params.set("environment", message.environment());
        params.set("multi_pkg", message.multi_pkg());
        params.set("expire_time", PUSH_EXPIRE_SECONDS);
        params.set("send_time", unix_timestamp());

        self.call_restful(endpoint, params).await
    }

    /// Signs `params` and POSTs them to `endpoint`.
    pub async fn call_restful(&self, endpoint: Endpoint, mut params: Params) -> XgResponse {
        let url = endpoint.url(&self.base_url);

        params.remove(SIGN_KEY);
        params.set("access_id", self.access_id);
        params.set("timestamp", unix_timestamp());

        let signature = match sign(HTTP_POST, &url, &self.secret_key, &params) {
            Ok(signature) => signature,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Failed to sign request");
                return XgResponse::error(format!("sign request fail: {}", e));
            }
        };
        params.set(SIGN_KEY, signature);

        debug!(
            endpoint = %endpoint,
            param_count = params.len(),
            "Calling XG endpoint"
        );

        let response = match self.http_client.post(&url).form(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "XG request failed");
                return XgResponse::error(format!("http post data err: {}", e));
            }
        };

        let status = response.status();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Failed to read XG response");
                return XgResponse::error(format!("read response data err: {}", e));
            }
        };

        match serde_json::from_slice::<XgResponse>(&body) {
            Ok(res) => {
                if res.is_success() {
                    info!(endpoint = %endpoint, "XG request succeeded");
                } else {
                    warn!(
                        endpoint = %endpoint,
                        ret_code = res.ret_code,
                        err_msg = res.err_msg.as_deref().unwrap_or_default(),
                        "XG rejected request"
                    );
                }
                res
            }
            Err(e) => {
                warn!(
                    endpoint = %endpoint,
                    http_status = %status,
                    error = %e,
                    "Failed to decode XG response"
                );
                XgResponse::error(format!("json unmarshal fail: {}", e))
            }
        }
    }

    pub async fn push_single_device(&self, device_token: &str, message: &Message) -> XgResponse {
        if device_token.is_empty() {
            return invalid_param("device token is empty");
        }

        let mut params = Params::new();
        params.set("device_token", device_token);
        params.set("message", message.to_json());

        self.push(Endpoint::PushSingleDevice, message, params).await
    }

    pub async fn push_single_account(&self, account: &str, message: &Message) -> XgResponse {
        if account.is_empty() {
            return invalid_param("account is empty");
        }

        let mut params = Params::new();
        params.set("account", account);
        params.set("message", message.to_json());

        self.push(Endpoint::PushSingleAccount, message, params).await
    }

    /// Pushes to up to ten thousand accounts; larger audiences should go
    /// through [`Self::create_multipush`].
    pub async fn push_account_list(
        &self,
        account_list: &[String],
        message: &Message,
    ) -> XgResponse {
        if account_list.is_empty() {
            return invalid_param("account list is empty");
        }

        let account_list = match json_string(account_list) {
            Ok(account_list) => account_list,
            Err(e) => return XgResponse::error(e.to_string()),
        };

        let mut params = Params::new();
        params.set("account_list", account_list);
        params.set("message", message.to_json());

        self.push(Endpoint::PushAccountList, message, params).await
    }

    pub async fn push_all_devices(&self, message: &Message) -> XgResponse {
        let mut params = Params::new();
        params.set("message", message.to_json());

        self.push(Endpoint::PushAllDevice, message, params).await
    }

    /// Pushes to devices carrying the given tags, combined with `AND` or `OR`.
    pub async fn push_tags(
        &self,
        tag_list: &[String],
        tag_op: &str,
        message: &Message,
    ) -> XgResponse {
        if tag_op != TAG_OP_AND && tag_op != TAG_OP_OR {
            return invalid_param("tag operation must be AND or OR");
        }

        if tag_list.is_empty() {
            return invalid_param("tag list is empty");
        }

        if let Err(e) = message.validate() {
            return invalid_param(&format!("message is invalid: {}", e));
        }

        let tags_list = match json_string(tag_list) {
            Ok(tags_list) => tags_list,
            Err(e) => return XgResponse::error(e.to_string()),
        };

        let mut params = Params::new();
        params.set("tags_list", tags_list);
        params.set("tags_op", tag_op);
        params.set("message", message.to_json());

        if message.loop_interval() > 0 && message.loop_times() > 0 {
            params.set("loop_interval", message.loop_interval());
            params.set("loop_times", message.loop_times());
        }

        self.push(Endpoint::PushTags, message, params).await
    }

    /// Creates a batch push task. Recipients are added afterwards with
    /// [`Self::push_account_list_multiple`] or
    /// [`Self::push_device_list_multiple`]; the new id is in
    /// [`XgResponse::push_id`].
    pub async fn create_multipush(&self, message: &Message) -> XgResponse {
        if let Err(e) = message.validate() {
            return invalid_param(&format!("message is invalid: {}", e));
        }

        let mut params = Params::new();
        params.set("message", message.to_json());

        let res = self.push(Endpoint::CreateMultipush, message, params).await;

        if res.is_success() && res.push_id().is_none() {
            warn!("Batch push created without a push id");
        }

        res
    }

    pub async fn push_account_list_multiple(
        &self,
        push_id: i64,
        account_list: &[String],
    ) -> XgResponse {
        self.push_list_multiple(
            Endpoint::PushAccountListMultiple,
            "account_list",
            push_id,
            account_list,
        )
        .await
    }

    pub async fn push_device_list_multiple(
        &self,
        push_id: i64,
        device_list: &[String],
    ) -> XgResponse {
        self.push_list_multiple(
            Endpoint::PushDeviceListMultiple,
            "device_list",
            push_id,
            device_list,
        )
        .await
    }

    async fn push_list_multiple(
        &self,
        endpoint: Endpoint,
        list_key: &str,
        push_id: i64,
        list: &[String],
    ) -> XgResponse {
        if push_id <= 0 {
            return invalid_param("push id must be positive");
        }

        if list.is_empty() {
            return invalid_param(&format!("{} is empty", list_key));
        }

        let list = match json_string(list) {
            Ok(list) => list,
            Err(e) => return XgResponse::error(e.to_string()),
        };

        let mut params = Params::new();
        params.set("push_id", push_id);
        params.set(list_key, list);

        self.call_restful(endpoint, params).await
    }

    pub async fn query_push_status(&self, push_ids: &[String]) -> XgResponse {
        if push_ids.is_empty() {
            return invalid_param("push id list is empty");
        }

        let push_ids: Vec<_> = push_ids
            .iter()
            .map(|push_id| json!({ "push_id": push_id }))
            .collect();

        let push_ids = match json_string(&push_ids) {
            Ok(push_ids) => push_ids,
            Err(e) => return XgResponse::error(e.to_string()),
        };

        let mut params = Params::new();
        params.set("push_ids", push_ids);

        self.call_restful(Endpoint::QueryPushStatus, params).await
    }

    pub async fn query_device_count(&self) -> XgResponse {
        self.call_restful(Endpoint::QueryDeviceCount, Params::new())
            .await
    }

    pub async fn query_tags(&self, start: i64, limit: i64) -> XgResponse {
        if start < 0 || limit <= 0 {
            return invalid_param("start must be non-negative and limit positive");
        }

        let mut params = Params::new();
        params.set("start", start);
        params.set("limit", limit);

        self.call_restful(Endpoint::QueryTags, params).await
    }

    pub async fn query_tags_before_100(&self) -> XgResponse {
        self.query_tags(0, 100).await
    }

    pub async fn query_tag_token_num(&self, tag: &str) -> XgResponse {
        if tag.is_empty() {
            return invalid_param("tag is empty");
        }

        let mut params = Params::new();
        params.set("tag", tag);

        self.call_restful(Endpoint::QueryTagTokenNum, params).await
    }

    pub async fn query_token_tags(&self, device_token: &str) -> XgResponse {
        if device_token.is_empty() {
            return invalid_param("device token is empty");
        }

        let mut params = Params::new();
        params.set("device_token", device_token);

        self.call_restful(Endpoint::QueryTokenTags, params).await
    }

    /// Cancels a scheduled push that has not been sent yet.
    pub async fn cancel_timing_push(&self, push_id: &str) -> XgResponse {
        if push_id.is_empty() {
            return invalid_param("push id is empty");
        }

        let mut params = Params::new();
        params.set("push_id", push_id);

        self.call_restful(Endpoint::CancelTimingPush, params).await
    }

    pub async fn batch_set_tag(&self, pairs: &[TagTokenPair]) -> XgResponse {
        self.batch_tag(Endpoint::BatchSetTag, pairs).await
    }

    pub async fn batch_del_tag(&self, pairs: &[TagTokenPair]) -> XgResponse {
        self.batch_tag(Endpoint::BatchDelTag, pairs).await
    }

    // One bad token rejects the whole batch.
    async fn batch_tag(&self, endpoint: Endpoint, pairs: &[TagTokenPair]) -> XgResponse {
        if pairs.is_empty() {
            return invalid_param("tag token pair list is empty");
        }

        if let Some(pair) = pairs.iter().find(|pair| !self.validate_token(&pair.token)) {
            return invalid_param(&format!("invalid token {}", pair.token));
        }

        let pairs: Vec<[&str; 2]> = pairs.iter().map(TagTokenPair::as_pair).collect();

        let tag_token_list = match json_string(&pairs) {
            Ok(tag_token_list) => tag_token_list,
            Err(e) => return XgResponse::error(e.to_string()),
        };

        let mut params = Params::new();
        params.set("tag_token_list", tag_token_list);

        self.call_restful(endpoint, params).await
    }

    pub async fn query_info_of_token(&self, device_token: &str) -> XgResponse {
        if device_token.is_empty() {
            return invalid_param("device token is empty");
        }

        let mut params = Params::new();
        params.set("device_token", device_token);

        self.call_restful(Endpoint::QueryInfoOfToken, params).await
    }

    pub async fn query_tokens_of_account(&self, account: &str) -> XgResponse {
        if account.is_empty() {
            return invalid_param("account is empty");
        }

        let mut params = Params::new();
        params.set("account", account);

        self.call_restful(Endpoint::QueryTokensOfAccount, params).await
    }

    /// Unbinds one token from an account. The token itself stays registered.
    pub async fn delete_token_of_account(&self, account: &str, device_token: &str) -> XgResponse {
        if account.is_empty() || device_token.is_empty() {
            return invalid_param("account and device token are required");
        }

        let mut params = Params::new();
        params.set("account", account);
        params.set("device_token", device_token);

        self.call_restful(Endpoint::DeleteTokenOfAccount, params).await
    }

    pub async fn delete_all_tokens_of_account(&self, account: &str) -> XgResponse {
        if account.is_empty() {
            return invalid_param("account is empty");
        }

        let mut params = Params::new();
        params.set("account", account);

        self.call_restful(Endpoint::DeleteAllTokensOfAccount, params).await
    }

    pub async fn push_token_android(
        &self,
        title: &str,
        content: &str,
        device_token: &str,
    ) -> XgResponse {
        let message = Message::from(AndroidMessage::easy(title, content));
        self.push_single_device(device_token, &message).await
    }

    pub async fn push_account_android(
        &self,
        title: &str,
        content: &str,
        account: &str,
    ) -> XgResponse {
        let message = Message::from(AndroidMessage::easy(title, content));
        self.push_single_account(account, &message).await
    }

    pub async fn push_all_android(&self, title: &str, content: &str) -> XgResponse {
        let message = Message::from(AndroidMessage::easy(title, content));
        self.push_all_devices(&message).await
    }

    pub async fn push_tag_android(&self, title: &str, content: &str, tag: &str) -> XgResponse {
        let message = Message::from(AndroidMessage::easy(title, content));
        self.push_tags(&[tag.to_string()], TAG_OP_OR, &message).await
    }

    pub async fn push_token_ios(
        &self,
        alert: &str,
        device_token: &str,
        environment: i32,
    ) -> XgResponse {
        let message = Message::from(IosMessage::easy(alert, environment));
        self.push_single_device(device_token, &message).await
    }

    pub async fn push_account_ios(
        &self,
        alert: &str,
        account: &str,
        environment: i32,
    ) -> XgResponse {
        let message = Message::from(IosMessage::easy(alert, environment));
        self.push_single_account(account, &message).await
    }

    pub async fn push_all_ios(&self, alert: &str, environment: i32) -> XgResponse {
        let message = Message::from(IosMessage::easy(alert, environment));
        self.push_all_devices(&message).await
    }

    pub async fn push_tag_ios(&self, alert: &str, tag: &str, environment: i32) -> XgResponse {
        let message = Message::from(IosMessage::easy(alert, environment));
        self.push_tags(&[tag.to_string()], TAG_OP_OR, &message).await
    }
}
