use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    PushSingleDevice,
    PushSingleAccount,
    PushAccountList,
    PushAllDevice,
    PushTags,
    QueryPushStatus,
    QueryDeviceCount,
    QueryTags,
    CancelTimingPush,
    BatchSetTag,
    BatchDelTag,
    QueryTokenTags,
    QueryTagTokenNum,
    CreateMultipush,
    PushAccountListMultiple,
    PushDeviceListMultiple,
    QueryInfoOfToken,
    QueryTokensOfAccount,
    DeleteTokenOfAccount,
    DeleteAllTokensOfAccount,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PushSingleDevice => "/v2/push/single_device",
            Endpoint::PushSingleAccount => "/v2/push/single_account",
            Endpoint::PushAccountList => "/v2/push/account_list",
            Endpoint::PushAllDevice => "/v2/push/all_device",
            Endpoint::PushTags => "/v2/push/tags_device",
            Endpoint::QueryPushStatus => "/v2/push/get_msg_status",
            Endpoint::QueryDeviceCount => "/v2/application/get_app_device_num",
            Endpoint::QueryTags => "/v2/tags/query_app_tags",
            Endpoint::CancelTimingPush => "/v2/push/cancel_timing_task",
            Endpoint::BatchSetTag => "/v2/tags/batch_set",
            Endpoint::BatchDelTag => "/v2/tags/batch_del",
            Endpoint::QueryTokenTags => "/v2/tags/query_token_tags",
            Endpoint::QueryTagTokenNum => "/v2/tags/query_tag_token_num",
            Endpoint::CreateMultipush => "/v2/push/create_multipush",
            Endpoint::PushAccountListMultiple => "/v2/push/account_list_multiple",
            Endpoint::PushDeviceListMultiple => "/v2/push/device_list_multiple",
            Endpoint::QueryInfoOfToken => "/v2/application/get_app_token_info",
            Endpoint::QueryTokensOfAccount => "/v2/application/get_app_account_tokens",
            Endpoint::DeleteTokenOfAccount => "/v2/application/del_app_account_tokens",
            Endpoint::DeleteAllTokensOfAccount => "/v2/application/del_app_account_all_tokens",
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.path())
    }
}
