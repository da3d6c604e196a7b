// cache_purge_worker/src/fetch.rs

//! fetch 直通相关的请求 / 响应结构以及网络能力接口。
//!
//! worker 从不使用缓存响应请求：每个 `FetchRequest` 都原样交给注入的 `NetworkFetcher`。

use serde::{Deserialize, Serialize};
use std::future::Future;
use url::Url;

use crate::error::PurgeError;

/// 一次被拦截的网络请求。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// HTTP 方法，例如 `"GET"`。
    pub method: String,
    /// 请求目标地址。
    pub url: Url,
    /// 原样转发的请求头。
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// 构造一个不带请求头的 GET 请求。
    pub fn get(url: Url) -> Self {
        Self {
            method: "GET".to_string(),
            url,
            headers: Vec::new(),
        }
    }
}

/// 网络返回的响应。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// 网络能力：把请求直接发往网络。
pub trait NetworkFetcher: Send + Sync {
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<FetchResponse, PurgeError>> + Send;
}

/// 没有网络后端时使用的占位实现：所有请求都以 `FetchFailed` 失败。
///
/// 命令行清理模式只需要 install / activate 两个钩子，用它补齐泛型参数。
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineFetcher;

impl NetworkFetcher for OfflineFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, PurgeError> {
        Err(PurgeError::FetchFailed(format!(
            "当前没有可用的网络后端: {} {}",
            request.method, request.url
        )))
    }
}
