//! HTTP 传输层
//!
//! 在 `web_sys::fetch` 之上提供一个与 DOM 解耦的传输抽象：
//! - `HttpRequest` / `HttpResponse`：纯数据的请求与响应描述
//! - `HttpClient` trait：唯一的发送入口，便于在测试中替换
//! - `FetchHttpClient`：浏览器 fetch 实现
//! - `MockHttpClient`（仅测试）：按 URL 排队响应并记录请求

use async_trait::async_trait;
use eventhub_shared::protocol::HttpMethod;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::{HashMap, VecDeque};

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuild(String),
    /// 网络请求失败
    Network(String),
    /// 响应读取或解析失败
    Decode(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuild(msg) => write!(f, "request build failed: {}", msg),
            HttpError::Network(msg) => write!(f, "network error: {}", msg),
            HttpError::Decode(msg) => write!(f, "response decode failed: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

// =========================================================
// 请求与响应
// =========================================================

/// 请求体
///
/// multipart 表单直接携带 `FormData`，Content-Type 连同 boundary
/// 由浏览器自行设置，这里不得手动覆盖。
#[derive(Debug, Clone, Default)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(String),
    Form(web_sys::FormData),
}

/// 可克隆的请求描述（克隆以支持 401 刷新后的单次重放）
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: HttpBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 替换同名请求头（刷新令牌后更新 Authorization 用）
    pub fn replace_header(&mut self, key: &str, value: &str) {
        self.headers.retain(|(k, _)| k != key);
        self.headers.push((key.to_string(), value.to_string()));
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, HttpError> {
        let text = serde_json::to_string(body).map_err(|e| HttpError::RequestBuild(e.to_string()))?;
        self.body = HttpBody::Json(text);
        Ok(self)
    }

    pub fn with_form(mut self, form: web_sys::FormData) -> Self {
        self.body = HttpBody::Form(form);
        self
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体按空对象处理
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        let text = if self.body.trim().is_empty() {
            "{}"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

// =========================================================
// 发送抽象
// =========================================================

#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: fetch 客户端
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct FetchHttpClient;

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuild(format!("create headers: {:?}", e)))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuild(format!("set header {}: {:?}", key, e)))?;
        }
        // JSON 体需要显式 Content-Type；表单体交给浏览器
        if matches!(req.body, HttpBody::Json(_)) {
            let _ = headers.set("Content-Type", "application/json");
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            HttpBody::Empty => {}
            HttpBody::Json(text) => opts.set_body(&JsValue::from_str(text)),
            HttpBody::Form(form) => opts.set_body(form.as_ref()),
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuild(format!("{:?}", e)))?;

        let window =
            web_sys::window().ok_or_else(|| HttpError::Network("no window object".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::Decode(format!("not a Response: {:?}", e)))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|e| HttpError::Decode(format!("{:?}", e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| HttpError::Decode(format!("{:?}", e)))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// 以二进制读取一个 URL（下载二维码图片、PDF 嵌图用）
pub async fn fetch_binary(url: &str) -> Result<Vec<u8>, HttpError> {
    let window =
        web_sys::window().ok_or_else(|| HttpError::Network("no window object".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|e| HttpError::Decode(format!("not a Response: {:?}", e)))?;

    if !response.ok() {
        return Err(HttpError::Network(format!(
            "fetch failed with status {}",
            response.status()
        )));
    }

    let buf_promise = response
        .array_buffer()
        .map_err(|e| HttpError::Decode(format!("{:?}", e)))?;
    let buf = JsFuture::from(buf_promise)
        .await
        .map_err(|e| HttpError::Decode(format!("{:?}", e)))?;

    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    /// URL -> 按序消费的响应队列 (status, body)
    responses: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
    /// 发出的请求记录 (URL, Method, Headers, Body 文本)
    pub requests: RefCell<Vec<(String, String, Vec<(String, String)>, Option<String>)>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// 为 URL 追加一个响应；同一 URL 可排队多个（例如先 401 后 200）
    pub fn push_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back((status, body.to_string()));
    }

    /// 命中某 URL 的请求次数
    pub fn calls_to(&self, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|(u, _, _, _)| u == url)
            .count()
    }

    /// 第 i 次请求携带的某请求头
    pub fn header_of(&self, index: usize, key: &str) -> Option<String> {
        self.requests.borrow().get(index).and_then(|(_, _, headers, _)| {
            headers
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let body_text = match &req.body {
            HttpBody::Json(text) => Some(text.clone()),
            _ => None,
        };
        self.requests.borrow_mut().push((
            req.url.clone(),
            req.method.as_str().to_string(),
            req.headers.clone(),
            body_text,
        ));

        let mut responses = self.responses.borrow_mut();
        if let Some((status, body)) = responses.get_mut(&req.url).and_then(|q| q.pop_front()) {
            Ok(HttpResponse { status, body })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
