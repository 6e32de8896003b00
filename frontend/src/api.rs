use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::warn;
use multipanel_shared::protocol::{
    ApiRequest, ChangePasswordRequest, HttpMethod, LoginRequest, ProfileRequest,
    RegisterRequest, bearer,
};
use multipanel_shared::{AuthResponse, ErrorBody, HEADER_AUTHORIZATION, Profile};

use crate::config::AppConfig;

/// REST 调用错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication token not found")]
    MissingToken,
    #[error("Network error. Please check your connection.")]
    Network(String),
    /// HTTP 401：token 失效。不会自动登出，由页面自行展示
    #[error("{}", .0.as_deref().unwrap_or("Unauthorized"))]
    Unauthorized(Option<String>),
    /// `message` 取自响应体的 `error` 字段，缺失时为 `None`
    #[error("{}", server_text(.status, .message))]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

fn server_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {}", status),
    }
}

impl ApiError {
    /// 后端给出的提示；页面据此决定是否使用自己的兜底文案
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(message) | ApiError::Server { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultipanelApi {
    pub base_url: String,
    pub token: Option<String>,
}

impl MultipanelApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// 匿名客户端，仅用于登录与注册
    pub fn anonymous(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone(), None)
    }

    pub fn authenticated(config: &AppConfig, token: &str) -> Self {
        Self::new(config.api_base_url.clone(), Some(token.to_string()))
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }

    /// 发送一个类型化请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let url = self.url(R::PATH);
        let mut builder = self.builder(R::METHOD, &url);

        if R::AUTHENTICATED {
            let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
            builder = builder.header(HEADER_AUTHORIZATION, &bearer(token));
        }

        let pending = if R::METHOD.has_body() {
            builder
                .json(req)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
        } else {
            builder.send().await
        };
        let res = pending.map_err(|e| {
            warn!("[Api] {} {} failed: {}", R::METHOD.as_str(), url, e);
            ApiError::Network(e.to_string())
        })?;

        if !res.ok() {
            let err = Self::error_from(res).await;
            warn!("[Api] {} {} -> {}", R::METHOD.as_str(), url, err);
            return Err(err);
        }

        res.json::<R::Response>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn error_from(res: Response) -> ApiError {
        let status = res.status();
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());

        if status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Server { status, message }
        }
    }

    // =========================================================
    // 认证接口
    // =========================================================

    pub async fn login(&self, email: String, password: String) -> ApiResult<AuthResponse> {
        self.send(&LoginRequest { email, password }).await
    }

    pub async fn register(&self, req: RegisterRequest) -> ApiResult<AuthResponse> {
        self.send(&req).await
    }

    pub async fn profile(&self) -> ApiResult<Profile> {
        let envelope = self.send(&ProfileRequest).await?;
        match envelope.data {
            Some(profile) if envelope.success => Ok(profile),
            _ => Err(ApiError::Decode(
                envelope
                    .error
                    .unwrap_or_else(|| "Failed to load profile data".to_string()),
            )),
        }
    }

    pub async fn change_password(
        &self,
        current_password: String,
        new_password: String,
    ) -> ApiResult<()> {
        let envelope = self
            .send(&ChangePasswordRequest {
                current_password,
                new_password,
            })
            .await?;

        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Server {
                status: 200,
                message: envelope.error,
            })
        }
    }
}
