use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod password;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 后端在 `error` 字段缺失时的默认提示
pub const DEFAULT_AUTH_FAILURE: &str = "Authentication failed";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 角色字符串按精确匹配解析，未知值统一落入 `Unknown`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Owner,
    Admin,
    Reseller,
    User,
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            "reseller" => Role::Reseller,
            "user" => Role::User,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Reseller => "reseller",
            Role::User => "user",
            Role::Unknown => "",
        }
    }
}

/// 后端用户 ID，可能是数字也可能是字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

/// 登录身份记录
///
/// 除身份字段外全部可选：注册流程有时只返回 name/email。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 原始角色字符串，未知值也原样保留
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// 其余字段原样保留，持久化时写回完整记录
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    /// 解析后的角色；字段缺失时为 `None`
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().map(Role::parse)
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "User",
        }
    }

    /// 头像首字母
    pub fn initial(&self) -> char {
        self.name
            .as_deref()
            .and_then(|n| n.chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U')
    }

    pub fn role_label(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.is_empty() => role,
            _ => "user",
        }
    }
}

// =========================================================
// 认证响应 (Auth Envelope)
// =========================================================

/// `/auth/login` 与 `/auth/register` 的响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 后端拒绝认证，携带可直接展示的原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct AuthRejected {
    pub reason: String,
}

impl AuthResponse {
    /// 仅当 `success` 且 token、user 均存在时得到会话二元组
    pub fn into_session(self) -> Result<(UserRecord, String), AuthRejected> {
        let reason = self
            .error
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTH_FAILURE.to_string());

        match (self.success, self.user, self.token) {
            (true, Some(user), Some(token)) if !token.is_empty() => Ok((user, token)),
            _ => Err(AuthRejected { reason }),
        }
    }
}

/// 非认证接口通用的 `{ success, data, error }` 包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 后端错误响应体，只关心 `error` 字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `/auth/profile` 返回的资料
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}
