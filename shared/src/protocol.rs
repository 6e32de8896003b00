use crate::{ApiEnvelope, AuthResponse, Profile};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, appended to the API base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries the bearer token.
    const AUTHENTICATED: bool;
}

/// `Authorization` 头的值
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// =========================================================
// Request Definitions
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// 推荐码，可为空字符串
    pub referral_id: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// Current user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = ApiEnvelope<Profile>;
    const PATH: &'static str = "/auth/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangePasswordRequest {
    type Response = ApiEnvelope<serde_json::Value>;
    const PATH: &'static str = "/auth/change-password";
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_password_uses_camel_case_fields() {
        let req = ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "New#pass1".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["currentPassword"], "old");
        assert_eq!(json["newPassword"], "New#pass1");
    }

    #[test]
    fn register_sends_referral_id() {
        let req = RegisterRequest {
            name: "n".into(),
            email: "e@x.io".into(),
            password: "p".into(),
            referral_id: "REF42".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["referral_id"], "REF42");
    }

    #[test]
    fn only_profile_and_password_change_are_authenticated() {
        assert!(!LoginRequest::AUTHENTICATED);
        assert!(!RegisterRequest::AUTHENTICATED);
        assert!(ProfileRequest::AUTHENTICATED);
        assert!(ChangePasswordRequest::AUTHENTICATED);
        assert_eq!(ChangePasswordRequest::METHOD, HttpMethod::Put);
    }

    #[test]
    fn bearer_header_value() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
