//! 运行配置
//!
//! WASM 包没有运行时环境变量，配置在编译期从环境中读取，
//! 读不到时使用默认值。

/// 默认的后端 API 地址
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

/// 覆盖 API 地址的编译期环境变量
const API_BASE_URL_VAR: Option<&str> = option_env!("MULTIPANEL_API_BASE_URL");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::with_base_url(API_BASE_URL_VAR)
    }

    fn with_base_url(var: Option<&str>) -> Self {
        let raw = var
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        Self {
            api_base_url: raw.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
