//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、访问级别以及守卫判定。

use crate::session::SessionState;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    // --- 公开页面 ---
    #[default]
    Login,
    Register,
    DownloadApp,

    // --- 受保护页面 ---
    Dashboard,
    Keys,
    Transactions,
    ProviderPlans,
    UploadKeys,
    ResetKey,
    Users,
    /// `/user-profile/:userId`
    UserProfile(String),
    GenerateKeys,
    ChangePassword,
    UnsoldKeys,
    MyBonus,
    BonusList,
    CreateReferral,

    /// `/`，总是重定向到面板
    Root,
    /// 未匹配的路径，保留原始路径
    NotFound(String),
}

/// 路由的访问级别
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// 仅匿名用户可见，已登录用户被送回面板
    Public,
    /// 仅已登录用户可见
    Protected,
    /// 无条件重定向
    Redirect(AppRoute),
}

/// 单次守卫判定：三者恰有其一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话尚未恢复，只渲染加载指示
    Loading,
    Render(AppRoute),
    Redirect(AppRoute),
}

/// 跟随重定向后的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// 最终落地的路由
    pub route: AppRoute,
    pub decision: GuardDecision,
    /// 是否经过了至少一次重定向
    pub redirected: bool,
}

/// 重定向链的上限，路由表本身不存在环
const MAX_REDIRECTS: usize = 4;

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串与片段，容忍末尾斜杠；路径不区分大小写，
    /// 但 `:userId` 段保持原样。
    pub fn from_path(path: &str) -> Self {
        const USER_PROFILE_PREFIX: &str = "/user-profile/";

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        let lowered = trimmed.to_ascii_lowercase();

        match lowered.as_str() {
            "/" => Self::Root,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/download-app" => Self::DownloadApp,
            "/dashboard" => Self::Dashboard,
            "/keys" => Self::Keys,
            "/transactions" => Self::Transactions,
            "/provider-plans" => Self::ProviderPlans,
            "/upload-keys" => Self::UploadKeys,
            "/reset-key" => Self::ResetKey,
            "/users" => Self::Users,
            "/generate-keys" => Self::GenerateKeys,
            "/change-password" => Self::ChangePassword,
            "/unsold-keys" => Self::UnsoldKeys,
            "/my-bonus" => Self::MyBonus,
            "/bonus-list" => Self::BonusList,
            "/create-ref" => Self::CreateReferral,
            other if other.starts_with(USER_PROFILE_PREFIX) => {
                // ASCII 小写不改变字节长度，可直接按前缀长度切原始路径
                let id = &trimmed[USER_PROFILE_PREFIX.len()..];
                if id.is_empty() || id.contains('/') {
                    Self::NotFound(trimmed.to_string())
                } else {
                    Self::UserProfile(id.to_string())
                }
            }
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        let fixed = match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::DownloadApp => "/download-app",
            Self::Dashboard => "/dashboard",
            Self::Keys => "/keys",
            Self::Transactions => "/transactions",
            Self::ProviderPlans => "/provider-plans",
            Self::UploadKeys => "/upload-keys",
            Self::ResetKey => "/reset-key",
            Self::Users => "/users",
            Self::GenerateKeys => "/generate-keys",
            Self::ChangePassword => "/change-password",
            Self::UnsoldKeys => "/unsold-keys",
            Self::MyBonus => "/my-bonus",
            Self::BonusList => "/bonus-list",
            Self::CreateReferral => "/create-ref",
            Self::Root => "/",
            Self::UserProfile(id) => return format!("/user-profile/{}", id),
            Self::NotFound(path) => return path.clone(),
        };
        fixed.to_string()
    }

    /// **核心守卫配置：路由的访问级别**
    ///
    /// 未匹配的路径同样受保护：匿名用户被送去登录而不是看到 404。
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::Register | Self::DownloadApp => RouteAccess::Public,
            Self::Root => RouteAccess::Redirect(Self::Dashboard),
            _ => RouteAccess::Protected,
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取已认证用户访问公开页时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 页面标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Sign Up",
            Self::DownloadApp => "Download App",
            Self::Dashboard => "Dashboard",
            Self::Keys => "My Keys",
            Self::Transactions => "Transactions",
            Self::ProviderPlans => "Providers & Plans",
            Self::UploadKeys => "Upload Key",
            Self::ResetKey => "Reset Key",
            Self::Users => "Users",
            Self::UserProfile(_) => "User Profile",
            Self::GenerateKeys => "Generate Keys",
            Self::ChangePassword => "Change Password",
            Self::UnsoldKeys => "Unsold Keys",
            Self::MyBonus => "My Bonus",
            Self::BonusList => "Bonus List",
            Self::CreateReferral => "Create Referral",
            Self::Root => "Home",
            Self::NotFound(_) => "Page Not Found",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// **核心守卫逻辑**：会话状态与路由的纯函数
///
/// `Pending` 时无论路由如何都只给出 `Loading`，避免闪现受保护内容
/// 或在恢复完成前把已登录用户踢回登录页。
pub fn guard(route: &AppRoute, state: &SessionState) -> GuardDecision {
    let access = route.access();

    if let RouteAccess::Redirect(target) = access {
        return GuardDecision::Redirect(target);
    }

    match (state, access) {
        (SessionState::Pending, _) => GuardDecision::Loading,
        (SessionState::Authenticated(_), RouteAccess::Public) => {
            GuardDecision::Redirect(AppRoute::auth_success_redirect())
        }
        (SessionState::Anonymous, RouteAccess::Protected) => {
            GuardDecision::Redirect(AppRoute::auth_failure_redirect())
        }
        _ => GuardDecision::Render(route.clone()),
    }
}

/// 沿重定向链求出最终判定
pub fn resolve(route: &AppRoute, state: &SessionState) -> Resolution {
    let mut current = route.clone();
    let mut redirected = false;

    for _ in 0..MAX_REDIRECTS {
        match guard(&current, state) {
            GuardDecision::Redirect(target) => {
                current = target;
                redirected = true;
            }
            decision => {
                return Resolution {
                    route: current,
                    decision,
                    redirected,
                };
            }
        }
    }

    Resolution {
        route: current.clone(),
        decision: GuardDecision::Redirect(current),
        redirected,
    }
}

#[cfg(test)]
mod tests;
