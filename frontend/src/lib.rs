//! Multipanel 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 会话存储（纯逻辑，可在宿主机测试）
//! - `web::route`: 路由定义与守卫判定（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `navigation`: 按角色组合的导航菜单
//! - `auth`: 把会话存储接入响应式系统
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod navigation;
mod session;
mod components {
    pub mod change_password;
    pub mod dashboard;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod register;
}

use crate::auth::provide_auth;
use crate::components::change_password::ChangePasswordPage;
use crate::components::dashboard::{
    DashboardPage, DownloadAppPage, Loader, NotFoundPage, SectionPage,
};
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 浏览器相关的适配层
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。只会收到守卫放行的路由。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::DownloadApp => view! { <DownloadAppPage /> }.into_any(),
        AppRoute::Dashboard => view! { <Layout><DashboardPage /></Layout> }.into_any(),
        AppRoute::ChangePassword => {
            view! { <Layout><ChangePasswordPage /></Layout> }.into_any()
        }
        AppRoute::NotFound(_) => view! { <Layout><NotFoundPage /></Layout> }.into_any(),
        // Root 总是被重定向，不会到达这里
        AppRoute::Root => view! { <Loader /> }.into_any(),
        section => view! { <Layout><SectionPage route=section /></Layout> }.into_any(),
    }
}

fn loading_view() -> AnyView {
    view! { <Loader /> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并从 LocalStorage 恢复会话
    let auth = provide_auth(AppConfig::from_env());

    // 2. 获取会话状态信号，用于注入路由服务（解耦！）
    let session = auth.session_signal();

    view! {
        // 3. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <RouterOutlet matcher=route_matcher loading=loading_view />
        </Router>
    }
}
