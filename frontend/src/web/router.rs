//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，守卫判定本身在
//! `route::resolve` 中，是纯函数。

use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, resolve};
use crate::session::SessionState;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// 写入 History 状态（内部工具函数）
fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
}

/// 出口实际渲染的判定
///
/// 重定向前后落地于同一路由，因此 `Effect` 写回目标路由时判定值不变。
pub(crate) fn outlet_decision(route: &AppRoute, state: &SessionState) -> GuardDecision {
    resolve(route, state).decision
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前请求的路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<SessionState>,
    /// 跟随重定向后的判定；判定不变时出口不会重新挂载页面
    decision: Memo<GuardDecision>,
}

impl RouterService {
    /// 创建新的路由服务，初始路由从当前 URL 解析
    fn new(session: Signal<SessionState>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        let decision = Memo::new(move |_| {
            current_route.with(|route| session.with(|state| outlet_decision(route, state)))
        });

        Self {
            current_route,
            set_route,
            session,
            decision,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由的守卫判定（响应式）
    pub fn decision(&self) -> GuardDecision {
        self.decision.get()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.apply(target_route, HistoryMode::Push);
    }

    /// 对目标路由执行守卫，写入 History 与路由信号
    fn apply(&self, target_route: AppRoute, mode: HistoryMode) {
        let state = self.session.get_untracked();
        let resolution = resolve(&target_route, &state);

        if resolution.redirected {
            log!(
                "[Router] {} -> {} (redirect)",
                target_route.to_path(),
                resolution.route.to_path()
            );
        }

        // Pending 时保留请求的路由，恢复完成后由 Effect 重新判定
        write_history(&resolution.route.to_path(), mode);

        if self.current_route.get_untracked() != resolution.route {
            self.set_route.set(resolution.route);
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑
            router.apply(AppRoute::from_path(&current_path()), HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化（恢复完成、登录、登出）时重新判定当前路由
    fn setup_session_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let state = router.session.get();
            if state.is_pending() {
                return;
            }
            let route = router.current_route.get_untracked();
            router.apply(route, HistoryMode::Replace);
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 会话恢复期间只渲染 `loading`，其余情况渲染匹配到的视图。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
    /// 加载指示
    loading: fn() -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.decision() {
        GuardDecision::Render(route) => matcher(route),
        // 重定向在 Effect 中落实，这一帧只显示加载
        GuardDecision::Loading | GuardDecision::Redirect(_) => loading(),
    }
}

/// 客户端导航链接
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
