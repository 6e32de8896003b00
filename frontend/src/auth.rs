//! 认证模块
//!
//! 将 `SessionStore` 接入 Leptos 的响应式系统，与路由系统解耦。
//! 路由服务通过注入的会话信号来检查认证状态。

use crate::api::MultipanelApi;
use crate::config::AppConfig;
use crate::session::{LoginConfirmation, SessionError, SessionState, SessionStore};
use crate::web::BrowserStorage;
use leptos::prelude::*;
use multipanel_shared::UserRecord;

/// 认证上下文
///
/// 持有会话存储本身以及一份供视图订阅的状态信号。
/// 信号只由存储的变更监听器写入。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    store: StoredValue<SessionStore<BrowserStorage>, LocalStorage>,
    config: StoredValue<AppConfig>,
}

impl AuthContext {
    /// 创建新的认证上下文，此时状态为 `Pending`
    pub fn new(config: AppConfig) -> Self {
        let store = SessionStore::new(BrowserStorage);
        let (state, set_state) = signal(store.state());

        store.on_change(move |next| set_state.set(next.clone()));

        Self {
            state,
            store: StoredValue::new_local(store),
            config: StoredValue::new(config),
        }
    }

    /// 获取会话状态信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<SessionState> {
        let state = self.state;
        Signal::derive(move || state.get())
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// 从 LocalStorage 恢复会话，只在挂载时调用一次
    pub fn bootstrap(&self) {
        self.store.with_value(|store| {
            store.bootstrap();
        });
    }

    pub fn login(&self, user: UserRecord, token: String) -> LoginConfirmation {
        self.store.with_value(|store| store.login(user, token))
    }

    pub fn register(&self, user: UserRecord, token: String) -> LoginConfirmation {
        self.store.with_value(|store| store.register(user, token))
    }

    /// 注销并清除状态
    ///
    /// 不需要手动导航，路由服务会监听会话状态变化并自动重定向。
    pub fn logout(&self) {
        self.store.with_value(|store| store.logout());
    }

    /// 当前用户（未登录时为 `None`）
    pub fn user(&self) -> Option<UserRecord> {
        self.state.with(|s| s.user().cloned())
    }

    /// 带当前 token 的 API 客户端；未登录时为 `None`
    pub fn api(&self) -> Option<MultipanelApi> {
        let config = self.config();
        self.state
            .with_untracked(|s| s.token().map(|t| MultipanelApi::authenticated(&config, t)))
    }

    /// 匿名 API 客户端，用于登录与注册
    pub fn public_api(&self) -> MultipanelApi {
        MultipanelApi::anonymous(&self.config())
    }
}

/// 创建认证上下文、放入 Context，并完成会话恢复
pub fn provide_auth(config: AppConfig) -> AuthContext {
    let ctx = AuthContext::new(config);
    provide_context(ctx);
    ctx.bootstrap();
    ctx
}

/// 从 Context 获取认证上下文
pub fn try_use_auth() -> Result<AuthContext, SessionError> {
    use_context::<AuthContext>().ok_or(SessionError::MissingProvider)
}

/// 从 Context 获取认证上下文
///
/// # Panics
/// 在 `provide_auth` 作用域之外调用时立即失败，这是装配错误。
pub fn use_auth() -> AuthContext {
    match try_use_auth() {
        Ok(ctx) => ctx,
        Err(e) => panic!("{}", e),
    }
}
