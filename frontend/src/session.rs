//! 会话存储 - 认证状态的唯一数据源
//!
//! 与 DOM 无关：持久化通过 `SessionStorage` 注入，浏览器实现见
//! `web::BrowserStorage`，测试使用内存实现。

use leptos::logging::{log, warn};
use multipanel_shared::UserRecord;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 持久化 token 的键
pub const TOKEN_KEY: &str = "authToken";
/// 持久化用户记录 (JSON) 的键
pub const USER_KEY: &str = "user";

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("序列化失败: {0}")]
    Serialize(String),
    #[error("写入失败 ({key}): {message}")]
    Write { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// 在 AuthContext 作用域之外读取会话，属于装配错误
    #[error("useAuth must be used within an AuthProvider")]
    MissingProvider,
}

// =========================================================
// 状态模型
// =========================================================

/// 已认证的身份：user 与 token 总是成对出现
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
}

/// 会话三态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// 启动时尚未从存储恢复
    #[default]
    Pending,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.session().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }
}

/// `login` / `register` 的确认结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfirmation {
    pub user: UserRecord,
    pub token: String,
}

// =========================================================
// 存储抽象
// =========================================================

/// 同步键值存储
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

impl<S: SessionStorage + ?Sized> SessionStorage for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

// =========================================================
// 会话存储
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&SessionState)>;

/// 会话存储
///
/// 单线程使用，所有方法取 `&self`，内部可变性由 `RefCell` 提供。
/// 监听器在每次状态变化后收到新状态。
pub struct SessionStore<S> {
    storage: S,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: RefCell::new(SessionState::Pending),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    /// 从持久化存储恢复会话
    ///
    /// 不做任何网络校验：存在 token 即视为有效，直到某个接口拒绝它。
    /// 结束后状态必定离开 `Pending`。
    pub fn bootstrap(&self) -> SessionState {
        let restored = match self.read_persisted() {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Anonymous,
        };

        match &restored {
            SessionState::Authenticated(s) => {
                log!("[Session] Restored session for {}", s.user.display_name())
            }
            _ => log!("[Session] No stored session, starting anonymous."),
        }

        self.transition(restored.clone());
        restored
    }

    /// 登录成功后写入会话（网络请求由调用方完成）
    pub fn login(&self, user: UserRecord, token: String) -> LoginConfirmation {
        log!("[Session] Login as {}", user.display_name());
        self.establish(user, token)
    }

    /// 与 `login` 行为相同，仅表达注册后的调用意图
    pub fn register(&self, user: UserRecord, token: String) -> LoginConfirmation {
        log!("[Session] Registered as {}", user.display_name());
        self.establish(user, token)
    }

    /// 清空内存状态与持久化存储，不通知服务端
    pub fn logout(&self) {
        log!("[Session] Logout.");
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.transition(SessionState::Anonymous);
    }

    pub fn on_change(&self, listener: impl Fn(&SessionState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    fn establish(&self, user: UserRecord, token: String) -> LoginConfirmation {
        let session = Session {
            user: user.clone(),
            token: token.clone(),
        };
        self.transition(SessionState::Authenticated(session));

        // 存储写入失败（如隐私模式）不影响本次内存中的登录，
        // 但旧的记录必须清掉，否则刷新后会恢复成上一个身份
        if let Err(e) = self.persist(&user, &token) {
            warn!("[Session] Failed to persist session: {}", e);
            self.storage.remove(TOKEN_KEY);
            self.storage.remove(USER_KEY);
        }

        LoginConfirmation { user, token }
    }

    fn persist(&self, user: &UserRecord, token: &str) -> Result<(), StorageError> {
        let user_json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &user_json)
    }

    fn read_persisted(&self) -> Option<Session> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = self.storage.get(USER_KEY);

        let session = match (token, user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => Some(Session { user, token }),
                Err(e) => {
                    warn!("[Session] Stored user record is unreadable: {}", e);
                    None
                }
            },
            (None, None) => return None,
            _ => None,
        };

        if session.is_none() {
            // 残缺的记录对恢复无用，直接清理
            self.storage.remove(TOKEN_KEY);
            self.storage.remove(USER_KEY);
        }
        session
    }

    fn transition(&self, next: SessionState) {
        {
            let mut state = self.state.borrow_mut();
            if *state == next {
                return;
            }
            *state = next.clone();
        }

        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
