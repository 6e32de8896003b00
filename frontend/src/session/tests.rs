use super::*;
use multipanel_shared::Role;
use std::collections::HashMap;

// =========================================================
// 内存存储
// =========================================================

/// 模拟浏览器 LocalStorage：只存字符串
#[derive(Default)]
pub(crate) struct MemoryStorage {
    pub map: RefCell<HashMap<String, String>>,
    /// 置为 true 时所有写入失败
    pub deny_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Rc<Self> {
        let storage = Self::new();
        for (k, v) in entries {
            storage.map.borrow_mut().insert(k.to_string(), v.to_string());
        }
        storage
    }

    pub fn has(&self, key: &str) -> bool {
        self.map.borrow().contains_key(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.deny_writes.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            });
        }
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }
}

fn owner() -> UserRecord {
    UserRecord::new("Olga", "olga@example.com").with_role(Role::Owner)
}

fn stored_owner() -> Rc<MemoryStorage> {
    let user_json = serde_json::to_string(&owner()).unwrap();
    MemoryStorage::with_entries(&[(TOKEN_KEY, "tok-1"), (USER_KEY, &user_json)])
}

// =========================================================
// bootstrap
// =========================================================

#[test]
fn starts_pending() {
    let store = SessionStore::new(MemoryStorage::new());
    assert!(store.state().is_pending());
    assert!(store.session().is_none());
}

#[test]
fn bootstrap_restores_stored_pair() {
    let store = SessionStore::new(stored_owner());
    let state = store.bootstrap();

    let session = state.session().unwrap();
    assert_eq!(session.token, "tok-1");
    assert_eq!(session.user, owner());
    assert_eq!(store.state(), state);
}

#[test]
fn bootstrap_twice_yields_identical_state() {
    let store = SessionStore::new(stored_owner());
    let first = store.bootstrap();
    assert!(!store.state().is_pending());
    let second = store.bootstrap();
    assert_eq!(first, second);
}

#[test]
fn bootstrap_with_empty_storage_is_anonymous() {
    let store = SessionStore::new(MemoryStorage::new());
    assert_eq!(store.bootstrap(), SessionState::Anonymous);
}

#[test]
fn half_written_pair_is_treated_as_logged_out_and_purged() {
    let storage = MemoryStorage::with_entries(&[(TOKEN_KEY, "tok-1")]);
    let store = SessionStore::new(storage.clone());
    assert_eq!(store.bootstrap(), SessionState::Anonymous);
    assert!(!storage.has(TOKEN_KEY));

    let storage = MemoryStorage::with_entries(&[(USER_KEY, r#"{"name":"x"}"#)]);
    let store = SessionStore::new(storage.clone());
    assert_eq!(store.bootstrap(), SessionState::Anonymous);
    assert!(!storage.has(USER_KEY));
}

#[test]
fn unreadable_user_record_is_anonymous() {
    let storage = MemoryStorage::with_entries(&[(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]);
    let store = SessionStore::new(storage.clone());
    assert_eq!(store.bootstrap(), SessionState::Anonymous);
    assert!(!storage.has(TOKEN_KEY));
    assert!(!storage.has(USER_KEY));
}

#[test]
fn empty_token_is_not_a_session() {
    let storage = MemoryStorage::with_entries(&[(TOKEN_KEY, ""), (USER_KEY, r#"{"name":"x"}"#)]);
    let store = SessionStore::new(storage);
    assert_eq!(store.bootstrap(), SessionState::Anonymous);
}

// =========================================================
// login / register / logout
// =========================================================

#[test]
fn login_sets_memory_and_storage() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.bootstrap();

    let confirmation = store.login(owner(), "tok-9".into());
    assert_eq!(confirmation.token, "tok-9");
    assert_eq!(confirmation.user, owner());

    assert_eq!(store.state().token(), Some("tok-9"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-9"));
    let persisted: UserRecord = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(persisted, owner());
}

#[test]
fn login_is_idempotent() {
    let store = SessionStore::new(MemoryStorage::new());
    let a = store.login(owner(), "t".into());
    let state_a = store.state();
    let b = store.login(owner(), "t".into());
    assert_eq!(a, b);
    assert_eq!(state_a, store.state());
}

#[test]
fn login_then_reload_round_trips() {
    let storage = MemoryStorage::new();
    let user = UserRecord {
        id: Some(multipanel_shared::UserId::Number(3)),
        status: Some("active".into()),
        ..UserRecord::new("Rita", "rita@example.com").with_role(Role::Reseller)
    };

    let store = SessionStore::new(storage.clone());
    store.bootstrap();
    store.login(user.clone(), "tok-r".into());

    // 模拟页面刷新：新的 store 共享同一份存储
    let reloaded = SessionStore::new(storage);
    let state = reloaded.bootstrap();
    assert_eq!(state.user(), Some(&user));
    assert_eq!(state.token(), Some("tok-r"));
}

#[test]
fn register_behaves_like_login() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    let user = UserRecord::new("New", "new@example.com");
    store.register(user.clone(), "tok-n".into());

    assert_eq!(store.state().user(), Some(&user));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-n"));
}

#[test]
fn logout_clears_everything() {
    let storage = stored_owner();
    let store = SessionStore::new(storage.clone());
    store.bootstrap();
    store.logout();

    assert_eq!(store.state(), SessionState::Anonymous);
    assert!(!storage.has(TOKEN_KEY));
    assert!(!storage.has(USER_KEY));

    let reloaded = SessionStore::new(storage);
    assert!(reloaded.bootstrap().user().is_none());
}

#[test]
fn failed_persist_keeps_in_memory_login_and_storage_consistent() {
    let storage = MemoryStorage::new();
    storage.deny_writes.set(true);
    let store = SessionStore::new(storage.clone());

    store.login(owner(), "tok".into());
    assert_eq!(store.state().token(), Some("tok"));
    assert!(!storage.has(TOKEN_KEY));
    assert!(!storage.has(USER_KEY));
}

#[test]
fn failed_persist_over_stored_pair_does_not_resurrect_old_identity() {
    let storage = stored_owner();
    let store = SessionStore::new(storage.clone());
    store.bootstrap();

    storage.deny_writes.set(true);
    let bob = UserRecord::new("Bob", "bob@example.com");
    store.login(bob.clone(), "tok-b".into());
    assert_eq!(store.state().token(), Some("tok-b"));
    assert_eq!(store.state().user(), Some(&bob));

    assert!(!storage.has(TOKEN_KEY));
    assert!(!storage.has(USER_KEY));
    let reloaded = SessionStore::new(storage);
    assert_eq!(reloaded.bootstrap(), SessionState::Anonymous);
}

/// 只拒绝某一个键的写入
struct FailingKey {
    inner: Rc<MemoryStorage>,
    key: &'static str,
}

impl SessionStorage for FailingKey {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.key {
            return Err(StorageError::Write {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key)
    }
}

#[test]
fn failed_write_of_either_key_clears_both_keys() {
    for failing in [TOKEN_KEY, USER_KEY] {
        let inner = stored_owner();
        let store = SessionStore::new(FailingKey {
            inner: inner.clone(),
            key: failing,
        });
        store.bootstrap();
        store.login(UserRecord::new("Bob", "bob@example.com"), "tok-b".into());

        assert!(!inner.has(TOKEN_KEY), "token left behind when {failing} failed");
        assert!(!inner.has(USER_KEY), "user left behind when {failing} failed");
    }
}

// =========================================================
// 监听器
// =========================================================

#[test]
fn listeners_see_each_transition_once() {
    let store = SessionStore::new(stored_owner());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.on_change(move |s| sink.borrow_mut().push(s.clone()));

    store.bootstrap();
    store.bootstrap();
    store.logout();
    store.logout();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].session().is_some());
    assert_eq!(seen[1], SessionState::Anonymous);
}

#[test]
fn removed_listener_is_not_called() {
    let store = SessionStore::new(MemoryStorage::new());
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let id = store.on_change(move |_| counter.set(counter.get() + 1));

    store.bootstrap();
    assert!(store.remove_listener(id));
    assert!(!store.remove_listener(id));
    store.login(owner(), "t".into());

    assert_eq!(calls.get(), 1);
}

#[test]
fn listener_may_read_the_store() {
    let store = Rc::new(SessionStore::new(MemoryStorage::new()));
    let observed = Rc::new(RefCell::new(None));
    let (reader, sink) = (Rc::downgrade(&store), observed.clone());
    store.on_change(move |_| {
        if let Some(store) = reader.upgrade() {
            *sink.borrow_mut() = Some(store.state());
        }
    });

    store.login(owner(), "t".into());
    assert_eq!(observed.borrow().as_ref().unwrap().token(), Some("t"));
}
