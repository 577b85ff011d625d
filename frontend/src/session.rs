//! 会话管理模块
//!
//! 全部令牌读写的唯一入口。页面与 API 客户端只与 [`SessionManager`]
//! 打交道，存储介质（localStorage / 内存 / 将来可能的安全 cookie）
//! 通过 [`SessionStore`] trait 替换，不触碰调用点。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const KEY_ACCESS: &str = "access";
const KEY_REFRESH: &str = "refresh";
const KEY_POST_LOGIN_REDIRECT: &str = "post_login_redirect";

// =========================================================
// 存储介质抽象
// =========================================================

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 浏览器 localStorage 介质
#[derive(Clone, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn backing() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::backing()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::backing() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::backing() {
            let _ = storage.remove_item(key);
        }
    }
}

/// 内存介质（测试与无 window 环境）
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =========================================================
// 会话语义
// =========================================================

#[derive(Clone, Default)]
pub struct SessionManager<S> {
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(KEY_ACCESS)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(KEY_REFRESH)
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// 登录/注册成功后写入一对令牌
    pub fn set_tokens(&self, access: &str, refresh: &str) {
        self.store.set(KEY_ACCESS, access);
        self.store.set(KEY_REFRESH, refresh);
    }

    /// 刷新成功后原地覆盖 access（refresh 不变）
    pub fn set_access_token(&self, access: &str) {
        self.store.set(KEY_ACCESS, access);
    }

    /// 记录登录后要回跳的路径
    pub fn remember_redirect(&self, path: &str) {
        self.store.set(KEY_POST_LOGIN_REDIRECT, path);
    }

    /// 取出并清除记录的回跳路径
    pub fn take_redirect(&self) -> Option<String> {
        let path = self.store.get(KEY_POST_LOGIN_REDIRECT);
        if path.is_some() {
            self.store.remove(KEY_POST_LOGIN_REDIRECT);
        }
        path
    }

    /// 登出或刷新彻底失败时清空会话
    pub fn clear(&self) {
        self.store.remove(KEY_ACCESS);
        self.store.remove(KEY_REFRESH);
        self.store.remove(KEY_POST_LOGIN_REDIRECT);
    }
}

pub type Session = SessionManager<BrowserStore>;

/// 浏览器会话的便捷构造
pub fn session() -> Session {
    SessionManager::new(BrowserStore)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_session() -> SessionManager<MemoryStore> {
        SessionManager::new(MemoryStore::default())
    }

    #[test]
    fn token_lifecycle() {
        let s = memory_session();
        assert!(!s.is_logged_in());

        s.set_tokens("acc-1", "ref-1");
        assert!(s.is_logged_in());
        assert_eq!(s.access_token().as_deref(), Some("acc-1"));
        assert_eq!(s.refresh_token().as_deref(), Some("ref-1"));

        // 刷新只覆盖 access
        s.set_access_token("acc-2");
        assert_eq!(s.access_token().as_deref(), Some("acc-2"));
        assert_eq!(s.refresh_token().as_deref(), Some("ref-1"));

        s.clear();
        assert!(!s.is_logged_in());
        assert!(s.refresh_token().is_none());
    }

    #[test]
    fn redirect_is_taken_once() {
        let s = memory_session();
        assert!(s.take_redirect().is_none());

        s.remember_redirect("/events/summer-fest");
        assert_eq!(s.take_redirect().as_deref(), Some("/events/summer-fest"));
        assert!(s.take_redirect().is_none());
    }

    #[test]
    fn clear_drops_redirect_too() {
        let s = memory_session();
        s.set_tokens("a", "r");
        s.remember_redirect("/dashboard");
        s.clear();
        assert!(s.take_redirect().is_none());
    }
}
