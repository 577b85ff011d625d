//! 认证模块
//!
//! 管理认证状态并提供页面级守卫：
//! - [`AuthContext`]：App 根部注入的认证信号，路由服务依赖它做守卫
//! - [`use_auth`]：页面钩子：无令牌先记录回跳路径再送去登录页，
//!   有令牌则拉取 profile，角色不符跳 unauthorized
//! - [`login`] / [`logout`]：会话写入与清除

use crate::api::{Api, ApiError, use_api};
use crate::session::session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use eventhub_shared::{UserProfile, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;

// =========================================================
// 认证上下文
// =========================================================

/// 认证状态上下文（路由守卫只关心"是否已登录"）
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub authenticated: RwSignal<bool>,
}

impl AuthContext {
    /// 从已持久化的会话初始化
    pub fn new() -> Self {
        Self {
            authenticated: RwSignal::new(session().is_logged_in()),
        }
    }

    /// 供路由服务注入的只读信号
    pub fn signal(&self) -> Signal<bool> {
        let authenticated = self.authenticated;
        Signal::derive(move || authenticated.get())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth_context() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// 登录 / 登出
// =========================================================

/// 登录并写入会话，返回登录后应跳转的路径
/// （优先取记录的回跳路径，否则按角色落地页）。
/// `api` 由调用方在渲染期取出后移入异步块，避免在异步上下文里查 Context。
pub async fn login(
    ctx: &AuthContext,
    api: &Api,
    email: String,
    password: String,
) -> Result<String, ApiError> {
    let response = api.login(email, password).await?;

    let s = session();
    s.set_tokens(&response.access, &response.refresh);
    ctx.authenticated.set(true);

    let destination = s
        .take_redirect()
        .unwrap_or_else(|| response.user.user_type.landing_path().to_string());
    Ok(destination)
}

/// 登出并清除状态；受保护页面的跳转由路由服务的认证监听处理。
pub fn logout(ctx: &AuthContext) {
    session().clear();
    ctx.authenticated.set(false);
}

// =========================================================
// 页面守卫钩子
// =========================================================

/// 角色校验（纯逻辑，便于单测）
pub fn role_allows(profile_role: UserRole, required: Option<UserRole>) -> bool {
    match required {
        Some(role) => profile_role == role,
        None => true,
    }
}

/// `use_auth` 暴露给页面的状态；`checking` 在取数落定前保持 true。
#[derive(Clone, Copy)]
pub struct AuthGuard {
    pub user: ReadSignal<Option<UserProfile>>,
    pub checking: ReadSignal<bool>,
}

/// 页面级认证守卫
///
/// 挂载时执行：无令牌 -> 记录当前路径并跳登录；有令牌 -> 拉取
/// profile（经过单次刷新管道）；profile 拉取失败 -> 清会话跳登录；
/// 角色不符 -> 跳 unauthorized。
pub fn use_auth(required: Option<UserRole>) -> AuthGuard {
    let (user, set_user) = signal(Option::<UserProfile>::None);
    let (checking, set_checking) = signal(true);

    let router = use_router();
    let ctx = use_auth_context();
    let api = use_api();

    let s = session();
    if s.access_token().is_none() {
        let current = router.current_route().get_untracked();
        s.remember_redirect(&current.to_path());
        set_checking.set(false);
        router.navigate(AppRoute::Login);
        return AuthGuard { user, checking };
    }

    spawn_local(async move {
        match api.profile().await {
            Ok(profile) => {
                if role_allows(profile.user_type, required) {
                    set_user.set(Some(profile));
                } else {
                    web_sys::console::log_1(&"[Auth] Role mismatch, unauthorized.".into());
                    router.navigate(AppRoute::Unauthorized);
                }
            }
            Err(e) => {
                web_sys::console::log_1(
                    &format!("[Auth] Profile fetch failed: {}", e).into(),
                );
                session().clear();
                ctx.authenticated.set(false);
                router.navigate(AppRoute::Login);
            }
        }
        set_checking.set(false);
    });

    AuthGuard { user, checking }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_guard_matches_exact_role() {
        assert!(role_allows(UserRole::Organizer, Some(UserRole::Organizer)));
        assert!(!role_allows(UserRole::Guest, Some(UserRole::Organizer)));
        assert!(!role_allows(UserRole::Vendor, Some(UserRole::Organizer)));
    }

    #[test]
    fn no_required_role_allows_everyone() {
        assert!(role_allows(UserRole::Organizer, None));
        assert!(role_allows(UserRole::Vendor, None));
        assert!(role_allows(UserRole::Guest, None));
    }
}
