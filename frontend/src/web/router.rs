//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，实现"请求 -> 验证(Guard) -> 处理 -> 加载"的导航流程。
//! 所有对 window.history 的操作都集中在此模块。
//! 守卫决策本身是纯函数（`resolve_navigation`），便于单测；
//! 未登录访问受保护路由时，先记录原始路径再跳转登录页。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::session::session;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前查询串（支付回跳页的 reference 在这里）
fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（重定向用）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 整页跳转到外部地址（支付网关重定向）
pub fn redirect_external(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

// =========================================================
// 守卫决策（纯逻辑）
// =========================================================

/// 一次导航请求的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    /// 放行，加载目标路由
    Load(AppRoute),
    /// 未登录访问受保护路由：记录原路径后跳转登录页
    RedirectLogin { remember: String },
}

/// 核心守卫：目标路由需要认证而当前未认证时拦截
pub fn resolve_navigation(target: AppRoute, is_authenticated: bool) -> NavDecision {
    if target.requires_auth() && !is_authenticated {
        NavDecision::RedirectLogin {
            remember: target.to_path(),
        }
    } else {
        NavDecision::Load(target)
    }
}

// =========================================================
// 路由服务
// =========================================================

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态以注入信号的方式解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_location(&current_path(), &current_search());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, target: AppRoute) {
        self.apply(target, true);
    }

    /// 按路径导航（登录后的回跳路径是字符串形式）
    pub fn navigate_path(&self, path: &str) {
        let (path, search) = path.split_once('?').unwrap_or((path, ""));
        self.navigate(AppRoute::from_location(path, search));
    }

    fn apply(&self, target: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();

        match resolve_navigation(target, is_auth) {
            NavDecision::RedirectLogin { remember } => {
                web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
                session().remember_redirect(&remember);
                let redirect = AppRoute::auth_failure_redirect();
                if use_push {
                    push_history_state(&redirect.to_path());
                } else {
                    replace_history_state(&redirect.to_path());
                }
                self.set_route.set(redirect);
            }
            NavDecision::Load(route) => {
                if use_push {
                    push_history_state(&route.to_path());
                } else {
                    replace_history_state(&route.to_path());
                }
                self.set_route.set(route);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_location(&current_path(), &current_search());
            // popstate 时也执行守卫
            match resolve_navigation(target, is_authenticated.get_untracked()) {
                NavDecision::RedirectLogin { remember } => {
                    session().remember_redirect(&remember);
                    let redirect = AppRoute::auth_failure_redirect();
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                NavDecision::Load(route) => set_route.set(route),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登出（认证信号翻转为 false）时，把受保护页面上的用户送回登录页。
    /// 登录侧的跳转由登录流程自己决定（角色落地页 / 记录的回跳路径）。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if !is_auth && route.requires_auth() {
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    // 初始 URL 同样过守卫（地址栏直接输入受保护地址的场景），
    // 用 replace 避免污染历史栈
    router.apply(
        AppRoute::from_location(&current_path(), &current_search()),
        false,
    );

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

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件：根据当前路由渲染对应视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 应用内链接：渲染真实 `<a href>`，点击时走路由服务（保留守卫）
#[component]
pub fn RouteLink(
    /// 目标路由
    to: AppRoute,
    /// CSS 类
    #[prop(into, optional)]
    class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();
    let target = to.clone();

    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(target.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_protected_navigation_records_origin() {
        let decision = resolve_navigation(AppRoute::Dashboard, false);
        assert_eq!(
            decision,
            NavDecision::RedirectLogin {
                remember: "/dashboard".to_string()
            }
        );

        // 带参数的路由记录完整路径
        let decision = resolve_navigation(
            AppRoute::PaymentSuccess {
                reference: Some("ref-7".into()),
            },
            false,
        );
        assert_eq!(
            decision,
            NavDecision::RedirectLogin {
                remember: "/payment-success?reference=ref-7".to_string()
            }
        );
    }

    #[test]
    fn authenticated_navigation_loads_target() {
        assert_eq!(
            resolve_navigation(AppRoute::Dashboard, true),
            NavDecision::Load(AppRoute::Dashboard)
        );
    }

    #[test]
    fn public_routes_load_without_auth() {
        assert_eq!(
            resolve_navigation(AppRoute::Events, false),
            NavDecision::Load(AppRoute::Events)
        );
        let detail = AppRoute::EventDetail {
            slug: "summer-fest".into(),
        };
        assert_eq!(
            resolve_navigation(detail.clone(), false),
            NavDecision::Load(detail)
        );
    }
}
