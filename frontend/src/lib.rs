//! EventHub 前端应用
//!
//! 纯客户端渲染（CSR）的活动售票 + 服务商市场界面。
//! 业务逻辑全部在外部 REST 后端，这里只做取数渲染与表单提交。
//!
//! 模块划分：
//! - `web::route` / `web::router`: 路由定义与守卫引擎
//! - `session`: 令牌与回跳路径的唯一存取入口
//! - `api`: 带"401 单次刷新重放"管道的接口客户端
//! - `auth`: 认证上下文与页面级守卫钩子
//! - `export`: 门票 PDF / 二维码导出与打印兜底
//! - `components`: 页面层

mod api;
mod auth;
mod export;
mod session;
mod state;
mod validate;

mod components {
    pub mod dashboard;
    pub mod event_create;
    pub mod event_detail;
    pub mod events_list;
    pub mod forgot_password;
    pub mod home;
    mod icons;
    mod layout;
    pub mod login;
    pub mod my_requests;
    pub mod my_tickets;
    pub mod payment_result;
    pub mod profile;
    pub mod register;
    pub mod reset_password;
    pub mod sent_requests;
    pub mod settings;
    pub mod ticket_detail;
    mod toast;
    pub mod vendor_create;
    pub mod vendor_dashboard;
    pub mod vendor_service_detail;
    pub mod vendor_services;
}

// 原生 Web API 封装模块
// 对 fetch / History / setInterval 的轻量封装，让上层与 web_sys
// 细节解耦，同时便于在测试中替换传输层。
// （localStorage 的封装在 `session`，那里是令牌语义的唯一入口。）
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    mod timer;

    pub use timer::Interval;
}

use crate::api::Api;
use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::event_create::CreateEventPage;
use crate::components::event_detail::EventDetailPage;
use crate::components::events_list::EventsPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::my_requests::MyRequestsPage;
use crate::components::my_tickets::MyTicketsPage;
use crate::components::payment_result::{PaymentKind, PaymentResultPage};
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::reset_password::ResetPasswordPage;
use crate::components::sent_requests::SentRequestsPage;
use crate::components::settings::SettingsPage;
use crate::components::ticket_detail::TicketDetailPage;
use crate::components::vendor_create::CreateVendorServicePage;
use crate::components::vendor_dashboard::VendorDashboardPage;
use crate::components::vendor_service_detail::VendorServiceDetailPage;
use crate::components::vendor_services::VendorServicesPage;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

use leptos::prelude::*;

/// 路由匹配函数：路由枚举 -> 页面视图
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword { uid, token } => {
            view! { <ResetPasswordPage uid=uid token=token /> }.into_any()
        }
        AppRoute::Events => view! { <EventsPage /> }.into_any(),
        AppRoute::EventDetail { slug } => view! { <EventDetailPage slug=slug /> }.into_any(),
        AppRoute::CreateEvent => view! { <CreateEventPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::MyTickets => view! { <MyTicketsPage /> }.into_any(),
        AppRoute::TicketDetail { reference } => {
            view! { <TicketDetailPage reference=reference /> }.into_any()
        }
        AppRoute::PaymentSuccess { reference } => {
            view! { <PaymentResultPage kind=PaymentKind::EventPublish reference=reference /> }
                .into_any()
        }
        AppRoute::TicketPaymentSuccess { reference } => {
            view! { <PaymentResultPage kind=PaymentKind::TicketPurchase reference=reference /> }
                .into_any()
        }
        AppRoute::VendorServices => view! { <VendorServicesPage /> }.into_any(),
        AppRoute::VendorServiceDetail { slug } => {
            view! { <VendorServiceDetailPage slug=slug /> }.into_any()
        }
        AppRoute::CreateVendorService => view! { <CreateVendorServicePage /> }.into_any(),
        AppRoute::VendorDashboard => view! { <VendorDashboardPage /> }.into_any(),
        AppRoute::SentRequests => view! { <SentRequestsPage /> }.into_any(),
        AppRoute::MyRequests => view! { <MyRequestsPage /> }.into_any(),
        AppRoute::Unauthorized => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-warning">"403"</h1>
                    <p class="text-xl mt-4">"You don't have access to this page."</p>
                    <a href="/" class="btn btn-primary mt-6">"Back home"</a>
                </div>
            </div>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <a href="/" class="btn btn-primary mt-6">"Back home"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 认证上下文（从已持久化的会话初始化）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 接口客户端（全局唯一实例）
    provide_context(Api::default_client());

    // 3. 认证信号注入路由服务做守卫（解耦）
    let is_authenticated = auth_ctx.signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
