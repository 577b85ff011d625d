//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、路径解析以及访问守卫属性。

use std::fmt::Display;

/// 应用路由枚举
///
/// 带参数的路由（slug / reference / uid+token）在解析时捕获参数，
/// 支付回跳页额外从查询串中取 `reference`。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页（营销落地页）
    #[default]
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword {
        uid: String,
        token: String,
    },
    /// 活动列表（公开）
    Events,
    /// 活动详情（公开，预订时才要求登录）
    EventDetail {
        slug: String,
    },
    CreateEvent,
    /// 主办方仪表盘
    Dashboard,
    /// 主办方收款账户设置
    Settings,
    Profile,
    MyTickets,
    TicketDetail {
        reference: String,
    },
    /// 活动上架支付回跳
    PaymentSuccess {
        reference: Option<String>,
    },
    /// 购票支付回跳
    TicketPaymentSuccess {
        reference: Option<String>,
    },
    VendorServices,
    VendorServiceDetail {
        slug: String,
    },
    CreateVendorService,
    VendorDashboard,
    /// 主办方已发送的合作请求
    SentRequests,
    /// 服务商收到的合作请求
    MyRequests,
    Unauthorized,
    NotFound,
}

/// 从查询串中提取一个参数（形如 `?reference=abc&x=1`）
fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

impl AppRoute {
    /// 将 URL path + 查询串解析为路由枚举
    pub fn from_location(path: &str, search: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password", uid, token] => Self::ResetPassword {
                uid: (*uid).to_string(),
                token: (*token).to_string(),
            },
            ["events"] => Self::Events,
            ["events", "create"] => Self::CreateEvent,
            ["events", slug] => Self::EventDetail {
                slug: (*slug).to_string(),
            },
            ["dashboard"] => Self::Dashboard,
            ["dashboard", "settings"] => Self::Settings,
            ["dashboard", "profile"] => Self::Profile,
            // 原始路径与导航链接两种拼写并存，都接受
            ["my-ticket"] | ["my-tickets"] => Self::MyTickets,
            ["ticket", reference] => Self::TicketDetail {
                reference: (*reference).to_string(),
            },
            ["payment-success"] => Self::PaymentSuccess {
                reference: query_param(search, "reference"),
            },
            ["payment-ticket-success"] => Self::TicketPaymentSuccess {
                reference: query_param(search, "reference"),
            },
            ["vendors"] | ["vendors", "services"] => Self::VendorServices,
            ["vendors", "services", slug] => Self::VendorServiceDetail {
                slug: (*slug).to_string(),
            },
            ["vendors", "create"] => Self::CreateVendorService,
            ["vendors", "dashboard"] => Self::VendorDashboard,
            ["vendors", "sent-requests"] => Self::SentRequests,
            ["vendors", "my-requests"] => Self::MyRequests,
            ["unauthorized"] => Self::Unauthorized,
            _ => Self::NotFound,
        }
    }

    /// 仅按 path 解析（无查询串）
    pub fn from_path(path: &str) -> Self {
        Self::from_location(path, "")
    }

    /// 路由对应的 URL（含支付回跳页的查询串）
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { uid, token } => format!("/reset-password/{}/{}", uid, token),
            Self::Events => "/events".to_string(),
            Self::EventDetail { slug } => format!("/events/{}", slug),
            Self::CreateEvent => "/events/create".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Settings => "/dashboard/settings".to_string(),
            Self::Profile => "/dashboard/profile".to_string(),
            Self::MyTickets => "/my-tickets".to_string(),
            Self::TicketDetail { reference } => format!("/ticket/{}", reference),
            Self::PaymentSuccess { reference } => match reference {
                Some(r) => format!("/payment-success?reference={}", r),
                None => "/payment-success".to_string(),
            },
            Self::TicketPaymentSuccess { reference } => match reference {
                Some(r) => format!("/payment-ticket-success?reference={}", r),
                None => "/payment-ticket-success".to_string(),
            },
            Self::VendorServices => "/vendors/services".to_string(),
            Self::VendorServiceDetail { slug } => format!("/vendors/services/{}", slug),
            Self::CreateVendorService => "/vendors/create".to_string(),
            Self::VendorDashboard => "/vendors/dashboard".to_string(),
            Self::SentRequests => "/vendors/sent-requests".to_string(),
            Self::MyRequests => "/vendors/my-requests".to_string(),
            Self::Unauthorized => "/unauthorized".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：该路由是否要求已登录会话**
    ///
    /// 活动/服务详情保持公开，预订动作在页面内自行检查令牌。
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::CreateEvent
                | Self::Dashboard
                | Self::Settings
                | Self::Profile
                | Self::MyTickets
                | Self::PaymentSuccess { .. }
                | Self::TicketPaymentSuccess { .. }
                | Self::CreateVendorService
                | Self::VendorDashboard
                | Self::SentRequests
                | Self::MyRequests
        )
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/events"), AppRoute::Events);
        assert_eq!(AppRoute::from_path("/dashboard/settings"), AppRoute::Settings);
        assert_eq!(AppRoute::from_path("/vendors"), AppRoute::VendorServices);
        assert_eq!(AppRoute::from_path("/nope/nope"), AppRoute::NotFound);
    }

    #[test]
    fn create_takes_precedence_over_slug() {
        assert_eq!(AppRoute::from_path("/events/create"), AppRoute::CreateEvent);
        assert_eq!(
            AppRoute::from_path("/events/summer-fest"),
            AppRoute::EventDetail {
                slug: "summer-fest".into()
            }
        );
    }

    #[test]
    fn parses_parameterised_routes() {
        assert_eq!(
            AppRoute::from_path("/reset-password/MQ/tok-123"),
            AppRoute::ResetPassword {
                uid: "MQ".into(),
                token: "tok-123".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/ticket/EVT-99"),
            AppRoute::TicketDetail {
                reference: "EVT-99".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/vendors/services/dj-krush"),
            AppRoute::VendorServiceDetail {
                slug: "dj-krush".into()
            }
        );
    }

    #[test]
    fn payment_routes_capture_reference_query() {
        assert_eq!(
            AppRoute::from_location("/payment-success", "?reference=ref-1"),
            AppRoute::PaymentSuccess {
                reference: Some("ref-1".into())
            }
        );
        assert_eq!(
            AppRoute::from_location("/payment-ticket-success", ""),
            AppRoute::TicketPaymentSuccess { reference: None }
        );
        // 空值视为缺失
        assert_eq!(
            AppRoute::from_location("/payment-success", "?reference="),
            AppRoute::PaymentSuccess { reference: None }
        );
    }

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Events,
            AppRoute::EventDetail {
                slug: "summer-fest".into(),
            },
            AppRoute::CreateEvent,
            AppRoute::Dashboard,
            AppRoute::MyTickets,
            AppRoute::VendorDashboard,
            AppRoute::SentRequests,
            AppRoute::Unauthorized,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn guard_covers_authenticated_pages_only() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::MyTickets.requires_auth());
        assert!(AppRoute::CreateEvent.requires_auth());
        assert!(AppRoute::VendorDashboard.requires_auth());

        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Events.requires_auth());
        assert!(
            !AppRoute::EventDetail {
                slug: "x".into()
            }
            .requires_auth()
        );
        assert!(!AppRoute::VendorServices.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
    }
}
