use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 后端对重复请求（同一活动 + 同一服务商）返回的约束错误片段。
/// 参见 DESIGN.md：应由结构化错误码替代，目前仅此一处依赖该文本。
pub const DUPLICATE_REQUEST_FRAGMENT: &str = "must make a unique set";

// =========================================================
// 金额反序列化
// =========================================================

/// 后端的金额字段（DecimalField）可能序列化为数字或数字字符串，
/// 这里两种都接受。
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn de_amount_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "de_amount")] f64);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

/// 千分位格式化金额（整数金额省略小数位）。
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let whole = amount.trunc() as u64;
    let frac = ((amount - amount.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac > 0 {
        out.push_str(&format!(".{:02}", frac));
    }
    out
}

/// 奈拉金额显示
pub fn format_naira(amount: f64) -> String {
    format!("₦{}", format_amount(amount))
}

// =========================================================
// 用户与会话 (User & Session)
// =========================================================

/// 用户角色
///
/// 决定登录后的默认落地页以及各页面的访问权限。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Organizer,
    Vendor,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Organizer => "organizer",
            UserRole::Vendor => "vendor",
            UserRole::Guest => "guest",
        }
    }

    /// 登录成功后（无记录的回跳路径时）的默认落地页
    pub fn landing_path(&self) -> &'static str {
        match self {
            UserRole::Organizer => "/dashboard",
            UserRole::Vendor => "/vendors/dashboard",
            UserRole::Guest => "/events",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub user_type: UserRole,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

/// 一对不透明的会话令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

// =========================================================
// 活动与门票 (Events & Tickets)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: u32,
    pub tickets_sold: u32,
    #[serde(deserialize_with = "de_amount")]
    pub ticket_price: f64,
    #[serde(default)]
    pub flyer: Option<String>,
}

impl Event {
    /// 剩余票数。`tickets_sold <= capacity` 由后端约定保证，
    /// 这里饱和相减以防短暂越界导致下溢。
    pub fn tickets_remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.tickets_sold)
    }

    pub fn is_sold_out(&self) -> bool {
        self.tickets_remaining() == 0
    }

    /// 已售比例 (0.0 - 100.0)，容量为 0 时视为售罄
    pub fn percent_sold(&self) -> f32 {
        if self.capacity == 0 {
            return 100.0;
        }
        (self.tickets_sold.min(self.capacity) as f32 / self.capacity as f32) * 100.0
    }
}

/// 票档（创建活动时以 JSON 数组随表单提交）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub name: String,
    pub price: f64,
    pub capacity: u32,
}

/// 已出票的门票视图，内嵌活动快照字段以便脱离活动详情展示。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub reference: String,
    pub quantity: u32,
    #[serde(default, deserialize_with = "de_amount_opt")]
    pub amount_paid: Option<f64>,
    /// 列表接口返回 `qr_code_url`，详情接口返回 `qr_code`
    #[serde(default, alias = "qr_code")]
    pub qr_code_url: Option<String>,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub event_location: String,
}

// =========================================================
// 服务商市场 (Vendor Marketplace)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorService {
    pub id: u64,
    pub slug: String,
    pub business_name: String,
    pub service_name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// 主办方向服务商发出的合作请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRequest {
    pub id: u64,
    /// 关联活动 id
    pub event: u64,
    /// 关联服务 id
    pub vendor_service: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    // 列表接口附带的展示字段，不保证存在
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub event_slug: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
}

impl VendorRequest {
    /// respond-request 接口使用的标识（优先活动 slug，回退数字 id）
    pub fn respond_key(&self) -> String {
        self.event_slug
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// 检查本地已拉取的已发送请求列表中，是否已存在同一 活动 + 服务 的请求。
/// 命中时提交控件应被禁用，且不应发起网络调用。
pub fn has_existing_request(sent: &[VendorRequest], event_id: u64, service_id: u64) -> bool {
    sent.iter()
        .any(|r| r.event == event_id && r.vendor_service == service_id)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorBooking {
    pub id: u64,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// =========================================================
// 仪表盘汇总 (Dashboard Summaries)
// =========================================================
//
// 汇总对象的每个字段都带 default：后端缺字段或字段形状不对时，
// 页面渲染空状态而不是解码失败。

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizerSummary {
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_revenue: f64,
    #[serde(default)]
    pub recent_events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorSummary {
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub confirmed_bookings: u64,
    #[serde(default)]
    pub recent_requests: Vec<VendorRequest>,
    #[serde(default)]
    pub recent_bookings: Vec<VendorBooking>,
}

// =========================================================
// 测试
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn event(capacity: u32, sold: u32) -> Event {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "slug": "rust-meetup",
            "title": "Rust Meetup",
            "description": "An evening of talks",
            "location": "Lagos",
            "start_date": "2026-09-01T18:00:00Z",
            "end_date": "2026-09-01T21:00:00Z",
            "capacity": capacity,
            "tickets_sold": sold,
            "ticket_price": 2000
        }))
        .unwrap()
    }

    #[test]
    fn tickets_remaining_saturates() {
        assert_eq!(event(100, 40).tickets_remaining(), 60);
        // 后端短暂越界时不下溢
        assert_eq!(event(100, 120).tickets_remaining(), 0);
        assert!(event(100, 100).is_sold_out());
    }

    #[test]
    fn percent_sold_handles_zero_capacity() {
        assert_eq!(event(0, 0).percent_sold(), 100.0);
        assert_eq!(event(200, 50).percent_sold(), 25.0);
    }

    #[test]
    fn amount_accepts_number_or_string() {
        let a: Event = serde_json::from_value(serde_json::json!({
            "id": 1, "slug": "s", "title": "t", "description": "d",
            "location": "l",
            "start_date": "2026-09-01T18:00:00Z",
            "end_date": "2026-09-01T21:00:00Z",
            "capacity": 10, "tickets_sold": 0,
            "ticket_price": "5000.00"
        }))
        .unwrap();
        assert_eq!(a.ticket_price, 5000.0);
    }

    #[test]
    fn ticket_accepts_both_qr_spellings() {
        let base = serde_json::json!({
            "reference": "EVT-1",
            "quantity": 2,
            "amount_paid": "4000.00",
            "event_title": "Rust Meetup",
            "event_date": "2026-09-01T18:00:00Z",
            "event_location": "Lagos"
        });

        let mut with_url = base.clone();
        with_url["qr_code_url"] = serde_json::json!("https://cdn/qr1.png");
        let t: Ticket = serde_json::from_value(with_url).unwrap();
        assert_eq!(t.qr_code_url.as_deref(), Some("https://cdn/qr1.png"));

        let mut with_alias = base;
        with_alias["qr_code"] = serde_json::json!("https://cdn/qr2.png");
        let t: Ticket = serde_json::from_value(with_alias).unwrap();
        assert_eq!(t.qr_code_url.as_deref(), Some("https://cdn/qr2.png"));
        assert_eq!(t.amount_paid, Some(4000.0));
    }

    #[test]
    fn summary_defaults_missing_fields() {
        // 汇总接口缺少 recent_* 时渲染空状态而非解码失败
        let s: OrganizerSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(s.total_events, 0);
        assert!(s.recent_events.is_empty());

        let v: VendorSummary =
            serde_json::from_value(serde_json::json!({ "total_requests": 3 })).unwrap();
        assert_eq!(v.total_requests, 3);
        assert!(v.recent_requests.is_empty());
        assert!(v.recent_bookings.is_empty());
    }

    #[test]
    fn duplicate_request_precheck() {
        let sent: Vec<VendorRequest> = serde_json::from_value(serde_json::json!([
            {
                "id": 9,
                "event": 123,
                "vendor_service": 45,
                "status": "pending",
                "created_at": "2026-08-01T10:00:00Z"
            }
        ]))
        .unwrap();

        assert!(has_existing_request(&sent, 123, 45));
        assert!(!has_existing_request(&sent, 123, 46));
        assert!(!has_existing_request(&sent, 124, 45));
        assert!(!has_existing_request(&[], 123, 45));
    }

    #[test]
    fn role_landing_paths() {
        assert_eq!(UserRole::Organizer.landing_path(), "/dashboard");
        assert_eq!(UserRole::Vendor.landing_path(), "/vendors/dashboard");
        assert_eq!(UserRole::Guest.landing_path(), "/events");

        let r: UserRole = serde_json::from_str("\"organizer\"").unwrap();
        assert_eq!(r, UserRole::Organizer);
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(2000.0), "2,000");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_naira(2000.0), "₦2,000");
    }
}
