//! 客户端表单校验
//!
//! 校验全部在提交前同步完成，未通过的提交不发起网络调用。
//! 错误按字段键入 `FieldErrors`，页面逐字段内联展示。

use eventhub_shared::date::parse_datetime_local;
use std::collections::BTreeMap;

/// 字段名 -> 错误文案
pub type FieldErrors = BTreeMap<String, String>;

const REQUIRED: &str = "This field is required";

// =========================================================
// 通用规则
// =========================================================

/// 邮箱形状检查：`local@domain.tld`，不含空白
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// 正的价格数值
fn is_valid_price(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(|v| v > 0.0)
}

/// 正整数容量
fn is_valid_capacity(value: &str) -> bool {
    value.trim().parse::<u32>().is_ok_and(|v| v > 0)
}

// =========================================================
// 登录 / 注册
// =========================================================

/// 登录表单（整体一条提示，不分字段）
pub fn validate_login(email: &str, password: &str) -> Option<String> {
    if email.is_empty() || password.is_empty() {
        return Some("Email and password are required".to_string());
    }
    if !is_valid_email(email) {
        return Some("Invalid email address".to_string());
    }
    None
}

pub fn validate_registration(username: &str, email: &str, password: &str) -> Option<String> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Some("All fields are required".to_string());
    }
    if !is_valid_email(email) {
        return Some("Invalid email address".to_string());
    }
    if password.len() < 6 {
        return Some("Password must be at least 6 characters".to_string());
    }
    None
}

// =========================================================
// 收款账户
// =========================================================

/// 尼日利亚 NUBAN 账号：10 位数字
pub fn is_valid_account_number(value: &str) -> bool {
    value.len() == 10 && value.chars().all(|c| c.is_ascii_digit())
}

/// 自定义银行代码：3 位数字
pub fn is_valid_custom_bank_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|c| c.is_ascii_digit())
}

// =========================================================
// 预订数量
// =========================================================

/// 数量步进并收敛到 `[1, remaining]`；越界操作等同不动。
/// `remaining == 0` 时控件本就不渲染，这里按下界 1 兜底。
pub fn adjust_quantity(current: u32, delta: i32, remaining: u32) -> u32 {
    let upper = remaining.max(1) as i64;
    (current as i64 + delta as i64).clamp(1, upper) as u32
}

// =========================================================
// 创建活动表单
// =========================================================

/// 表单原始输入（均为 input 的字符串值）
#[derive(Debug, Clone, Default)]
pub struct EventFormInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub ticket_price: String,
    pub capacity: String,
    /// 选中文件的 MIME 类型；未选择时为 None
    pub flyer_mime: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TierInput {
    pub name: String,
    pub price: String,
    pub capacity: String,
}

/// 单字段规则（变更时即时校验用）
pub fn validate_event_field(name: &str, value: &str, start_date: &str) -> Option<String> {
    if value.is_empty() {
        return Some(REQUIRED.to_string());
    }
    match name {
        "title" if value.len() < 5 => Some("Title must be at least 5 characters".to_string()),
        "description" if value.len() < 20 => {
            Some("Description must be at least 20 characters".to_string())
        }
        "start_date" | "end_date" => {
            let Some(parsed) = parse_datetime_local(value) else {
                return Some("Please enter a valid date".to_string());
            };
            if name == "end_date" {
                if let Some(start) = parse_datetime_local(start_date) {
                    if parsed <= start {
                        return Some("End date must be after start date".to_string());
                    }
                }
            }
            None
        }
        "ticket_price" if !is_valid_price(value) => {
            Some("Please enter a valid price".to_string())
        }
        "capacity" if !is_valid_capacity(value) => {
            Some("Please enter a valid capacity".to_string())
        }
        _ => None,
    }
}

/// 整表校验；返回的 map 为空即可提交
pub fn validate_event_form(form: &EventFormInput, tiers: &[TierInput]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let fields = [
        ("title", form.title.as_str()),
        ("description", form.description.as_str()),
        ("location", form.location.as_str()),
        ("start_date", form.start_date.as_str()),
        ("end_date", form.end_date.as_str()),
        ("ticket_price", form.ticket_price.as_str()),
        ("capacity", form.capacity.as_str()),
    ];
    for (name, value) in fields {
        if let Some(message) = validate_event_field(name, value, &form.start_date) {
            errors.insert(name.to_string(), message);
        }
    }

    match &form.flyer_mime {
        None => {
            errors.insert("flyer".to_string(), "Please upload an event flyer".to_string());
        }
        Some(mime) if !mime.starts_with("image/") => {
            errors.insert("flyer".to_string(), "Please upload an image file".to_string());
        }
        Some(_) => {}
    }

    for (index, tier) in tiers.iter().enumerate() {
        if tier.name.is_empty() {
            errors.insert(format!("tier_{}_name", index), "Tier name is required".to_string());
        }
        if !is_valid_price(&tier.price) {
            errors.insert(
                format!("tier_{}_price", index),
                "Please enter a valid price".to_string(),
            );
        }
        if !is_valid_capacity(&tier.capacity) {
            errors.insert(
                format!("tier_{}_capacity", index),
                "Please enter a valid capacity".to_string(),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> EventFormInput {
        EventFormInput {
            title: "Lagos Tech Fest".into(),
            description: "Two days of talks, demos and networking.".into(),
            location: "Landmark Centre".into(),
            start_date: "2026-09-01T18:00".into(),
            end_date: "2026-09-01T21:00".into(),
            ticket_price: "5000".into(),
            capacity: "300".into(),
            flyer_mime: Some("image/png".into()),
        }
    }

    fn valid_tier() -> TierInput {
        TierInput {
            name: "Regular".into(),
            price: "5000".into(),
            capacity: "250".into(),
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate_event_form(&valid_form(), &[valid_tier()]).is_empty());
    }

    #[test]
    fn each_rule_blocks_with_its_message() {
        let mut form = valid_form();
        form.title = "Gig".into();
        let errors = validate_event_form(&form, &[]);
        assert_eq!(
            errors.get("title").map(String::as_str),
            Some("Title must be at least 5 characters")
        );

        let mut form = valid_form();
        form.description = "too short".into();
        assert_eq!(
            validate_event_form(&form, &[]).get("description").map(String::as_str),
            Some("Description must be at least 20 characters")
        );

        let mut form = valid_form();
        form.ticket_price = "-5".into();
        assert_eq!(
            validate_event_form(&form, &[]).get("ticket_price").map(String::as_str),
            Some("Please enter a valid price")
        );

        let mut form = valid_form();
        form.capacity = "12.5".into();
        assert_eq!(
            validate_event_form(&form, &[]).get("capacity").map(String::as_str),
            Some("Please enter a valid capacity")
        );
    }

    #[test]
    fn missing_required_field_blocks() {
        let mut form = valid_form();
        form.location = String::new();
        assert_eq!(
            validate_event_form(&form, &[]).get("location").map(String::as_str),
            Some("This field is required")
        );
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let mut form = valid_form();
        form.end_date = "2026-09-01T17:00".into();
        assert_eq!(
            validate_event_form(&form, &[]).get("end_date").map(String::as_str),
            Some("End date must be after start date")
        );

        // 相等也不行
        let mut form = valid_form();
        form.end_date = form.start_date.clone();
        assert!(validate_event_form(&form, &[]).contains_key("end_date"));

        let mut form = valid_form();
        form.end_date = "yesterday".into();
        assert_eq!(
            validate_event_form(&form, &[]).get("end_date").map(String::as_str),
            Some("Please enter a valid date")
        );
    }

    #[test]
    fn flyer_must_be_an_image() {
        let mut form = valid_form();
        form.flyer_mime = None;
        assert_eq!(
            validate_event_form(&form, &[]).get("flyer").map(String::as_str),
            Some("Please upload an event flyer")
        );

        form.flyer_mime = Some("application/pdf".into());
        assert_eq!(
            validate_event_form(&form, &[]).get("flyer").map(String::as_str),
            Some("Please upload an image file")
        );
    }

    #[test]
    fn tiers_validate_per_row() {
        let bad = TierInput {
            name: String::new(),
            price: "0".into(),
            capacity: "-1".into(),
        };
        let errors = validate_event_form(&valid_form(), &[valid_tier(), bad]);
        assert!(errors.contains_key("tier_1_name"));
        assert!(errors.contains_key("tier_1_price"));
        assert!(errors.contains_key("tier_1_capacity"));
        assert!(!errors.contains_key("tier_0_name"));
    }

    #[test]
    fn quantity_clamps_inside_bounds() {
        // 下界
        assert_eq!(adjust_quantity(1, -1, 10), 1);
        // 上界
        assert_eq!(adjust_quantity(10, 1, 10), 10);
        // 正常步进
        assert_eq!(adjust_quantity(3, 1, 10), 4);
        assert_eq!(adjust_quantity(3, -1, 10), 2);
        // 剩余缩水后收敛回上界
        assert_eq!(adjust_quantity(8, 1, 5), 5);
        // 售罄兜底
        assert_eq!(adjust_quantity(1, 1, 0), 1);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b@sub.domain.ng"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada example@x.co"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example."));
    }

    #[test]
    fn login_and_registration_messages() {
        assert_eq!(
            validate_login("", "pw").as_deref(),
            Some("Email and password are required")
        );
        assert_eq!(
            validate_login("nope", "pw").as_deref(),
            Some("Invalid email address")
        );
        assert!(validate_login("ada@example.com", "pw").is_none());

        assert_eq!(
            validate_registration("ada", "ada@example.com", "12345").as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(validate_registration("ada", "ada@example.com", "123456").is_none());
    }

    #[test]
    fn bank_account_rules() {
        assert!(is_valid_account_number("0123456789"));
        assert!(!is_valid_account_number("012345678"));
        assert!(!is_valid_account_number("01234567x9"));
        assert!(is_valid_custom_bank_code("058"));
        assert!(!is_valid_custom_bank_code("58"));
        assert!(!is_valid_custom_bank_code("05a"));
    }
}
