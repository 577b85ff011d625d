//! 创建活动表单状态
//!
//! 将零散的 signal 整合为 `EventFormState`，负责：
//! - 数据的持有与重置
//! - 调用校验并保存字段级错误
//! - 转换为 multipart 表单（含票档 JSON 与传单文件）

use crate::validate::{EventFormInput, FieldErrors, TierInput, validate_event_form};
use eventhub_shared::PriceTier;
use leptos::prelude::*;

/// 表单状态结构体
///
/// `RwSignal` 实现 `Copy`，适合在组件间直接传递。
/// 传单文件本体是 JS 句柄（非 `Send`），由页面持有，只在事件
/// 处理器中流动；这里只跟踪其 MIME 类型用于校验，结构保持 `Send`。
#[derive(Clone, Copy)]
pub struct EventFormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub location: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub ticket_price: RwSignal<String>,
    pub capacity: RwSignal<String>,
    pub flyer_mime: RwSignal<Option<String>>,
    pub tiers: RwSignal<Vec<TierInput>>,
    pub errors: RwSignal<FieldErrors>,
}

impl EventFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            start_date: RwSignal::new(String::new()),
            end_date: RwSignal::new(String::new()),
            ticket_price: RwSignal::new(String::new()),
            capacity: RwSignal::new(String::new()),
            flyer_mime: RwSignal::new(None),
            tiers: RwSignal::new(vec![TierInput {
                name: "Regular".to_string(),
                price: String::new(),
                capacity: String::new(),
            }]),
            errors: RwSignal::new(FieldErrors::new()),
        }
    }

    /// 汇集当前输入
    pub fn input(&self) -> EventFormInput {
        EventFormInput {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            location: self.location.get_untracked(),
            start_date: self.start_date.get_untracked(),
            end_date: self.end_date.get_untracked(),
            ticket_price: self.ticket_price.get_untracked(),
            capacity: self.capacity.get_untracked(),
            flyer_mime: self.flyer_mime.get_untracked(),
        }
    }

    /// 整表校验；错误写入 `errors`，返回是否可提交
    pub fn validate(&self) -> bool {
        let errors = validate_event_form(&self.input(), &self.tiers.get_untracked());
        let ok = errors.is_empty();
        self.errors.set(errors);
        ok
    }

    /// 某字段的当前错误（渲染内联提示用）
    pub fn error_for(&self, key: &str) -> Option<String> {
        self.errors.with(|e| e.get(key).cloned())
    }

    /// 转换为 multipart 表单。须在 `validate()` 通过后调用，
    /// 票档数值此时已保证可解析；传单文件由页面传入。
    pub fn to_form_data(&self, flyer: Option<&web_sys::File>) -> Result<web_sys::FormData, String> {
        let form = web_sys::FormData::new().map_err(|e| format!("{:?}", e))?;
        let input = self.input();

        let fields = [
            ("title", input.title),
            ("description", input.description),
            ("location", input.location),
            ("start_date", input.start_date),
            ("end_date", input.end_date),
            ("ticket_price", input.ticket_price),
            ("capacity", input.capacity),
        ];
        for (name, value) in fields {
            form.append_with_str(name, &value)
                .map_err(|e| format!("{:?}", e))?;
        }

        let tiers: Vec<PriceTier> = self
            .tiers
            .get_untracked()
            .iter()
            .filter_map(|tier| {
                Some(PriceTier {
                    name: tier.name.clone(),
                    price: tier.price.trim().parse().ok()?,
                    capacity: tier.capacity.trim().parse().ok()?,
                })
            })
            .collect();
        let tiers_json = serde_json::to_string(&tiers).map_err(|e| e.to_string())?;
        form.append_with_str("price_tiers", &tiers_json)
            .map_err(|e| format!("{:?}", e))?;

        if let Some(file) = flyer {
            form.append_with_blob("flyer", file)
                .map_err(|e| format!("{:?}", e))?;
        }

        Ok(form)
    }

    pub fn add_tier(&self) {
        self.tiers.update(|tiers| tiers.push(TierInput::default()));
    }

    pub fn remove_tier(&self, index: usize) {
        self.tiers.update(|tiers| {
            if index < tiers.len() {
                tiers.remove(index);
            }
        });
    }
}

impl Default for EventFormState {
    fn default() -> Self {
        Self::new()
    }
}
