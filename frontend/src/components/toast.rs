//! 浮动通知
//!
//! 页面各自持有一个 `ToastMessage` 信号，写入后自动在数秒内消失。

use leptos::prelude::*;
use std::time::Duration;

/// (文案, 是否错误)
pub type ToastMessage = Option<(String, bool)>;

const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// 写入通知并安排自动消失
pub fn show_toast(set: WriteSignal<ToastMessage>, message: impl Into<String>, is_error: bool) {
    set.set(Some((message.into(), is_error)));
    set_timeout(move || set.set(None), DISMISS_AFTER);
}

/// 通知渲染组件（右上角）
#[component]
pub fn Toast(message: ReadSignal<ToastMessage>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = message.get().map(|(_, e)| e).unwrap_or(false);
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || message.get().map(|(text, _)| text).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
