//! 定时器封装模块
//!
//! 基于 `web_sys` 原生 `setInterval` 的轻量封装。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 持有句柄时有效；drop 时自动清除。页面级的长驻定时器
/// （如活动倒计时）可用 [`Interval::leak`] 与页面共存亡，
/// 回调内须用 `try_update` 之类的容错写法。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # Panics
    /// 无法获取 window 对象或设置定时器失败时 panic
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window().expect("no window object");

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .expect("failed to set interval");

        Self { handle, closure }
    }

    /// 放弃所有权并保持定时器长驻（不再可取消）
    pub fn leak(self) {
        std::mem::forget(self);
    }

    /// 取消定时器
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
