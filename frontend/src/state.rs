//! 页面取数状态
//!
//! 每个数据页用一个 `Fetch<T>` 信号描述取数过程，渲染时穷尽匹配，
//! 排除"同时 loading 又 error"之类的非法状态组合。

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fetch<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> Fetch<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// 由接口调用结果收敛
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Fetch::Loaded(data),
            Err(e) => Fetch::Error(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result_collapses_states() {
        let ok: Fetch<u32> = Fetch::from_result(Ok(7));
        assert_eq!(ok.loaded(), Some(&7));
        assert!(!ok.is_loading());

        let err: Fetch<u32> = Fetch::from_result(Err(ApiError::Decode("bad".into())));
        assert!(matches!(err, Fetch::Error(_)));
        assert_eq!(err.loaded(), None);
    }
}
