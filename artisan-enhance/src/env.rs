//! Environment variable lookup shared by client and enhancer configuration.

/// 依次读取 `keys`，返回第一个非空白的值。
pub(crate) fn first_non_blank(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}
