//! 十位 62 进制导航 ID 生成器
//!
//! 每次导航分配一个唯一 ID，用于日志追踪和事件关联。
//! ID 格式：10 位 62 进制字符串（0-9, a-z, A-Z）

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// 62 进制字符集
const BASE62_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ID 长度
const ID_LENGTH: usize = 10;

/// 生成 10 位 62 进制导航 ID
///
/// 使用时间戳 + 随机数组合，确保唯一性
///
/// # Example
///
/// ```
/// use nav_core::utils::id::generate_id;
///
/// let id = generate_id();
/// assert_eq!(id.len(), 10);
/// ```
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();

    // 获取当前时间戳（毫秒）
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    // 生成随机数
    let random: u64 = rng.gen();

    // 组合时间戳和随机数
    let mut value = timestamp ^ random;

    // 转换为 62 进制
    let mut result = Vec::with_capacity(ID_LENGTH);
    for _ in 0..ID_LENGTH {
        let index = (value % 62) as usize;
        result.push(BASE62_CHARS[index]);
        value /= 62;
    }

    // 反转得到最终 ID
    result.reverse();
    String::from_utf8(result).unwrap_or_default()
}

/// 验证 ID 格式是否有效
///
/// # Example
///
/// ```
/// use nav_core::utils::id::is_valid_id;
///
/// assert!(is_valid_id("a1B2c3D4e5"));
/// assert!(!is_valid_id("invalid"));
/// ```
pub fn is_valid_id(id: &str) -> bool {
    if id.len() != ID_LENGTH {
        return false;
    }

    id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// 从字符串解析 ID（带验证）
///
/// 如果 ID 有效，返回 `Some(String)`，否则返回 `None`
pub fn parse_id(id: &str) -> Option<String> {
    if is_valid_id(id) {
        Some(id.to_string())
    } else {
        None
    }
}
