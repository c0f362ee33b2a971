// ==========================================
// 瓷砖产线成本核算系统 - 日期工具
// ==========================================
// 口径: 只取字符串中书写的日历日期,不做时区换算
// 例: "2024-01-10T23:30:00-05:00" → 2024-01-10（不会被换算成 UTC 的 01-11）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// 宽松解析日期
///
/// # 支持格式
/// - `YYYY-MM-DD` / `YYYY/MM/DD` / `YYYYMMDD`
/// - `YYYY-MM-DD HH:MM:SS`、RFC 3339（取前 10 位日期部分）
///
/// # 返回
/// - Some(NaiveDate): 解析成功
/// - None: 空串或无法识别
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    let bytes = trimmed.as_bytes();

    // YYYYMMDD
    if bytes.len() == 8 && bytes.iter().all(|b| b.is_ascii_digit()) {
        let year = trimmed[0..4].parse::<i32>().ok()?;
        let month = trimmed[4..6].parse::<u32>().ok()?;
        let day = trimmed[6..8].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // 带时间部分: 截取日期段
    if bytes.len() > 10 && (bytes[10] == b'T' || bytes[10] == b' ') {
        return NaiveDate::parse_from_str(&trimmed[..10], "%Y-%m-%d").ok();
    }

    None
}

/// serde 反序列化辅助: 日期字段宽松读取
///
/// 用法: `#[serde(default, deserialize_with = "lenient_date")]`
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => parse_lenient_date(&s),
        _ => None,
    })
}
