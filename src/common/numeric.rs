// ==========================================
// 瓷砖产线成本核算系统 - 数值工具
// ==========================================
// 零分母策略: safe_div 在分母为 0 或结果非有限值时返回 0.0,绝不 panic
// 容错策略: 缺失/空串/非数字 → 0.0
// ==========================================

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 将任意 JSON 值转换为 f64
///
/// # 规则
/// - Number → 对应数值（非有限值视为 0）
/// - String → 去空白后解析,失败为 0
/// - Bool → true=1 / false=0
/// - Null / Array / Object → 0
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_lenient_f64(s),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// 宽松解析字符串数值
///
/// 允许千分位逗号（"1,250.5"）,其余无法解析的内容一律为 0
pub fn parse_lenient_f64(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// serde 反序列化辅助: 数值字段宽松读取
///
/// 用法: `#[serde(default, deserialize_with = "lenient_f64")]`
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// 安全除法
///
/// 分母为 0（或结果为 NaN/∞）时返回 0.0
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        0.0
    }
}

/// 安全求和（跳过非有限值）
pub fn safe_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| v.is_finite()).sum()
}

/// 保留两位小数（四舍五入）
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// 格式化为两位小数字符串（展示层口径）
pub fn format2(value: f64) -> String {
    let rounded = round2(value);
    // -0.00 统一为 0.00
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_f64_variants() {
        assert_eq!(coerce_f64(&json!(12.5)), 12.5);
        assert_eq!(coerce_f64(&json!("42")), 42.0);
        assert_eq!(coerce_f64(&json!(" 3.5 ")), 3.5);
        assert_eq!(coerce_f64(&json!("1,250.5")), 1250.5);
        assert_eq!(coerce_f64(&json!("abc")), 0.0);
        assert_eq!(coerce_f64(&json!("")), 0.0);
        assert_eq!(coerce_f64(&json!(null)), 0.0);
        assert_eq!(coerce_f64(&json!([1, 2])), 0.0);
        assert_eq!(coerce_f64(&json!(true)), 1.0);
    }

    #[test]
    fn test_parse_lenient_rejects_non_finite() {
        assert_eq!(parse_lenient_f64("NaN"), 0.0);
        assert_eq!(parse_lenient_f64("inf"), 0.0);
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(0.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_safe_sum_skips_nan() {
        assert_eq!(safe_sum(vec![1.0, f64::NAN, 2.0, f64::INFINITY]), 3.0);
        assert_eq!(safe_sum(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_format2() {
        assert_eq!(format2(1278.9), "1278.90");
        assert_eq!(format2(0.0), "0.00");
        assert_eq!(format2(-0.001), "0.00");
        assert_eq!(format2(2.346), "2.35");
        assert_eq!(format2(f64::NAN), "0.00");
    }
}
