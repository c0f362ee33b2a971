// ==========================================
// 瓷砖产线成本核算系统 - 规格代码解析
// ==========================================
// 规格代码: "宽x高"（毫米）,如 "600x1200"
// 无法解析的代码面积记为 0
// ==========================================

use std::borrow::Cow;

/// 规格代码标准写法: 去空白、小写,分隔符 `X` / `*` / `×` 统一为 `x`
///
/// 已是标准写法时不分配
pub fn normalize_size_code(code: &str) -> Cow<'_, str> {
    let trimmed = code.trim();
    let canonical = trimmed
        .chars()
        .all(|c| !c.is_whitespace() && !c.is_ascii_uppercase() && c != '*' && c != '×');
    if canonical {
        return Cow::Borrowed(trimmed);
    }

    Cow::Owned(
        trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '*' | '×' => 'x',
                other => other.to_ascii_lowercase(),
            })
            .collect(),
    )
}

/// 解析规格代码为 (宽, 高) 毫米
///
/// 宽高必须为正的有限数
pub fn parse_size_mm(code: &str) -> Option<(f64, f64)> {
    let normalized = normalize_size_code(code);
    let mut parts = normalized.split('x');

    let width = parts.next()?.trim().parse::<f64>().ok()?;
    let height = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Some((width, height))
    } else {
        None
    }
}

/// 单片面积（平方米）
///
/// # 返回
/// - 有效规格: 宽(m) × 高(m)
/// - 无效规格: 0.0
pub fn size_area_sqm(code: &str) -> f64 {
    parse_size_mm(code)
        .map(|(w, h)| (w / 1000.0) * (h / 1000.0))
        .unwrap_or(0.0)
}
