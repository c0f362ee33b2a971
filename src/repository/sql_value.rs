// ==========================================
// 瓷砖产线成本核算系统 - SQLite 原始值读取
// ==========================================
// 数值列未声明类型,可能存入整数/浮点/文本/NULL
// 统一按宽松口径转换: 无法识别 → 0
// ==========================================

use crate::common::{parse_lenient_date, parse_lenient_f64};
use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::Row;

/// 读取数值列（宽松）
pub fn read_f64(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    let value = match row.get_ref(idx)? {
        ValueRef::Integer(i) => i as f64,
        ValueRef::Real(r) if r.is_finite() => r,
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(parse_lenient_f64)
            .unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(value)
}

/// 读取日期列（宽松,无法解析为 None）
pub fn read_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let date = match row.get_ref(idx)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(parse_lenient_date),
        _ => None,
    };
    Ok(date)
}

/// 读取可空文本列
pub fn read_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let text = match row.get_ref(idx)? {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        _ => None,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_mixed_storage_classes() {
        let conn = Connection::open_in_memory().unwrap();
        let (a, b, c, d, e): (f64, f64, f64, f64, f64) = conn
            .query_row(
                "SELECT 12, 1.5, '1,234.5', NULL, 'abc'",
                [],
                |row| {
                    Ok((
                        read_f64(row, 0)?,
                        read_f64(row, 1)?,
                        read_f64(row, 2)?,
                        read_f64(row, 3)?,
                        read_f64(row, 4)?,
                    ))
                },
            )
            .unwrap();
        assert_eq!((a, b, c, d, e), (12.0, 1.5, 1234.5, 0.0, 0.0));

        let date = conn
            .query_row("SELECT '2024-01-10 08:30:00'", [], |row| read_date(row, 0))
            .unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10));
    }
}
