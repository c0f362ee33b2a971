// ==========================================
// 瓷砖产线成本核算系统 - 公共工具层
// ==========================================
// 职责: 数值容错转换、安全除法/求和、日期解析
// 红线: 工具函数一律不抛错,异常输入降级为 0 / None
// ==========================================

pub mod date_utils;
pub mod numeric;

pub use date_utils::{lenient_date, parse_lenient_date};
pub use numeric::{coerce_f64, format2, lenient_f64, parse_lenient_f64, round2, safe_div, safe_sum};
