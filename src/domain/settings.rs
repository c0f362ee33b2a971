// ==========================================
// 瓷砖产线成本核算系统 - 费率设置快照
// ==========================================
// 版本化: 每个快照自 effective_date 起生效,直到下一个快照
// 数值字段: 缺失/非数字一律按 0 处理
// ==========================================

use crate::common::{lenient_date, lenient_f64};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SettingsSnapshot - 费率设置快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default, deserialize_with = "lenient_date")]
    pub effective_date: Option<NaiveDate>, // 生效日期

    // ===== 能源单价 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub electricity_rate_per_unit: f64, // 电价（元/度）
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gas_rate_per_unit: f64, // 气价（元/单位）

    // ===== 包装单价 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub premium_box_rate: f64, // 优等品包装（元/箱）
    #[serde(default, deserialize_with = "lenient_f64")]
    pub standard_box_rate: f64, // 标准/经济品包装（元/箱）
    #[serde(default, deserialize_with = "lenient_f64")]
    pub corner_stapling_rate: f64, // 护角+打钉（元/箱）

    // ===== 月度固定费用 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_salary: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_maintenance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_administration: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_interest: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_depreciation: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_other: f64,
}

impl SettingsSnapshot {
    /// 月度固定费用合计
    pub fn monthly_fixed_total(&self) -> f64 {
        crate::common::safe_sum([
            self.monthly_salary,
            self.monthly_maintenance,
            self.monthly_administration,
            self.monthly_interest,
            self.monthly_depreciation,
            self.monthly_other,
        ])
    }
}
