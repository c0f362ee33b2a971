// ==========================================
// 瓷砖产线成本核算系统 - 生产记录领域模型
// ==========================================
// 来源: 数据访问层按日期范围返回,引擎只读
// 数值字段: 缺失/非数字一律按 0 处理（反序列化时统一转换）
// ==========================================

use crate::common::{lenient_date, lenient_f64};
use crate::domain::size::normalize_size_code;
use crate::domain::types::ColorantChannel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ==========================================
// ProductionRow - 生产日报行
// ==========================================
// 一行 = 某日某规格的一条生产记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionRow {
    // ===== 维度 =====
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>, // 生产日期（无时间部分）
    #[serde(default)]
    pub size: String, // 规格代码,如 "400x400"
    #[serde(default)]
    pub owner_id: Option<String>, // 归属标识（透传,不参与计算）

    // ===== 成型 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub press_box: f64, // 压制箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub green_box_weight: f64, // 生坯单箱重量 (kg)

    // ===== 烧成与损耗 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kiln_entry_box: f64, // 入窑箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub packing_loss_box: f64, // 包装段损耗箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kiln_fired_loss_box: f64, // 烧成损耗箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sizing_loss_box: f64, // 磨边/分级损耗箱数

    // ===== 包装 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub premium_box: f64, // 优等品箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub standard_box: f64, // 标准品箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub eco_box: f64, // 经济品箱数
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_packing_box: f64, // 包装总箱数（护角/打钉计费口径）

    // ===== 能耗 =====
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spray_dryer_production: f64, // 喷雾干燥塔产量 (kg)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub coal_used_kg: f64, // 耗煤量 (kg)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_gas_consumption: f64, // 天然气用量
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_electricity_units_use: f64, // 用电量（度）

    // ===== 色料 =====
    #[serde(default)]
    pub colorant: ColorantUsage,
}

impl ProductionRow {
    /// 规格代码（标准写法,见 normalize_size_code）
    pub fn size_code(&self) -> Cow<'_, str> {
        normalize_size_code(&self.size)
    }

    /// 规格代码是否有效（非空）
    pub fn has_size(&self) -> bool {
        !self.size_code().is_empty()
    }
}

// ==========================================
// ColorantUsage - 各色料通道用量 (kg)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorantUsage {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub blue: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub black: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub brown: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub yellow: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pink: f64,
}

impl ColorantUsage {
    /// 指定通道用量
    pub fn usage(&self, channel: ColorantChannel) -> f64 {
        match channel {
            ColorantChannel::Blue => self.blue,
            ColorantChannel::Black => self.black,
            ColorantChannel::Brown => self.brown,
            ColorantChannel::Yellow => self.yellow,
            ColorantChannel::Pink => self.pink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_coerces_strings_and_missing_fields() {
        let raw = json!({
            "date": "2024-01-10",
            "size": "400x400",
            "press_box": "100",
            "green_box_weight": 10,
            "kiln_entry_box": "n/a",
            "colorant": { "blue": "2.5" }
        });

        let row: ProductionRow = serde_json::from_value(raw).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(row.press_box, 100.0);
        assert_eq!(row.green_box_weight, 10.0);
        assert_eq!(row.kiln_entry_box, 0.0);
        assert_eq!(row.premium_box, 0.0);
        assert_eq!(row.colorant.blue, 2.5);
        assert_eq!(row.colorant.black, 0.0);
    }

    #[test]
    fn test_null_and_missing_date() {
        let row: ProductionRow = serde_json::from_value(json!({ "date": null })).unwrap();
        assert_eq!(row.date, None);
        assert!(!row.has_size());

        let row: ProductionRow = serde_json::from_value(json!({ "size": " 600x600 " })).unwrap();
        assert_eq!(row.date, None);
        assert_eq!(row.size_code(), "600x600");

        let row: ProductionRow = serde_json::from_value(json!({ "size": "600X600" })).unwrap();
        assert_eq!(row.size_code(), "600x600");
    }
}
