// ==========================================
// 瓷砖产线成本核算系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 成本类别 (Cost Category)
// ==========================================
// 八个相互独立的成本归集单元
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Material,    // 坯料（粉料）
    Glaze,       // 釉料
    Packing,     // 包装
    Fuel,        // 燃料（煤）
    Gas,         // 天然气
    Electricity, // 电
    Colorant,    // 色料
    Fixed,       // 固定费用分摊
}

impl CostCategory {
    /// 矩阵中的展示顺序
    pub const ALL: [CostCategory; 8] = [
        CostCategory::Material,
        CostCategory::Glaze,
        CostCategory::Packing,
        CostCategory::Fuel,
        CostCategory::Gas,
        CostCategory::Electricity,
        CostCategory::Colorant,
        CostCategory::Fixed,
    ];

    /// 对应的矩阵行
    pub fn head(self) -> CostHead {
        match self {
            CostCategory::Material => CostHead::Material,
            CostCategory::Glaze => CostHead::Glaze,
            CostCategory::Packing => CostHead::Packing,
            CostCategory::Fuel => CostHead::Fuel,
            CostCategory::Gas => CostHead::Gas,
            CostCategory::Electricity => CostHead::Electricity,
            CostCategory::Colorant => CostHead::Colorant,
            CostCategory::Fixed => CostHead::Fixed,
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head())
    }
}

// ==========================================
// 成本行 (Cost Head)
// ==========================================
// 矩阵行: 八个类别 + 合计 + 折算单位成本
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostHead {
    Material,
    Glaze,
    Packing,
    Fuel,
    Gas,
    Electricity,
    Colorant,
    Fixed,
    Total,
    PerSqm, // 合计 / 面积折算系数
}

impl CostHead {
    pub const ALL: [CostHead; 10] = [
        CostHead::Material,
        CostHead::Glaze,
        CostHead::Packing,
        CostHead::Fuel,
        CostHead::Gas,
        CostHead::Electricity,
        CostHead::Colorant,
        CostHead::Fixed,
        CostHead::Total,
        CostHead::PerSqm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostHead::Material => "material",
            CostHead::Glaze => "glaze",
            CostHead::Packing => "packing",
            CostHead::Fuel => "fuel",
            CostHead::Gas => "gas",
            CostHead::Electricity => "electricity",
            CostHead::Colorant => "colorant",
            CostHead::Fixed => "fixed",
            CostHead::Total => "total",
            CostHead::PerSqm => "per_sqm",
        }
    }
}

impl fmt::Display for CostHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 色料通道 (Colorant Channel)
// ==========================================
// 单价为固定常量,不随设置快照变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorantChannel {
    Blue,
    Black,
    Brown,
    Yellow,
    Pink,
}

impl ColorantChannel {
    pub const ALL: [ColorantChannel; 5] = [
        ColorantChannel::Blue,
        ColorantChannel::Black,
        ColorantChannel::Brown,
        ColorantChannel::Yellow,
        ColorantChannel::Pink,
    ];
}

impl fmt::Display for ColorantChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorantChannel::Blue => write!(f, "blue"),
            ColorantChannel::Black => write!(f, "black"),
            ColorantChannel::Brown => write!(f, "brown"),
            ColorantChannel::Yellow => write!(f, "yellow"),
            ColorantChannel::Pink => write!(f, "pink"),
        }
    }
}

// ==========================================
// 历史窗口 (History Range)
// ==========================================
// 有界回看: all 只回看 90 天
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRange {
    Day,
    Week,
    Month,
    All,
}

impl HistoryRange {
    /// 窗口天数
    pub fn days(self) -> u32 {
        match self {
            HistoryRange::Day => 1,
            HistoryRange::Week => 7,
            HistoryRange::Month => 30,
            HistoryRange::All => 90,
        }
    }

    /// 解析范围关键字
    ///
    /// # 返回
    /// - Some(HistoryRange): 已知关键字（大小写不敏感）
    /// - None: 未知关键字
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "today" | "day" | "daily" => Some(HistoryRange::Day),
            "week" | "weekly" => Some(HistoryRange::Week),
            "month" | "monthly" => Some(HistoryRange::Month),
            "all" => Some(HistoryRange::All),
            _ => None,
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRange::Day => write!(f, "today"),
            HistoryRange::Week => write!(f, "week"),
            HistoryRange::Month => write!(f, "month"),
            HistoryRange::All => write!(f, "all"),
        }
    }
}
