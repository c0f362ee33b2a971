// ==========================================
// 瓷砖产线成本核算系统 - 产量汇总
// ==========================================
// 单行净产量:
//   入窑 − 包装损耗 − (入窑 − 包装损耗 − 烧成损耗 − 磨边损耗) × 收缩率(0.015)
// 注意: 收缩扣减作用在“损耗差额”上,而不是直接作用在入窑数上
// ==========================================

use crate::config::CostingConfig;
use crate::domain::production::ProductionRow;
use serde::Serialize;
use std::collections::BTreeMap;

/// 单行净产量
pub fn net_quantity(row: &ProductionRow, shrinkage_rate: f64) -> f64 {
    let after_packing = row.kiln_entry_box - row.packing_loss_box;
    let differential = after_packing - row.kiln_fired_loss_box - row.sizing_loss_box;
    let net = after_packing - differential * shrinkage_rate;
    if net.is_finite() {
        net
    } else {
        0.0
    }
}

// ==========================================
// ProductionSummary - 产量汇总结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionSummary {
    /// 全期净产量（"Total" 列分母）
    pub net_production: f64,
    /// 分规格净产量（规格列分母）
    pub net_by_size: BTreeMap<String, f64>,
    /// 分规格入窑箱数
    pub kiln_entry_by_size: BTreeMap<String, f64>,
}

impl ProductionSummary {
    /// 指定规格的净产量（无记录为 0）
    pub fn net_for(&self, size: &str) -> f64 {
        self.net_by_size.get(size).copied().unwrap_or(0.0)
    }
}

// ==========================================
// ProductionAggregator - 产量汇总器
// ==========================================
pub struct ProductionAggregator {
    shrinkage_rate: f64,
}

impl ProductionAggregator {
    pub fn new(config: &CostingConfig) -> Self {
        Self {
            shrinkage_rate: config.shrinkage_rate,
        }
    }

    /// 全部行净产量之和（含空规格行）
    pub fn net_production(&self, rows: &[ProductionRow]) -> f64 {
        rows.iter()
            .map(|row| net_quantity(row, self.shrinkage_rate))
            .sum()
    }

    /// 分规格净产量（空规格行不归集）
    pub fn net_production_by_size(&self, rows: &[ProductionRow]) -> BTreeMap<String, f64> {
        let mut by_size = BTreeMap::new();
        for row in rows.iter().filter(|r| r.has_size()) {
            *by_size.entry(row.size_code().into_owned()).or_insert(0.0) +=
                net_quantity(row, self.shrinkage_rate);
        }
        by_size
    }

    /// 分规格入窑箱数
    pub fn production_by_size(&self, rows: &[ProductionRow]) -> BTreeMap<String, f64> {
        let mut by_size = BTreeMap::new();
        for row in rows.iter().filter(|r| r.has_size()) {
            *by_size.entry(row.size_code().into_owned()).or_insert(0.0) += row.kiln_entry_box;
        }
        by_size
    }

    /// 一次性汇总
    pub fn summarize(&self, rows: &[ProductionRow]) -> ProductionSummary {
        ProductionSummary {
            net_production: self.net_production(rows),
            net_by_size: self.net_production_by_size(rows),
            kiln_entry_by_size: self.production_by_size(rows),
        }
    }
}
