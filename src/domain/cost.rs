// ==========================================
// 瓷砖产线成本核算系统 - 成本结果模型
// ==========================================
// CategoryResult: 单个类别的合计 + 分规格明细
// CostMatrix: 成本行 × 规格列（含 "Total" 汇总列）
// HistoryPoint: 某一天的成本矩阵
// ==========================================
// 不变式: total == sum(size_wise)（累加时同步写入两处）
// ==========================================

use crate::common::format2;
use crate::domain::types::CostHead;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// 汇总列名
pub const TOTAL_COLUMN: &str = "Total";

// ==========================================
// CategoryResult - 类别归集结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryResult {
    pub total: f64,
    pub size_wise: BTreeMap<String, f64>,
}

impl CategoryResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个值到合计与对应规格
    ///
    /// 非有限值直接丢弃,保证两处同步
    pub fn add(&mut self, size: &str, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.total += value;
        *self.size_wise.entry(size.to_string()).or_insert(0.0) += value;
    }

    /// 指定规格的值（无记录为 0）
    pub fn size_value(&self, size: &str) -> f64 {
        self.size_wise.get(size).copied().unwrap_or(0.0)
    }

    /// 分规格明细之和
    pub fn size_wise_sum(&self) -> f64 {
        self.size_wise.values().sum()
    }
}

// ==========================================
// GasResult - 天然气归集结果（附热效率）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GasResult {
    #[serde(flatten)]
    pub cost: CategoryResult,
    /// 平均单耗 kcal/kg（按合格行简单平均,不按产量加权）
    pub avg_kcal_per_kg: f64,
    /// 参与平均的行数
    pub qualifying_rows: usize,
}

// ==========================================
// GlazeResult - 釉料归集结果（附损耗）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlazeResult {
    /// 釉料消耗（计入成本）
    #[serde(flatten)]
    pub consumption: CategoryResult,
    /// 釉料损耗（仅跟踪,不计入成本）
    pub loss: CategoryResult,
}

// ==========================================
// CostMatrix - 成本矩阵
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    columns: Vec<String>,
    cells: BTreeMap<CostHead, BTreeMap<String, f64>>,
}

impl CostMatrix {
    /// 构造全零矩阵
    ///
    /// 规格列按字典序排列,"Total" 列固定在最后
    pub fn zeroed<I, S>(sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = sizes
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty() && s != TOTAL_COLUMN)
            .collect();
        columns.sort();
        columns.dedup();
        columns.push(TOTAL_COLUMN.to_string());

        let mut cells = BTreeMap::new();
        for head in CostHead::ALL {
            let row: BTreeMap<String, f64> = columns.iter().map(|c| (c.clone(), 0.0)).collect();
            cells.insert(head, row);
        }

        Self { columns, cells }
    }

    /// 只有 "Total" 列的全零矩阵
    pub fn empty() -> Self {
        Self::zeroed(Vec::<String>::new())
    }

    /// 列名（规格 + "Total"）
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 规格列（不含 "Total"）
    pub fn size_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| *c != TOTAL_COLUMN)
    }

    /// 读取单元格（全精度）
    pub fn get(&self, head: CostHead, column: &str) -> f64 {
        self.cells
            .get(&head)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0.0)
    }

    /// 写入单元格（列不存在时忽略）
    pub fn set(&mut self, head: CostHead, column: &str, value: f64) {
        if let Some(cell) = self.cells.get_mut(&head).and_then(|row| row.get_mut(column)) {
            *cell = if value.is_finite() { value } else { 0.0 };
        }
    }

    /// 整行（全精度）
    pub fn row(&self, head: CostHead) -> BTreeMap<String, f64> {
        self.cells.get(&head).cloned().unwrap_or_default()
    }

    /// 是否全部为零
    pub fn is_zero(&self) -> bool {
        self.cells
            .values()
            .all(|row| row.values().all(|v| *v == 0.0))
    }

    /// 展示口径: { 成本行: { 列: "0.00" } }
    pub fn to_display_map(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.cells
            .iter()
            .map(|(head, row)| {
                let formatted = row
                    .iter()
                    .map(|(column, value)| (column.clone(), format2(*value)))
                    .collect();
                (head.as_str().to_string(), formatted)
            })
            .collect()
    }
}

impl Serialize for CostMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_display_map().serialize(serializer)
    }
}

// ==========================================
// HistoryPoint - 历史趋势点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub matrix: CostMatrix,
}

impl HistoryPoint {
    /// 当日各规格单位成本合计行
    pub fn total_row(&self) -> BTreeMap<String, f64> {
        self.matrix.row(CostHead::Total)
    }
}
