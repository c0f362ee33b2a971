// ==========================================
// 瓷砖产线成本核算系统 - 费率快照解析器
// ==========================================
// 规则 ("as of" 语义):
// 1) 取 effective_date <= 目标日期 中最大的快照
// 2) 同一生效日期多条时,取输入序列中靠后（最近录入）的一条
// 3) 目标日期早于所有快照时,回退到最早的快照（追溯适用）
// 4) 仅当历史为空或目标日期缺失时返回 None
// ==========================================
// 日期口径: NaiveDate 比较,不涉及时区
// ==========================================

use crate::domain::settings::SettingsSnapshot;
use chrono::NaiveDate;

// ==========================================
// SettingsResolver - 费率快照解析器
// ==========================================
/// 预排序的快照索引,单次构造后可对多行重复解析
pub struct SettingsResolver<'a> {
    // 按 (effective_date, 原始序号) 升序
    sorted: Vec<(NaiveDate, &'a SettingsSnapshot)>,
}

impl<'a> SettingsResolver<'a> {
    /// 构造解析器
    ///
    /// 无生效日期的快照无法排序,不参与解析
    pub fn new(history: &'a [SettingsSnapshot]) -> Self {
        let mut sorted: Vec<(NaiveDate, &'a SettingsSnapshot)> = history
            .iter()
            .filter_map(|s| s.effective_date.map(|d| (d, s)))
            .collect();
        // 稳定排序: 同日期保持输入顺序
        sorted.sort_by_key(|(date, _)| *date);

        if sorted.len() < history.len() {
            tracing::debug!(
                skipped = history.len() - sorted.len(),
                "费率快照缺少生效日期，已忽略"
            );
        }

        Self { sorted }
    }

    /// 是否没有任何可用快照
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// 解析目标日期适用的快照
    pub fn resolve(&self, target: Option<NaiveDate>) -> Option<&'a SettingsSnapshot> {
        let target = target?;
        if self.sorted.is_empty() {
            return None;
        }

        let idx = self.sorted.partition_point(|(date, _)| *date <= target);
        if idx > 0 {
            return Some(self.sorted[idx - 1].1);
        }

        // 回退: 最早生效日期中最近录入的一条
        let earliest = self.sorted[0].0;
        let last_of_earliest = self.sorted.partition_point(|(date, _)| *date <= earliest);
        Some(self.sorted[last_of_earliest - 1].1)
    }
}

/// 单次解析（不复用索引）
pub fn resolve(
    history: &[SettingsSnapshot],
    target: Option<NaiveDate>,
) -> Option<&SettingsSnapshot> {
    SettingsResolver::new(history).resolve(target)
}
