// ==========================================
// 瓷砖产线成本核算系统 - 归属档案
// ==========================================
// 登录用户 → 归属标识（owner_id）的映射
// 生产行通过 owner_id 过滤,引擎本身不使用该字段
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub user_id: String,
    pub owner_id: String,
    #[serde(default)]
    pub plant_name: Option<String>,
}

impl OwnerProfile {
    pub fn new(user_id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            owner_id: owner_id.into(),
            plant_name: None,
        }
    }

    pub fn with_plant_name(mut self, plant_name: impl Into<String>) -> Self {
        self.plant_name = Some(plant_name.into());
        self
    }
}
