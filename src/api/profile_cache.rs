// ==========================================
// 瓷砖产线成本核算系统 - 归属档案缓存
// ==========================================
// 显式缓存: 按登录用户缓存归属档案
// 用户退出时必须 invalidate,避免下一个用户读到上一个用户的归属
// ==========================================

use crate::domain::owner::OwnerProfile;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
pub struct OwnerProfileCache {
    entries: RwLock<HashMap<String, OwnerProfile>>,
}

impl OwnerProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<OwnerProfile> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    pub fn insert(&self, profile: OwnerProfile) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.user_id.clone(), profile);
    }

    /// 用户退出: 移除该用户的缓存
    ///
    /// # 返回
    /// 是否存在被移除的条目
    pub fn invalidate(&self, user_id: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_id)
            .is_some()
    }

    /// 清空全部缓存
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_and_clear() {
        let cache = OwnerProfileCache::new();
        cache.insert(OwnerProfile::new("u1", "plant-a"));
        cache.insert(OwnerProfile::new("u2", "plant-b"));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate("u1"));
        assert!(!cache.invalidate("u1"));
        assert!(cache.get("u1").is_none());
        assert_eq!(cache.get("u2").map(|p| p.owner_id), Some("plant-b".to_string()));

        cache.clear();
        assert!(cache.is_empty());
    }
}
