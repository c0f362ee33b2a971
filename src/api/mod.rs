// ==========================================
// 瓷砖产线成本核算系统 - API 层
// ==========================================
// 职责: 取数 + 调用引擎 + 输入校验,对外提供核算入口
// 红线: 不含公式计算,不拼 SQL
// ==========================================

pub mod costing_api;
pub mod error;
pub mod profile_cache;

pub use costing_api::{CostingApi, SourceDayProvider};
pub use error::{ApiError, ApiResult};
pub use profile_cache::OwnerProfileCache;
