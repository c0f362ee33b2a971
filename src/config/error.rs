// ==========================================
// 瓷砖产线成本核算系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 (key: {key}): {message}")]
    ReadError { key: String, message: String },

    #[error("配置写入失败 (key: {key}): {message}")]
    WriteError { key: String, message: String },

    #[error("配置序列化失败: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库错误: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
