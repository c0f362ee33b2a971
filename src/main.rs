// ==========================================
// 瓷砖产线成本核算系统 - 命令行入口
// ==========================================
// 用法:
//   tile-costing [db_path] matrix <start> <end> [owner]
//   tile-costing [db_path] history <range> [end] [owner]
// 输出: { 成本行: { 规格: "0.00" } } JSON（stdout）
// ==========================================

use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDate};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tile_costing::common::parse_lenient_date;
use tile_costing::db::{default_db_path, init_schema, open_sqlite_connection};
use tile_costing::{
    logging, ConfigManager, CostingApi, CostingConfigReader, DateRangeFilter, OwnerProfileCache,
    SqliteCostDataSource,
};

const USAGE: &str = "用法:
  tile-costing [db_path] matrix <start> <end> [owner]
  tile-costing [db_path] history <today|week|month|all> [end] [owner]";

fn parse_date_arg(raw: &str, name: &str) -> anyhow::Result<NaiveDate> {
    parse_lenient_date(raw).ok_or_else(|| anyhow!("{} 不是有效日期: {}", name, raw))
}

fn optional_owner(arg: Option<&String>) -> Option<String> {
    arg.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let db_path = match args.first().map(String::as_str) {
        Some("matrix") | Some("history") => default_db_path(),
        Some(_) => args.remove(0),
        None => bail!("{}", USAGE),
    };

    tracing::info!("==================================================");
    tracing::info!("{} v{}", tile_costing::APP_NAME, tile_costing::VERSION);
    tracing::info!("使用数据库: {}", db_path);
    tracing::info!("==================================================");

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    init_schema(&conn).context("初始化 schema 失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let config_manager = ConfigManager::from_connection(conn.clone());
    let config = config_manager.load_costing_config().await?;
    let source = Arc::new(SqliteCostDataSource::from_connection(conn));
    let api = CostingApi::new(source, config, Arc::new(OwnerProfileCache::new()));

    let output = match args.first().map(String::as_str) {
        Some("matrix") => {
            let start = parse_date_arg(args.get(1).ok_or_else(|| anyhow!("{}", USAGE))?, "start")?;
            let end = parse_date_arg(args.get(2).ok_or_else(|| anyhow!("{}", USAGE))?, "end")?;
            let filter = DateRangeFilter::between(start, end).with_owner(optional_owner(args.get(3)));

            let matrix = api.compute_cost_matrix(&filter).await?;
            serde_json::to_value(&matrix)?
        }
        Some("history") => {
            let range = args.get(1).map(String::as_str).unwrap_or("today");
            let end = match args.get(2) {
                Some(raw) => parse_date_arg(raw, "end")?,
                None => Local::now().date_naive(),
            };

            let points = api
                .compute_history(range, end, optional_owner(args.get(3)))
                .await?;
            let entries: Vec<_> = points
                .iter()
                .map(|p| json!({ "date": p.date.to_string(), "matrix": p.matrix }))
                .collect();
            serde_json::Value::Array(entries)
        }
        _ => bail!("{}", USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
