// ==========================================
// 瓷砖产线成本核算系统 - 生产记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::production::{ColorantUsage, ProductionRow};
use crate::repository::data_source::DateRangeFilter;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_value::{read_date, read_f64, read_text};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_COLUMNS: &str = r#"
    entry_date, size, owner_id,
    press_box, green_box_weight,
    kiln_entry_box, packing_loss_box, kiln_fired_loss_box, sizing_loss_box,
    premium_box, standard_box, eco_box, total_packing_box,
    spray_dryer_production, coal_used_kg,
    daily_gas_consumption, daily_electricity_units_use,
    colorant_blue, colorant_black, colorant_brown, colorant_yellow, colorant_pink
"#;

// ==========================================
// ProductionRepository - 生产记录仓储
// ==========================================
/// 职责: 管理 production_entry 表的读写
pub struct ProductionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionRepository {
    /// 创建新的 ProductionRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入一条生产记录
    ///
    /// # 返回
    /// 新记录的 entry_id
    pub fn insert(&self, row: &ProductionRow) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        insert_row(&conn, row)
    }

    /// 批量写入（单事务,任一失败整体回滚）
    pub fn insert_batch(&self, rows: &[ProductionRow]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        for row in rows {
            insert_row(&tx, row)?;
        }
        tx.commit()?;
        Ok(rows.len())
    }

    /// 按范围查询生产记录（按日期、录入顺序升序）
    ///
    /// entry_date 存量数据格式不一（2024/01/10、20240110、带时间）,
    /// SQL 只按归属过滤,日期边界在容错解析后判断
    pub fn find_by_filter(&self, filter: &DateRangeFilter) -> RepositoryResult<Vec<ProductionRow>> {
        let mut args: Vec<Value> = Vec::new();
        let where_clause = match &filter.owner_id {
            Some(owner) => {
                args.push(Value::Text(owner.clone()));
                "WHERE owner_id = ?"
            }
            None => "",
        };
        let sql = format!(
            "SELECT {} FROM production_entry {} ORDER BY entry_id",
            SELECT_COLUMNS, where_clause
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt
            .query_map(params_from_iter(args), map_production_row)?
            .filter(|r| r.as_ref().map_or(true, |row| filter.matches(row)))
            .collect::<Result<Vec<_>, _>>()?;

        // 稳定排序: 同日保持录入顺序
        rows.sort_by_key(|row| row.date);
        Ok(rows)
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM production_entry", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn insert_row(conn: &Connection, row: &ProductionRow) -> RepositoryResult<i64> {
    let date = row.date.ok_or_else(|| RepositoryError::FieldValueError {
        field: "entry_date".to_string(),
        message: "生产记录缺少日期".to_string(),
    })?;

    conn.execute(
        r#"
        INSERT INTO production_entry (
            entry_date, size, owner_id,
            press_box, green_box_weight,
            kiln_entry_box, packing_loss_box, kiln_fired_loss_box, sizing_loss_box,
            premium_box, standard_box, eco_box, total_packing_box,
            spray_dryer_production, coal_used_kg,
            daily_gas_consumption, daily_electricity_units_use,
            colorant_blue, colorant_black, colorant_brown, colorant_yellow, colorant_pink
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                  ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
        "#,
        params![
            date.to_string(),
            row.size,
            row.owner_id,
            row.press_box,
            row.green_box_weight,
            row.kiln_entry_box,
            row.packing_loss_box,
            row.kiln_fired_loss_box,
            row.sizing_loss_box,
            row.premium_box,
            row.standard_box,
            row.eco_box,
            row.total_packing_box,
            row.spray_dryer_production,
            row.coal_used_kg,
            row.daily_gas_consumption,
            row.daily_electricity_units_use,
            row.colorant.blue,
            row.colorant.black,
            row.colorant.brown,
            row.colorant.yellow,
            row.colorant.pink,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn map_production_row(row: &Row<'_>) -> rusqlite::Result<ProductionRow> {
    Ok(ProductionRow {
        date: read_date(row, 0)?,
        size: read_text(row, 1)?.unwrap_or_default(),
        owner_id: read_text(row, 2)?,
        press_box: read_f64(row, 3)?,
        green_box_weight: read_f64(row, 4)?,
        kiln_entry_box: read_f64(row, 5)?,
        packing_loss_box: read_f64(row, 6)?,
        kiln_fired_loss_box: read_f64(row, 7)?,
        sizing_loss_box: read_f64(row, 8)?,
        premium_box: read_f64(row, 9)?,
        standard_box: read_f64(row, 10)?,
        eco_box: read_f64(row, 11)?,
        total_packing_box: read_f64(row, 12)?,
        spray_dryer_production: read_f64(row, 13)?,
        coal_used_kg: read_f64(row, 14)?,
        daily_gas_consumption: read_f64(row, 15)?,
        daily_electricity_units_use: read_f64(row, 16)?,
        colorant: ColorantUsage {
            blue: read_f64(row, 17)?,
            black: read_f64(row, 18)?,
            brown: read_f64(row, 19)?,
            yellow: read_f64(row, 20)?,
            pink: read_f64(row, 21)?,
        },
    })
}
