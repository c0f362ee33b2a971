// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use tile_costing::{ProductionRow, SettingsSnapshot};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ==========================================
// ProductionRow 构建器
// ==========================================

pub struct RowBuilder {
    row: ProductionRow,
}

impl RowBuilder {
    pub fn new(date: NaiveDate, size: &str) -> Self {
        Self {
            row: ProductionRow {
                date: Some(date),
                size: size.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn owner(mut self, owner_id: &str) -> Self {
        self.row.owner_id = Some(owner_id.to_string());
        self
    }

    /// 压制箱数 + 生坯单箱重
    pub fn pressed(mut self, press_box: f64, green_box_weight: f64) -> Self {
        self.row.press_box = press_box;
        self.row.green_box_weight = green_box_weight;
        self
    }

    pub fn kiln_entry(mut self, boxes: f64) -> Self {
        self.row.kiln_entry_box = boxes;
        self
    }

    pub fn losses(mut self, packing: f64, fired: f64, sizing: f64) -> Self {
        self.row.packing_loss_box = packing;
        self.row.kiln_fired_loss_box = fired;
        self.row.sizing_loss_box = sizing;
        self
    }

    pub fn packed(mut self, premium: f64, standard: f64, eco: f64) -> Self {
        self.row.premium_box = premium;
        self.row.standard_box = standard;
        self.row.eco_box = eco;
        self.row.total_packing_box = premium + standard + eco;
        self
    }

    pub fn coal(mut self, coal_used_kg: f64, spray_dryer_production: f64) -> Self {
        self.row.coal_used_kg = coal_used_kg;
        self.row.spray_dryer_production = spray_dryer_production;
        self
    }

    pub fn gas(mut self, quantity: f64) -> Self {
        self.row.daily_gas_consumption = quantity;
        self
    }

    pub fn electricity(mut self, units: f64) -> Self {
        self.row.daily_electricity_units_use = units;
        self
    }

    pub fn colorant_blue(mut self, usage: f64) -> Self {
        self.row.colorant.blue = usage;
        self
    }

    pub fn build(self) -> ProductionRow {
        self.row
    }
}

// ==========================================
// SettingsSnapshot 构建器
// ==========================================

pub struct SnapshotBuilder {
    snapshot: SettingsSnapshot,
}

impl SnapshotBuilder {
    pub fn new(effective_date: NaiveDate) -> Self {
        Self {
            snapshot: SettingsSnapshot {
                effective_date: Some(effective_date),
                ..Default::default()
            },
        }
    }

    pub fn electricity(mut self, rate: f64) -> Self {
        self.snapshot.electricity_rate_per_unit = rate;
        self
    }

    pub fn gas(mut self, rate: f64) -> Self {
        self.snapshot.gas_rate_per_unit = rate;
        self
    }

    pub fn packing(mut self, premium: f64, standard: f64, corner_stapling: f64) -> Self {
        self.snapshot.premium_box_rate = premium;
        self.snapshot.standard_box_rate = standard;
        self.snapshot.corner_stapling_rate = corner_stapling;
        self
    }

    pub fn monthly_salary(mut self, amount: f64) -> Self {
        self.snapshot.monthly_salary = amount;
        self
    }

    pub fn build(self) -> SettingsSnapshot {
        self.snapshot
    }
}

/// 一条字段齐全的典型生产行
pub fn typical_row(date: NaiveDate, size: &str) -> ProductionRow {
    RowBuilder::new(date, size)
        .pressed(1000.0, 12.0)
        .kiln_entry(980.0)
        .losses(10.0, 15.0, 5.0)
        .packed(800.0, 120.0, 30.0)
        .coal(500.0, 10_000.0)
        .gas(300.0)
        .electricity(2_000.0)
        .colorant_blue(1.5)
        .build()
}

/// 一个字段齐全的典型费率快照
pub fn typical_snapshot(effective_date: NaiveDate) -> SettingsSnapshot {
    SnapshotBuilder::new(effective_date)
        .electricity(0.8)
        .gas(3.2)
        .packing(2.5, 2.0, 0.3)
        .monthly_salary(90_000.0)
        .build()
}
