// ==========================================
// 成本核算 API 集成测试
// ==========================================
// 测试范围: 取数适配、配置读取、归属档案缓存
// ==========================================

mod helpers;

use helpers::mock_config::MockConfig;
use helpers::test_data_builder::*;
use std::sync::Arc;
use tile_costing::{
    ApiError, CostHead, CostingApi, CostingConfig, DateRangeFilter, InMemoryCostDataSource,
    OwnerProfile, OwnerProfileCache,
};

fn seeded_source() -> Arc<InMemoryCostDataSource> {
    let source = InMemoryCostDataSource::with_data(
        vec![
            typical_row(d(2024, 1, 10), "400x400"),
            RowBuilder::new(d(2024, 1, 10), "600x600")
                .owner("plant-b")
                .kiln_entry(500.0)
                .electricity(1000.0)
                .build(),
            typical_row(d(2024, 2, 10), "400x400"),
        ],
        vec![typical_snapshot(d(2024, 1, 1))],
    );
    Arc::new(source)
}

#[tokio::test]
async fn test_matrix_matches_engine_on_filtered_rows() {
    let source = seeded_source();
    let api = CostingApi::new(
        source.clone(),
        CostingConfig::default(),
        Arc::new(OwnerProfileCache::new()),
    );

    let january = DateRangeFilter::between(d(2024, 1, 1), d(2024, 1, 31));
    let matrix = api.compute_cost_matrix(&january).await.unwrap();

    let rows = vec![
        typical_row(d(2024, 1, 10), "400x400"),
        RowBuilder::new(d(2024, 1, 10), "600x600")
            .owner("plant-b")
            .kiln_entry(500.0)
            .electricity(1000.0)
            .build(),
    ];
    let expected = api
        .engine()
        .compute_cost_matrix(&rows, &[typical_snapshot(d(2024, 1, 1))]);
    assert_eq!(matrix, expected);

    let owned = january.with_owner(Some("plant-b".to_string()));
    let matrix = api.compute_cost_matrix(&owned).await.unwrap();
    assert_eq!(matrix.get(CostHead::Material, "400x400"), 0.0);
    assert!(matrix.get(CostHead::Electricity, "600x600") > 0.0);
}

#[tokio::test]
async fn test_history_through_api() {
    let api = CostingApi::new(
        seeded_source(),
        CostingConfig::default(),
        Arc::new(OwnerProfileCache::new()),
    );

    let points = api
        .compute_history("week", d(2024, 1, 12), None)
        .await
        .unwrap();
    assert_eq!(points.len(), 7);
    let non_zero: Vec<_> = points.iter().filter(|p| !p.matrix.is_zero()).collect();
    assert_eq!(non_zero.len(), 1);
    assert_eq!(non_zero[0].date, d(2024, 1, 10));

    // 归属过滤后该日只剩 plant-b 的行
    let points = api
        .compute_history("today", d(2024, 1, 10), Some("plant-b".to_string()))
        .await
        .unwrap();
    assert_eq!(points[0].matrix.get(CostHead::Material, "Total"), 0.0);
}

#[tokio::test]
async fn test_config_reader_injection() {
    let mut mock = MockConfig::new();
    mock.config.area_equivalence = 4.3;
    let api = CostingApi::with_config_reader(
        seeded_source(),
        &mock,
        Arc::new(OwnerProfileCache::new()),
    )
    .await
    .unwrap();
    assert_eq!(api.engine().config().area_equivalence, 4.3);

    let failing = CostingApi::with_config_reader(
        seeded_source(),
        &MockConfig::failing(),
        Arc::new(OwnerProfileCache::new()),
    )
    .await;
    assert!(matches!(failing, Err(ApiError::ConfigError(_))));
}

#[tokio::test]
async fn test_owner_profile_cache_lifecycle() {
    let source = seeded_source();
    source
        .put_profile(OwnerProfile::new("alice", "plant-a").with_plant_name("Line 1"))
        .unwrap();
    let cache = Arc::new(OwnerProfileCache::new());
    let api = CostingApi::new(source.clone(), CostingConfig::default(), cache.clone());

    let profile = api.resolve_owner("alice").await.unwrap();
    assert_eq!(profile.owner_id, "plant-a");
    assert_eq!(cache.len(), 1);

    // 数据源变化后,缓存仍返回旧值,直到退出登录
    source
        .put_profile(OwnerProfile::new("alice", "plant-c"))
        .unwrap();
    assert_eq!(api.resolve_owner("alice").await.unwrap().owner_id, "plant-a");

    api.sign_out("alice");
    assert!(cache.is_empty());
    assert_eq!(api.resolve_owner("alice").await.unwrap().owner_id, "plant-c");
}
