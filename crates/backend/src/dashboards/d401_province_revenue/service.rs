use anyhow::{Context, Result};
use contracts::dashboards::d400_sales_performance::SalesPerformanceRequest;
use contracts::dashboards::d401_province_revenue::ProvinceRevenueResponse;
use std::path::Path;

use super::matcher::compute_province_revenue;
use super::region_names::feature_names;
use crate::dashboards::d400_sales_performance::filter::{filter_orders, OrderFilter};
use crate::shared::app_state::AppState;
use crate::shared::config::resolve_path;

/// Read the boundary file and pull its feature names
pub fn load_feature_names(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read boundary file {}", path.display()))?;
    let geojson: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Boundary file {} is not valid JSON", path.display()))?;

    let names = feature_names(&geojson);
    tracing::info!("Loaded {} province features from {}", names.len(), path.display());
    Ok(names)
}

/// Revenue per province for the map, using the same filter as the D400 dashboard
pub async fn get_province_revenue(
    state: &AppState,
    request: &SalesPerformanceRequest,
) -> Result<ProvinceRevenueResponse> {
    let boundaries = state
        .config
        .geo
        .boundaries_path
        .as_deref()
        .context("geo.boundaries_path is not configured")?;

    let names = state.feature_names(|| load_feature_names(&resolve_path(boundaries)))?;
    let snapshot = state.snapshot(request.refresh).await?;

    let orders = filter_orders(&snapshot.orders, &OrderFilter::from_request(request));
    Ok(compute_province_revenue(&orders, &names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_state::test_support::test_config;
    use crate::shared::data::snapshot::{ORDERS_SHEET, USERS_SHEET};
    use crate::shared::remote::memory::InMemorySheets;
    use serde_json::json;
    use std::sync::Arc;

    fn write_boundaries(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.geojson", name, uuid::Uuid::new_v4()));
        let geojson = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Hà Nội"}, "geometry": null},
                {"type": "Feature", "properties": {"name": "Cần Thơ"}, "geometry": null}
            ]
        });
        std::fs::write(&path, geojson.to_string()).unwrap();
        path
    }

    fn sheets() -> InMemorySheets {
        InMemorySheets::new()
            .with_sheet(
                ORDERS_SHEET,
                json!([
                    {"id": "1", "userName": "a", "team": "X", "grandTotal": 100, "province": "Tỉnh Cần Thơ"},
                    {"id": "2", "userName": "b", "team": "Y", "grandTotal": 40, "province": "Hà Nội"}
                ]),
            )
            .with_sheet(USERS_SHEET, json!([]))
    }

    #[tokio::test]
    async fn test_province_revenue_with_team_filter() {
        let path = write_boundaries("provinces");
        let mut config = test_config();
        config.geo.boundaries_path = Some(path.to_string_lossy().into_owned());
        let state = AppState::new(config, Arc::new(sheets()));

        let all = get_province_revenue(&state, &SalesPerformanceRequest::default())
            .await
            .unwrap();
        assert_eq!(all.provinces[0].revenue, 40.0);
        assert_eq!(all.provinces[1].revenue, 100.0);
        assert_eq!(all.max_revenue, 100.0);

        let team_x = SalesPerformanceRequest {
            team: Some("X".into()),
            ..Default::default()
        };
        let filtered = get_province_revenue(&state, &team_x).await.unwrap();
        assert_eq!(filtered.provinces[0].revenue, 0.0);
        assert_eq!(filtered.max_revenue, 100.0);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_boundary_file_fails() {
        let mut config = test_config();
        config.geo.boundaries_path = Some("/nonexistent/provinces.geojson".into());
        let state = AppState::new(config, Arc::new(sheets()));

        let err = get_province_revenue(&state, &SalesPerformanceRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boundary file"));
    }
}
