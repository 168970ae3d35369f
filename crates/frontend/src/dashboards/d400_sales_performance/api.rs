use contracts::dashboards::d400_sales_performance::{
    SalesPerformanceRequest, SalesPerformanceResponse,
};

use crate::layout::global_context::filter_query;
use crate::shared::api_utils::{get_json, get_text};

const API_BASE: &str = "/api/d400/sales_performance";

/// Получить статистику продаж с учётом фильтра
pub async fn get_sales_performance(
    filter: &SalesPerformanceRequest,
    access_token: &str,
) -> Result<SalesPerformanceResponse, String> {
    let url = format!("{}{}", API_BASE, filter_query(filter));
    get_json(&url, access_token).await
}

/// Рейтинг продавцов в CSV
pub async fn export_leaderboard(
    filter: &SalesPerformanceRequest,
    access_token: &str,
) -> Result<String, String> {
    let filter = SalesPerformanceRequest {
        refresh: false,
        ..filter.clone()
    };
    let url = format!("{}/export{}", API_BASE, filter_query(&filter));
    get_text(&url, access_token).await
}
