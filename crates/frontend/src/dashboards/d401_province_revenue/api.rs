use contracts::dashboards::d400_sales_performance::SalesPerformanceRequest;
use contracts::dashboards::d401_province_revenue::ProvinceRevenueResponse;

use crate::layout::global_context::filter_query;
use crate::shared::api_utils::get_json;

/// Выручка по провинциям с тем же фильтром, что и у D400
pub async fn get_province_revenue(
    filter: &SalesPerformanceRequest,
    access_token: &str,
) -> Result<ProvinceRevenueResponse, String> {
    let url = format!("/api/d401/province_revenue{}", filter_query(filter));
    get_json(&url, access_token).await
}
