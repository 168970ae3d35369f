use anyhow::Result;
use chrono::{Local, NaiveDate};
use contracts::dashboards::d400_sales_performance::{
    SalesPerformanceRequest, SalesPerformanceResponse, UserPerformance,
};
use std::sync::Arc;

use super::engine::compute_performance;
use super::filter::{filter_orders, OrderFilter};
use crate::shared::app_state::{AppState, PerformanceKey};
use crate::shared::coercion::month_of;
use crate::shared::format::format_amount;

/// Get sales performance for the dashboard
///
/// Results are memoized per snapshot generation, month and filter, so repeated
/// requests over unchanged data skip the aggregation.
pub async fn get_sales_performance(
    state: &AppState,
    request: &SalesPerformanceRequest,
) -> Result<Arc<SalesPerformanceResponse>> {
    let today = Local::now().date_naive();
    get_sales_performance_on(state, request, today).await
}

pub async fn get_sales_performance_on(
    state: &AppState,
    request: &SalesPerformanceRequest,
    today: NaiveDate,
) -> Result<Arc<SalesPerformanceResponse>> {
    let snapshot = state.snapshot(request.refresh).await?;

    let key = PerformanceKey {
        generation: snapshot.generation,
        month: month_of(today),
        date_from: request.date_from.clone(),
        date_to: request.date_to.clone(),
        team: request.team.clone(),
    };

    if let Some(cached) = state.cached_performance(&key) {
        tracing::debug!("D400: serving memoized report for snapshot #{}", key.generation);
        return Ok(cached);
    }

    let filter = OrderFilter::from_request(request);
    let orders = filter_orders(&snapshot.orders, &filter);

    let report = Arc::new(compute_performance(
        &orders,
        &snapshot.users,
        &snapshot.targets,
        today,
    ));

    tracing::info!(
        "D400: {} of {} orders, revenue {}, {} users, {} teams",
        report.summary.total_orders,
        snapshot.orders.len(),
        format_amount(report.summary.total_revenue),
        report.by_user.len(),
        report.by_team.len()
    );

    state.store_performance(key, report.clone());
    Ok(report)
}

/// Leaderboard as CSV, highest revenue first
pub fn leaderboard_csv(report: &SalesPerformanceResponse) -> Result<Vec<u8>> {
    let mut rows: Vec<&UserPerformance> = report.by_user.iter().collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "rank",
        "user_name",
        "name",
        "team",
        "orders",
        "revenue",
        "profit",
        "target",
        "achievement_pct",
    ])?;

    for (index, user) in rows.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            user.user_name.clone(),
            user.display_name().to_string(),
            user.team.clone(),
            user.order_count.to_string(),
            format!("{:.2}", user.revenue),
            format!("{:.2}", user.profit),
            format!("{:.2}", user.target),
            format!("{:.1}", user.achievement),
        ])?;
    }

    Ok(writer.into_inner()?)
}
