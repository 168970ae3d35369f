use contracts::dashboards::d400_sales_performance::{
    progress_width, SalesPerformanceResponse, TrendPoint,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::leaderboard::{Leaderboard, ProgressBar, TeamTable};
use crate::dashboards::d400_sales_performance::api;
use crate::layout::global_context::use_app_context;
use crate::shared::export::download_csv;
use crate::shared::number_format::{format_amount, format_money, format_percent};
use crate::system::auth::context::use_auth;

/// Bar widths of the monthly trend, relative to the best month
fn trend_widths(points: &[TrendPoint]) -> Vec<f64> {
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    points
        .iter()
        .map(|p| if max > 0.0 { progress_width(p.value / max * 100.0) } else { 0.0 })
        .collect()
}

#[component]
fn SummaryCards(data: SalesPerformanceResponse) -> impl IntoView {
    let summary = data.summary;
    view! {
        <div class="d400-cards">
            <div class="d400-card">
                <span class="d400-card__label">"Doanh thu"</span>
                <strong>{format_money(summary.total_revenue)}</strong>
            </div>
            <div class="d400-card">
                <span class="d400-card__label">"Lợi nhuận"</span>
                <strong>{format_money(summary.total_profit)}</strong>
            </div>
            <div class="d400-card">
                <span class="d400-card__label">"Số đơn"</span>
                <strong>{format_amount(summary.total_orders as f64)}</strong>
            </div>
            <div class="d400-card">
                <span class="d400-card__label">{format!("Chỉ tiêu {}", data.target_month)}</span>
                <strong>{format_money(summary.overall_target)}</strong>
                <ProgressBar achievement=summary.overall_achievement />
                <span class="progress__label">{format_percent(summary.overall_achievement)}</span>
            </div>
        </div>
    }
}

#[component]
fn MonthlyTrend(points: Vec<TrendPoint>) -> impl IntoView {
    let widths = trend_widths(&points);
    view! {
        <div class="d400-trend">
            {points
                .into_iter()
                .zip(widths)
                .map(|(point, width)| {
                    view! {
                        <div class="d400-trend__row">
                            <span class="d400-trend__label">{point.label}</span>
                            <div class="d400-trend__bar" style=format!("width: {:.1}%", width)></div>
                            <span class="d400-trend__value">
                                {format!("{} · {} đơn", format_money(point.value), point.orders)}
                            </span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Sales performance dashboard
#[component]
pub fn SalesPerformanceDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, _) = use_auth();

    let (data, set_data) = signal(None::<SalesPerformanceResponse>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Load data when filter changes
    Effect::new(move |_| {
        let filter = ctx.filter.get();
        let token = auth_state.get_untracked().token();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::get_sales_performance(&filter, &token).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("Failed to load D400 dashboard: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let on_export = move |_| {
        let filter = ctx.filter.get_untracked();
        let token = auth_state.get_untracked().token();
        spawn_local(async move {
            let result = match api::export_leaderboard(&filter, &token).await {
                Ok(csv) => download_csv(&csv, "sales_leaderboard.csv"),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                set_error.set(Some(e));
            }
        });
    };

    let teams = move || {
        data.get()
            .map(|d| d.by_team.into_iter().map(|t| t.team).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    view! {
        <div id="d400_sales_performance--dashboard" class="d400-dashboard">
            <div class="d400-filters">
                <label>
                    "Từ ngày"
                    <input
                        type="date"
                        prop:value=move || ctx.filter.get().date_from.unwrap_or_default()
                        on:change=move |ev| ctx.set_date_from(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Đến ngày"
                    <input
                        type="date"
                        prop:value=move || ctx.filter.get().date_to.unwrap_or_default()
                        on:change=move |ev| ctx.set_date_to(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Nhóm"
                    <select
                        prop:value=move || ctx.filter.get().team.unwrap_or_default()
                        on:change=move |ev| ctx.set_team(event_target_value(&ev))
                    >
                        <option value="">"Tất cả"</option>
                        {move || {
                            teams()
                                .into_iter()
                                .map(|team| view! { <option value=team.clone()>{team.clone()}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <button class="btn" on:click=move |_| ctx.request_refresh() disabled=move || loading.get()>
                    "Làm mới"
                </button>
                <button class="btn" on:click=move |_| ctx.clear_filter()>"Xóa lọc"</button>
                <button class="btn" on:click=on_export>"Xuất CSV"</button>
            </div>

            <Show when=move || loading.get()>
                <div class="d400-loading">"Đang tải dữ liệu..."</div>
            </Show>

            {move || error.get().map(|err| view! {
                <div class="d400-error">
                    <strong>"⚠ Lỗi: "</strong>
                    {err}
                </div>
            })}

            {move || {
                data.get().map(|data| {
                    if !data.has_data {
                        return view! { <div class="empty-state">"Chưa có dữ liệu nhân viên."</div> }.into_any();
                    }
                    view! {
                        <SummaryCards data=data.clone() />
                        <h3>"Xếp hạng nhân viên"</h3>
                        <Leaderboard users=data.by_user.clone() />
                        <h3>"Theo nhóm"</h3>
                        <TeamTable teams=data.by_team.clone() />
                        <h3>"Doanh thu theo tháng"</h3>
                        <MonthlyTrend points=data.monthly_trend.clone() />
                    }
                    .into_any()
                })
            }}
        </div>
    }
}
