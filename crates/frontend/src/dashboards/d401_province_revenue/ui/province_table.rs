use contracts::dashboards::d401_province_revenue::{ProvinceRevenue, ProvinceRevenueResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d401_province_revenue::api;
use crate::layout::global_context::use_app_context;
use crate::shared::number_format::format_money;
use crate::system::auth::context::use_auth;

/// Color intensity 0..1 of a province on the revenue scale
pub fn intensity(revenue: f64, max_revenue: f64) -> f64 {
    if max_revenue > 0.0 && revenue.is_finite() {
        (revenue / max_revenue).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn ranked(provinces: &[ProvinceRevenue]) -> Vec<ProvinceRevenue> {
    let mut rows = provinces.to_vec();
    rows.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.feature_name.cmp(&b.feature_name))
    });
    rows
}

/// Таблица выручки по провинциям (данные для карты)
#[component]
pub fn ProvinceRevenueView() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, _) = use_auth();

    let (data, set_data) = signal(None::<ProvinceRevenueResponse>);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let filter = ctx.filter.get();
        let token = auth_state.get_untracked().token();
        set_error.set(None);

        spawn_local(async move {
            match api::get_province_revenue(&filter, &token).await {
                Ok(response) => set_data.set(Some(response)),
                Err(e) => {
                    log::error!("Failed to load D401 province revenue: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    });

    view! {
        <div id="d401_province_revenue--view" class="d401-view">
            {move || error.get().map(|err| view! { <div class="d400-error">{err}</div> })}

            {move || {
                data.get().map(|data| {
                    let max = data.max_revenue;
                    let unmatched = data.unmatched.join(", ");
                    view! {
                        <table class="d400-table">
                            <thead>
                                <tr>
                                    <th>"Tỉnh / thành"</th>
                                    <th class="num">"Đơn"</th>
                                    <th class="num">"Doanh thu"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {ranked(&data.provinces)
                                    .into_iter()
                                    .map(|row| {
                                        let alpha = intensity(row.revenue, max);
                                        view! {
                                            <tr title=row.source_names.join(", ")>
                                                <td>{row.feature_name}</td>
                                                <td class="num">{row.orders}</td>
                                                <td class="num">{format_money(row.revenue)}</td>
                                                <td>
                                                    <span
                                                        class="d401-swatch"
                                                        style=format!("background: rgba(220, 38, 38, {:.2})", alpha)
                                                    ></span>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                        {(!unmatched.is_empty()).then(|| view! {
                            <p class="d401-unmatched">"Không khớp bản đồ: " {unmatched}</p>
                        })}
                    }
                })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity() {
        assert_eq!(intensity(50.0, 200.0), 0.25);
        assert_eq!(intensity(10.0, 0.0), 0.0);
        assert_eq!(intensity(300.0, 200.0), 1.0);
    }

    #[test]
    fn test_ranked_by_revenue_then_name() {
        let rows = vec![
            ProvinceRevenue { feature_name: "B".into(), revenue: 0.0, ..Default::default() },
            ProvinceRevenue { feature_name: "A".into(), revenue: 0.0, ..Default::default() },
            ProvinceRevenue { feature_name: "C".into(), revenue: 5.0, ..Default::default() },
        ];
        let names: Vec<String> = ranked(&rows).into_iter().map(|r| r.feature_name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
