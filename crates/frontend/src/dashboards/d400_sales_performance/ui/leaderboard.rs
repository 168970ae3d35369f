use contracts::dashboards::d400_sales_performance::{
    progress_width, TeamPerformance, UserPerformance,
};
use leptos::prelude::*;

use crate::shared::number_format::{format_money, format_percent};

/// Полоса выполнения плана; ширина ограничена 0..100%
#[component]
pub fn ProgressBar(achievement: f64) -> impl IntoView {
    let width = progress_width(achievement);
    let tone = if achievement >= 100.0 {
        "progress__fill--done"
    } else if achievement >= 50.0 {
        "progress__fill--half"
    } else {
        "progress__fill--low"
    };

    view! {
        <div class="progress" title=format_percent(achievement)>
            <div class=format!("progress__fill {}", tone) style=format!("width: {:.1}%", width)></div>
        </div>
    }
}

fn sorted_by_revenue(users: &[UserPerformance]) -> Vec<UserPerformance> {
    let mut rows = users.to_vec();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

/// Рейтинг продавцов по выручке
#[component]
pub fn Leaderboard(users: Vec<UserPerformance>) -> impl IntoView {
    let rows = sorted_by_revenue(&users);

    view! {
        <table class="d400-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Nhân viên"</th>
                    <th>"Nhóm"</th>
                    <th class="num">"Đơn"</th>
                    <th class="num">"Doanh thu"</th>
                    <th class="num">"Lợi nhuận"</th>
                    <th class="num">"Chỉ tiêu"</th>
                    <th>"Hoàn thành"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .enumerate()
                    .map(|(index, user)| {
                        let name = user.display_name().to_string();
                        view! {
                            <tr>
                                <td>{index + 1}</td>
                                <td class="d400-table__user">
                                    {user.profile_picture_url.clone().map(|url| view! { <img class="avatar avatar--small" src=url alt="" /> })}
                                    {name}
                                </td>
                                <td>{user.team.clone()}</td>
                                <td class="num">{user.order_count}</td>
                                <td class="num">{format_money(user.revenue)}</td>
                                <td class="num">{format_money(user.profit)}</td>
                                <td class="num">{format_money(user.target)}</td>
                                <td>
                                    <ProgressBar achievement=user.achievement />
                                    <span class="progress__label">{format_percent(user.achievement)}</span>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
pub fn TeamTable(teams: Vec<TeamPerformance>) -> impl IntoView {
    view! {
        <table class="d400-table">
            <thead>
                <tr>
                    <th>"Nhóm"</th>
                    <th class="num">"Thành viên"</th>
                    <th class="num">"Đơn"</th>
                    <th class="num">"Doanh thu"</th>
                    <th class="num">"Lợi nhuận"</th>
                    <th class="num">"Chỉ tiêu"</th>
                    <th>"Hoàn thành"</th>
                </tr>
            </thead>
            <tbody>
                {teams
                    .into_iter()
                    .map(|team| {
                        view! {
                            <tr>
                                <td>{team.team}</td>
                                <td class="num">{team.members}</td>
                                <td class="num">{team.order_count}</td>
                                <td class="num">{format_money(team.revenue)}</td>
                                <td class="num">{format_money(team.profit)}</td>
                                <td class="num">{format_money(team.target)}</td>
                                <td>
                                    <ProgressBar achievement=team.achievement />
                                    <span class="progress__label">{format_percent(team.achievement)}</span>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_revenue() {
        let users = vec![
            UserPerformance { user_name: "a".into(), revenue: 10.0, ..Default::default() },
            UserPerformance { user_name: "b".into(), revenue: 30.0, ..Default::default() },
            UserPerformance { user_name: "c".into(), revenue: 20.0, ..Default::default() },
        ];
        let names: Vec<String> = sorted_by_revenue(&users).into_iter().map(|u| u.user_name).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }
}
