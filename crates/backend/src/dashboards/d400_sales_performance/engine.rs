use chrono::NaiveDate;
use contracts::dashboards::d400_sales_performance::{
    PerformanceSummary, SalesPerformanceResponse, TeamPerformance, TrendPoint, UserPerformance,
};
use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::a002_sales_user::aggregate::SalesUser;
use contracts::domain::a003_monthly_target::aggregate::MonthlyTarget;
use std::collections::{BTreeMap, HashMap};

use super::profit::order_profit;
use crate::shared::coercion::{month_key, month_of};

/// Running revenue/profit/count totals
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    revenue: f64,
    profit: f64,
    orders: usize,
}

impl Totals {
    fn add(&mut self, order: &Order) {
        self.revenue += order.revenue();
        self.profit += order_profit(order);
        self.orders += 1;
    }
}

/// Percent of target reached; `0` when there is no positive target
pub fn achievement(revenue: f64, target: f64) -> f64 {
    if target > 0.0 {
        revenue / target * 100.0
    } else {
        0.0
    }
}

/// Target amount of a user for a month, first matching row wins
pub fn target_for(targets: &[MonthlyTarget], user_name: &str, month: &str) -> f64 {
    targets
        .iter()
        .find(|t| t.matches(user_name, month))
        .map(|t| t.target_amount)
        .unwrap_or(0.0)
}

/// Build the sales performance statistics
///
/// Only orders with a grand total take part. Targets are read for the month of
/// `today`. Team figures are the sums of their members' user figures, so an
/// order counts for the team of the user who owns it, whatever its own `team`
/// column says.
pub fn compute_performance(
    orders: &[Order],
    users: &[SalesUser],
    targets: &[MonthlyTarget],
    today: NaiveDate,
) -> SalesPerformanceResponse {
    let target_month = month_of(today);
    let counted: Vec<&Order> = orders.iter().filter(|o| o.is_countable()).collect();

    // Totals over all counted orders, per owner and per month
    let mut overall = Totals::default();
    let mut per_user: HashMap<&str, Totals> = HashMap::new();
    let mut per_month: BTreeMap<String, Totals> = BTreeMap::new();

    for order in &counted {
        overall.add(order);
        per_user
            .entry(order.user_name.as_str())
            .or_default()
            .add(order);
        per_month
            .entry(month_key(order.timestamp.as_deref(), today))
            .or_default()
            .add(order);
    }

    let by_user: Vec<UserPerformance> = users
        .iter()
        .filter(|u| u.is_qualified())
        .map(|user| {
            let totals = per_user
                .get(user.user_name.as_str())
                .copied()
                .unwrap_or_default();
            let target = target_for(targets, &user.user_name, &target_month);
            UserPerformance {
                user_name: user.user_name.clone(),
                full_name: user.full_name.clone(),
                team: user.team.clone(),
                profile_picture_url: user.profile_picture_url.clone(),
                revenue: totals.revenue,
                profit: totals.profit,
                order_count: totals.orders,
                target,
                achievement: achievement(totals.revenue, target),
            }
        })
        .collect();

    let by_team = rollup_teams(&by_user);

    let overall_target: f64 = by_team.iter().map(|t| t.target).sum();

    let monthly_trend = per_month
        .into_iter()
        .map(|(label, totals)| TrendPoint {
            label,
            value: totals.revenue,
            profit: totals.profit,
            orders: totals.orders,
        })
        .collect();

    SalesPerformanceResponse {
        summary: PerformanceSummary {
            total_revenue: overall.revenue,
            total_profit: overall.profit,
            total_orders: overall.orders,
            overall_target,
            overall_achievement: achievement(overall.revenue, overall_target),
        },
        by_user,
        by_team,
        monthly_trend,
        has_data: !users.is_empty(),
        target_month,
    }
}

/// Sum user statistics per team, teams in first-seen order
fn rollup_teams(by_user: &[UserPerformance]) -> Vec<TeamPerformance> {
    let mut teams: Vec<TeamPerformance> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for user in by_user.iter().filter(|u| !u.team.is_empty()) {
        let slot = *index.entry(user.team.as_str()).or_insert_with(|| {
            teams.push(TeamPerformance {
                team: user.team.clone(),
                ..Default::default()
            });
            teams.len() - 1
        });

        let team = &mut teams[slot];
        team.members += 1;
        team.revenue += user.revenue;
        team.profit += user.profit;
        team.order_count += user.order_count;
        team.target += user.target;
    }

    for team in &mut teams {
        team.achievement = achievement(team.revenue, team.target);
    }

    teams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn order(user: &str, team: &str, total: Option<f64>, timestamp: &str) -> Order {
        Order {
            id: format!("{user}-{timestamp}"),
            user_name: user.to_string(),
            team: team.to_string(),
            timestamp: Some(timestamp.to_string()),
            grand_total: total,
            ..Default::default()
        }
    }

    fn user(name: &str, team: &str) -> SalesUser {
        SalesUser {
            user_name: name.to_string(),
            full_name: name.to_uppercase(),
            team: team.to_string(),
            ..Default::default()
        }
    }

    fn target(name: &str, month: &str, amount: f64) -> MonthlyTarget {
        MonthlyTarget {
            user_name: name.to_string(),
            month: month.to_string(),
            target_amount: amount,
        }
    }

    #[test]
    fn test_two_month_scenario() {
        let orders = vec![
            order("a", "", Some(100.0), "2024-01-15"),
            order("a", "", Some(50.0), "2024-02-01"),
        ];
        let users = vec![user("a", "X")];
        let targets = vec![target("a", "2024-03", 0.0)];

        let result = compute_performance(&orders, &users, &targets, today());

        assert_eq!(result.summary.total_revenue, 150.0);
        assert_eq!(result.summary.total_orders, 2);
        assert_eq!(result.by_user[0].achievement, 0.0);
        assert_eq!(result.monthly_trend.len(), 2);
        assert_eq!(result.monthly_trend[0].label, "2024-01");
        assert_eq!(result.monthly_trend[0].value, 100.0);
        assert_eq!(result.monthly_trend[1].label, "2024-02");
        assert_eq!(result.monthly_trend[1].value, 50.0);
        assert!(result.has_data);
        assert_eq!(result.target_month, "2024-03");
    }

    #[test]
    fn test_no_users_still_sums_orders() {
        let orders = vec![
            order("a", "X", Some(10.0), "2024-03-01"),
            order("b", "Y", Some(20.0), "2024-03-02"),
        ];

        let result = compute_performance(&orders, &[], &[], today());

        assert!(!result.has_data);
        assert!(result.by_user.is_empty());
        assert!(result.by_team.is_empty());
        assert_eq!(result.summary.total_revenue, 30.0);
        assert_eq!(result.summary.overall_achievement, 0.0);
    }

    #[test]
    fn test_missing_grand_total_differs_from_zero() {
        let orders = vec![
            order("a", "X", None, "2024-03-01"),
            order("a", "X", Some(0.0), "2024-03-01"),
            order("a", "X", Some(40.0), "2024-03-02"),
        ];
        let users = vec![user("a", "X")];

        let result = compute_performance(&orders, &users, &[], today());

        assert_eq!(result.summary.total_orders, 2);
        assert_eq!(result.summary.total_revenue, 40.0);
        assert_eq!(result.by_user[0].order_count, 2);
        let trend_orders: usize = result.monthly_trend.iter().map(|p| p.orders).sum();
        assert_eq!(trend_orders, 2);
    }

    #[test]
    fn test_achievement_uses_current_month_target_unclamped() {
        let orders = vec![order("a", "X", Some(300.0), "2024-03-05")];
        let users = vec![user("a", "X")];
        let targets = vec![
            target("a", "2024-02", 1000.0),
            target("a", "2024-03", 200.0),
            // duplicate key: the first row wins
            target("a", "2024-03", 600.0),
        ];

        let result = compute_performance(&orders, &users, &targets, today());
        let a = &result.by_user[0];

        assert_eq!(a.target, 200.0);
        assert_eq!(a.achievement, 150.0);
        assert_eq!(result.summary.overall_target, 200.0);
        assert_eq!(result.summary.overall_achievement, 150.0);
    }

    #[test]
    fn test_zero_target_never_produces_nan() {
        let orders = vec![order("a", "X", Some(300.0), "2024-03-05")];
        let users = vec![user("a", "X"), user("b", "X")];
        let targets = vec![target("a", "2024-03", 0.0)];

        let result = compute_performance(&orders, &users, &targets, today());

        for u in &result.by_user {
            assert_eq!(u.achievement, 0.0);
            assert!(u.achievement.is_finite());
        }
        assert_eq!(result.by_team[0].achievement, 0.0);
        assert_eq!(result.summary.overall_achievement, 0.0);
    }

    #[test]
    fn test_user_without_orders_is_all_zero() {
        let users = vec![user("idle", "X")];

        let result = compute_performance(&[], &users, &[], today());
        let idle = &result.by_user[0];

        assert_eq!(idle.revenue, 0.0);
        assert_eq!(idle.profit, 0.0);
        assert_eq!(idle.order_count, 0);
        assert_eq!(idle.achievement, 0.0);
        assert!(result.monthly_trend.is_empty());
    }

    #[test]
    fn test_team_rollup_follows_user_team_not_order_team() {
        // "a" moved from team Old to team New; the order still says Old
        let orders = vec![
            order("a", "Old", Some(100.0), "2024-03-01"),
            order("b", "Old", Some(70.0), "2024-03-02"),
            order("c", "New", Some(5.0), "2024-03-02"),
        ];
        let users = vec![user("b", "Old"), user("a", "New"), user("c", "New"), user("d", "")];
        let targets = vec![
            target("a", "2024-03", 100.0),
            target("b", "2024-03", 100.0),
            target("c", "2024-03", 100.0),
            target("d", "2024-03", 999.0),
        ];

        let result = compute_performance(&orders, &users, &targets, today());

        let names: Vec<&str> = result.by_team.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(names, vec!["Old", "New"]);

        let old = &result.by_team[0];
        assert_eq!(old.revenue, 70.0);
        assert_eq!(old.members, 1);

        let new = &result.by_team[1];
        assert_eq!(new.revenue, 105.0);
        assert_eq!(new.order_count, 2);
        assert_eq!(new.target, 200.0);
        assert_eq!(new.achievement, 52.5);

        // "d" has no team: listed per user, ignored by teams and overall target
        assert_eq!(result.by_user.len(), 4);
        assert_eq!(result.summary.overall_target, 300.0);
    }

    #[test]
    fn test_users_without_user_name_are_skipped() {
        let orders = vec![order("", "X", Some(10.0), "2024-03-01")];
        let users = vec![user("", "X"), user("a", "X")];

        let result = compute_performance(&orders, &users, &[], today());

        assert_eq!(result.by_user.len(), 1);
        assert_eq!(result.by_user[0].user_name, "a");
        assert_eq!(result.by_team[0].revenue, 0.0);
        assert_eq!(result.summary.total_revenue, 10.0);
    }

    #[test]
    fn test_user_name_match_is_exact() {
        let orders = vec![order("Linh", "X", Some(10.0), "2024-03-01")];
        let users = vec![user("linh", "X")];

        let result = compute_performance(&orders, &users, &[], today());

        assert_eq!(result.by_user[0].revenue, 0.0);
    }

    #[test]
    fn test_trend_sorted_and_bad_timestamps_go_to_current_month() {
        let mut orders = vec![
            order("a", "X", Some(1.0), "2024-02-11"),
            order("a", "X", Some(2.0), "2023-12-31"),
            order("a", "X", Some(4.0), "garbage"),
        ];
        orders.push(Order {
            id: "no-ts".into(),
            user_name: "a".into(),
            grand_total: Some(8.0),
            ..Default::default()
        });

        let result = compute_performance(&orders, &[user("a", "X")], &[], today());

        let labels: Vec<&str> = result.monthly_trend.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2023-12", "2024-02", "2024-03"]);
        assert_eq!(result.monthly_trend[2].value, 12.0);
        assert_eq!(result.monthly_trend[2].orders, 2);

        let trend_orders: usize = result.monthly_trend.iter().map(|p| p.orders).sum();
        assert_eq!(trend_orders, result.summary.total_orders);
    }

    #[test]
    fn test_profit_rolls_up() {
        let orders = vec![
            Order {
                id: "1".into(),
                user_name: "a".into(),
                timestamp: Some("2024-03-01".into()),
                grand_total: Some(500.0),
                product_cost: 300.0,
                internal_cost: 25.0,
                ..Default::default()
            },
            Order {
                id: "2".into(),
                user_name: "a".into(),
                timestamp: Some("2024-03-02".into()),
                grand_total: Some(100.0),
                product_cost: 150.0,
                internal_cost: 0.0,
                ..Default::default()
            },
        ];

        let result = compute_performance(&orders, &[user("a", "X")], &[], today());

        assert_eq!(result.summary.total_profit, 125.0);
        assert_eq!(result.by_user[0].profit, 125.0);
        assert_eq!(result.by_team[0].profit, 125.0);
        assert_eq!(result.monthly_trend[0].profit, 125.0);
    }
}
