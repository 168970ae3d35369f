use chrono::NaiveDate;
use contracts::dashboards::d400_sales_performance::SalesPerformanceRequest;
use contracts::domain::a001_order::aggregate::Order;

use crate::shared::coercion::parse_timestamp;

/// Date/team filter applied directly to orders
///
/// Unlike the team rollup of the aggregation, the team here is the order's own
/// `team` column. With any date bound set, orders whose timestamp cannot be
/// parsed are filtered out.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub team: Option<String>,
}

impl OrderFilter {
    /// Build from the dashboard query; unparseable dates are ignored
    pub fn from_request(request: &SalesPerformanceRequest) -> Self {
        let (date_from, date_to) = if request.has_date_bounds() {
            (
                parse_bound("date_from", request.date_from.as_deref()),
                parse_bound("date_to", request.date_to.as_deref()),
            )
        } else {
            (None, None)
        };

        Self {
            date_from,
            date_to,
            team: request
                .team
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date_from.is_none() && self.date_to.is_none() && self.team.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        if let Some(team) = &self.team {
            if &order.team != team {
                return false;
            }
        }

        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }

        let Some(date) = order
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .map(|dt| dt.date())
        else {
            return false;
        };

        self.date_from.map_or(true, |from| date >= from) && self.date_to.map_or(true, |to| date <= to)
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Ignoring invalid {} '{}': {}", name, raw, e);
            None
        }
    }
}

/// Orders passing the filter, in input order
pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    if filter.is_empty() {
        return orders.to_vec();
    }
    orders.iter().filter(|o| filter.matches(o)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(team: &str, timestamp: Option<&str>) -> Order {
        Order {
            id: format!("{team}-{timestamp:?}"),
            team: team.to_string(),
            timestamp: timestamp.map(str::to_string),
            grand_total: Some(1.0),
            ..Default::default()
        }
    }

    fn request(from: Option<&str>, to: Option<&str>, team: Option<&str>) -> SalesPerformanceRequest {
        SalesPerformanceRequest {
            date_from: from.map(str::to_string),
            date_to: to.map(str::to_string),
            team: team.map(str::to_string),
            refresh: false,
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let orders = vec![order("A", None), order("B", Some("garbage"))];
        let filter = OrderFilter::from_request(&request(None, None, Some("  ")));
        assert!(filter.is_empty());
        assert_eq!(filter_orders(&orders, &filter).len(), 2);
    }

    #[test]
    fn test_team_filter_uses_order_team() {
        let orders = vec![order("A", None), order("B", None), order("A", Some("2024-01-01"))];
        let filter = OrderFilter::from_request(&request(None, None, Some("A")));
        let kept = filter_orders(&orders, &filter);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|o| o.team == "A"));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let orders = vec![
            order("A", Some("2024-01-31 23:59:00")),
            order("A", Some("2024-02-01")),
            order("A", Some("2024-02-29 18:00:00")),
            order("A", Some("2024-03-01")),
            order("A", Some("not a date")),
            order("A", None),
        ];
        let filter = OrderFilter::from_request(&request(Some("2024-02-01"), Some("2024-02-29"), None));
        let kept = filter_orders(&orders, &filter);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_blank_bounds_do_not_drop_undated_orders() {
        let orders = vec![order("A", None), order("A", Some("garbage"))];
        let filter = OrderFilter::from_request(&request(Some(" "), Some(""), None));
        assert!(filter.is_empty());
        assert_eq!(filter_orders(&orders, &filter).len(), 2);
    }

    #[test]
    fn test_invalid_bound_is_ignored() {
        let filter = OrderFilter::from_request(&request(Some("01.02.2024"), None, None));
        assert!(filter.date_from.is_none());
        assert!(filter.is_empty());
    }
}
