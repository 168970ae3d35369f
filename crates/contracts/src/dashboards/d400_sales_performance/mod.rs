use serde::{Deserialize, Serialize};

/// Query for the sales performance dashboard
///
/// The filter is applied to orders by their own `team` field and timestamp
/// before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesPerformanceRequest {
    /// Inclusive start date "YYYY-MM-DD"
    #[serde(default)]
    pub date_from: Option<String>,
    /// Inclusive end date "YYYY-MM-DD"
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    /// Force re-fetching the source sheets
    #[serde(default)]
    pub refresh: bool,
}

impl SalesPerformanceRequest {
    /// True when at least one date bound has a non-blank value
    pub fn has_date_bounds(&self) -> bool {
        [&self.date_from, &self.date_to]
            .into_iter()
            .any(|bound| bound.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Result of the performance aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPerformanceResponse {
    pub summary: PerformanceSummary,
    pub by_user: Vec<UserPerformance>,
    pub by_team: Vec<TeamPerformance>,
    pub monthly_trend: Vec<TrendPoint>,
    /// True when the user collection is non-empty
    pub has_data: bool,
    /// Month ("YYYY-MM") the targets were taken from
    #[serde(default)]
    pub target_month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_orders: usize,
    pub overall_target: f64,
    /// Percent, not clamped
    pub overall_achievement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPerformance {
    pub user_name: String,
    pub full_name: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub revenue: f64,
    pub profit: f64,
    pub order_count: usize,
    pub target: f64,
    /// Percent, may exceed 100
    pub achievement: f64,
}

impl UserPerformance {
    /// Full name, or the user name when the full name is blank
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.user_name
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    pub team: String,
    pub members: usize,
    pub revenue: f64,
    pub profit: f64,
    pub order_count: usize,
    pub target: f64,
    pub achievement: f64,
}

/// One month of the revenue trend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// "YYYY-MM"
    pub label: String,
    /// Revenue of the month
    pub value: f64,
    pub profit: f64,
    pub orders: usize,
}

/// Width of a progress bar in percent; achievement itself stays unclamped
pub fn progress_width(achievement: f64) -> f64 {
    if achievement.is_finite() {
        achievement.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
