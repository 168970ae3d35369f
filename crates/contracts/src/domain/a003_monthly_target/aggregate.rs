use serde::{Deserialize, Serialize};

/// Monthly revenue goal for one salesperson
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTarget {
    pub user_name: String,
    /// Period in format "YYYY-MM"
    pub month: String,
    #[serde(default)]
    pub target_amount: f64,
}

impl MonthlyTarget {
    pub fn matches(&self, user_name: &str, month: &str) -> bool {
        self.user_name == user_name && self.month == month
    }
}
