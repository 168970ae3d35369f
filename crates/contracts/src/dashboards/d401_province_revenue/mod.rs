use serde::{Deserialize, Serialize};

/// Revenue per map feature (province boundary)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceRevenue {
    /// Feature name as written in the boundary file
    pub feature_name: String,
    pub revenue: f64,
    pub orders: usize,
    /// Province spellings from the order data that were attributed here
    pub source_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceRevenueResponse {
    pub provinces: Vec<ProvinceRevenue>,
    /// Upper bound for the color scale
    pub max_revenue: f64,
    /// Province names from orders that no feature matched
    pub unmatched: Vec<String>,
}
