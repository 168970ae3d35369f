use contracts::dashboards::d401_province_revenue::{ProvinceRevenue, ProvinceRevenueResponse};
use contracts::domain::a001_order::aggregate::Order;
use std::collections::HashMap;
use strsim::jaro_winkler;

use super::region_names::normalize_region_name;

/// Minimal Jaro-Winkler similarity for a fuzzy province match
pub const MIN_SIMILARITY: f64 = 0.92;

#[derive(Default)]
struct ProvinceTotals {
    revenue: f64,
    orders: usize,
    source_names: Vec<String>,
}

/// Index of the feature whose key equals `key`, or the most similar one
fn match_feature(key: &str, exact: &HashMap<&str, usize>, feature_keys: &[String]) -> Option<usize> {
    if let Some(index) = exact.get(key) {
        return Some(*index);
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in feature_keys.iter().enumerate() {
        let score = jaro_winkler(key, candidate);
        if score >= MIN_SIMILARITY && best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

/// Revenue per boundary feature
///
/// Orders are grouped by their normalized province. Every feature gets a row,
/// with zero revenue when nothing matched it. Orders without a grand total or
/// without a province are left out.
pub fn compute_province_revenue(orders: &[Order], feature_names: &[String]) -> ProvinceRevenueResponse {
    let feature_keys: Vec<String> = feature_names
        .iter()
        .map(|name| normalize_region_name(name))
        .collect();

    let mut exact: HashMap<&str, usize> = HashMap::new();
    for (index, key) in feature_keys.iter().enumerate() {
        exact.entry(key.as_str()).or_insert(index);
    }

    // Группировка заказов по нормализованной провинции, в порядке появления
    let mut groups: Vec<(String, ProvinceTotals)> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for order in orders.iter().filter(|o| o.is_countable()) {
        let Some(raw) = order.province.as_deref().map(str::trim).filter(|p| !p.is_empty()) else {
            continue;
        };
        let key = normalize_region_name(raw);
        if key.is_empty() {
            continue;
        }

        let slot = *group_index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, ProvinceTotals::default()));
            groups.len() - 1
        });
        let totals = &mut groups[slot].1;
        totals.revenue += order.revenue();
        totals.orders += 1;
        if !totals.source_names.iter().any(|name| name == raw) {
            totals.source_names.push(raw.to_string());
        }
    }

    let mut provinces: Vec<ProvinceRevenue> = feature_names
        .iter()
        .map(|name| ProvinceRevenue {
            feature_name: name.clone(),
            ..Default::default()
        })
        .collect();
    let mut unmatched = Vec::new();

    for (key, totals) in groups {
        match match_feature(&key, &exact, &feature_keys) {
            Some(index) => {
                let row = &mut provinces[index];
                row.revenue += totals.revenue;
                row.orders += totals.orders;
                row.source_names.extend(totals.source_names);
            }
            None => unmatched.extend(totals.source_names),
        }
    }

    if !unmatched.is_empty() {
        tracing::debug!("Provinces without a boundary feature: {:?}", unmatched);
    }

    let max_revenue = provinces.iter().map(|p| p.revenue).fold(0.0, f64::max);

    ProvinceRevenueResponse {
        provinces,
        max_revenue,
        unmatched,
    }
}
