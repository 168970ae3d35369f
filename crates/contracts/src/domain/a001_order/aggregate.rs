use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

/// Sales order as read from the remote backend's orders sheet
///
/// `grand_total` keeps the difference between a missing column (`None`) and a
/// present-but-zero amount (`Some(0.0)`): only the former is left out of
/// revenue statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<f64>,
    #[serde(default)]
    pub product_cost: f64,
    /// Shipping cost charged by the delivery agent
    #[serde(default)]
    pub internal_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Order {
    /// Orders without a grand total column are not counted anywhere
    pub fn is_countable(&self) -> bool {
        self.grand_total.is_some()
    }

    pub fn revenue(&self) -> f64 {
        self.grand_total.unwrap_or(0.0)
    }
}

// ============================================================================
// Delivery cost confirmation
// ============================================================================

/// Body of `POST /api/orders/:id/confirm_delivery_cost`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDeliveryCostRequest {
    pub internal_cost: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl ConfirmDeliveryCostRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !self.internal_cost.is_finite() {
            return Err("Internal cost must be a number".into());
        }
        if self.internal_cost < 0.0 {
            return Err("Internal cost cannot be negative".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDeliveryCostResponse {
    pub order_id: String,
    pub internal_cost: f64,
    pub confirmed_by: String,
    pub confirmed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_grand_total_is_not_countable() {
        let order: Order = serde_json::from_str(r#"{"id":"o-1","userName":"an"}"#).unwrap();
        assert!(!order.is_countable());
        assert_eq!(order.revenue(), 0.0);

        let order: Order =
            serde_json::from_str(r#"{"id":"o-2","userName":"an","grandTotal":0}"#).unwrap();
        assert!(order.is_countable());
    }

    #[test]
    fn test_serializes_camel_case() {
        let order = Order {
            id: "o-1".into(),
            user_name: "an".into(),
            grand_total: Some(120.0),
            internal_cost: 20.0,
            ..Default::default()
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["userName"], "an");
        assert_eq!(value["grandTotal"], 120.0);
        assert_eq!(value["internalCost"], 20.0);
        assert!(value.get("timestamp").is_none());
    }

    #[test]
    fn test_confirm_request_validation() {
        let ok = ConfirmDeliveryCostRequest { internal_cost: 15000.0, note: None };
        assert!(ok.validate().is_ok());

        let negative = ConfirmDeliveryCostRequest { internal_cost: -1.0, note: None };
        assert!(negative.validate().is_err());

        let nan = ConfirmDeliveryCostRequest { internal_cost: f64::NAN, note: None };
        assert!(nan.validate().is_err());
    }
}
