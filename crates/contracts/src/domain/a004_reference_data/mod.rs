use serde::{Deserialize, Serialize};

/// Reference sheets editable from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSheet {
    Products,
    Users,
    ShippingMethods,
    Drivers,
    BankAccounts,
}

impl ReferenceSheet {
    pub const ALL: [ReferenceSheet; 5] = [
        ReferenceSheet::Products,
        ReferenceSheet::Users,
        ReferenceSheet::ShippingMethods,
        ReferenceSheet::Drivers,
        ReferenceSheet::BankAccounts,
    ];

    /// Route segment, e.g. `/api/reference/shipping_methods`
    pub fn code(&self) -> &'static str {
        match self {
            ReferenceSheet::Products => "products",
            ReferenceSheet::Users => "users",
            ReferenceSheet::ShippingMethods => "shipping_methods",
            ReferenceSheet::Drivers => "drivers",
            ReferenceSheet::BankAccounts => "bank_accounts",
        }
    }

    /// Sheet name on the remote backend
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ReferenceSheet::Products => "Products",
            ReferenceSheet::Users => "Users",
            ReferenceSheet::ShippingMethods => "ShippingMethods",
            ReferenceSheet::Drivers => "Drivers",
            ReferenceSheet::BankAccounts => "BankAccounts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReferenceSheet::Products => "Products",
            ReferenceSheet::Users => "Users",
            ReferenceSheet::ShippingMethods => "Shipping methods",
            ReferenceSheet::Drivers => "Drivers",
            ReferenceSheet::BankAccounts => "Bank accounts",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// Normalized rows of a reference sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRowsResponse {
    pub sheet: ReferenceSheet,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for sheet in ReferenceSheet::ALL {
            assert_eq!(ReferenceSheet::from_code(sheet.code()), Some(sheet));
        }
        assert_eq!(ReferenceSheet::from_code("orders"), None);
    }

    #[test]
    fn test_serde_matches_code() {
        let json = serde_json::to_string(&ReferenceSheet::BankAccounts).unwrap();
        assert_eq!(json, "\"bank_accounts\"");
    }
}
