use serde::{Deserialize, Serialize};

/// Salesperson account from the users sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesUser {
    pub user_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SalesUser {
    /// Users without a user name are ignored by statistics
    pub fn is_qualified(&self) -> bool {
        !self.user_name.is_empty()
    }
}
