use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phonenumber: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub agency_name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub create_time: Option<String>,
}

impl AccountRecord {
    pub fn is_active(&self) -> bool {
        self.status == "0"
    }
}
