use serde::{Deserialize, Serialize};

use super::time::display_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Profile {
    pub fn display_created(&self) -> String {
        display_timestamp(&self.created)
    }
}
