use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "ModuleId")]
    pub id: i64,
    #[serde(rename = "ModuleName")]
    pub name: String,
}
