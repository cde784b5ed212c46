use serde::{Deserialize, Serialize};

use crate::team_service::StoredTeam;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiTeam {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub country: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<u16>,
}

impl From<StoredTeam> for ApiTeam {
    fn from(value: StoredTeam) -> Self {
        ApiTeam {
            id: value.id,
            name: value.name,
            short_name: value.short_name,
            country: value.country,
            founded_year: value.founded_year,
        }
    }
}
