use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /api/scrape/matches`, success and error alike.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScrapeRsp {
    pub status: String,
    pub message: String,

    #[serde(default)]
    pub matches_added: usize,
    #[serde(default)]
    pub total_matches: usize,
}

impl ScrapeRsp {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
