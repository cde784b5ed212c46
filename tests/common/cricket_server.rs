use std::process::{Child, Command};

use assert_cmd::prelude::CommandCargoExt;
use cricket_points_rs::api_client::ApiClient;
use cricket_points_rs::config_handler::Config;
use cricket_points_rs::models_api::matches::ApiMatch;
use predicates::function::FnPredicate;
use predicates::Predicate;

pub struct CricketServer {
    port: u16,
    child_process: Option<Child>,
}

impl Drop for CricketServer {
    fn drop(&mut self) {
        if self.child_process.is_some() {
            self.child_process.as_mut().unwrap().kill()
                .expect("Should kill");
        }
    }
}

impl CricketServer {
    pub fn new(port: u16) -> CricketServer {
        CricketServer { port, child_process: None }
    }

    pub fn start(&mut self, path: &str, cricbuzz_url: &str) {
        let config = Config {
            port: self.port,
            cricbuzz_url: cricbuzz_url.to_string(),
            db_path: format!("{}/db", path),
            scrape_interval_s: 60 * 60,
            stale_match_hours: 8,
            user_agent: "integration-test".to_string(),
            scrape_on_startup: false,
        };

        let config_str = serde_json::to_string(&config).unwrap();
        let config_path = format!("{path}/config.json");
        std::fs::write(config_path.clone(), config_str).unwrap();
        let child_process = Command::cargo_bin("cricket-points-rs")
            .unwrap()
            .env("CONFIG_PATH", config_path)
            .spawn()
            .expect("should start");

        self.child_process = Some(child_process);
    }

    pub fn get_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.get_url())
    }

    pub async fn retry_until_matches<F>(&self, predicate: FnPredicate<F, Vec<ApiMatch>>, retry_ms: u64) -> Vec<ApiMatch>
    where
        F: Fn(&Vec<ApiMatch>) -> bool,
    {
        let client = self.client();
        let mut nr_loops = 0;
        loop {
            if let Ok(matches) = client.fetch_matches().await {
                if predicate.eval(&matches) {
                    return matches;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(retry_ms)).await;
            nr_loops += 1;
            if nr_loops > 50 {
                panic!("retry failed");
            }
        }
    }

    pub async fn wait_until_ready(&self) {
        let client = self.client();
        let mut nr_loops = 0;
        loop {
            if client.fetch_health().await.is_ok() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            nr_loops += 1;
            if nr_loops > 100 {
                panic!("server never became ready");
            }
        }
    }
}
