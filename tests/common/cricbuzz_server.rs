use std::net::SocketAddr;
use std::time::Duration;

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::task::JoinHandle;

/// Plausible live-scores markup: one finished match, one live match and
/// one card too short to mean anything.
const LIVE_SCORES_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Live Cricket Score</title></head>
<body>
  <div class="cb-mtch-lst cb-tms-itm">
    India vs Australia, 3rd ODI ICC Cricket World Cup
    <span>IND 326/5</span> <span>AUS 289/10</span>
    <span>India won by 37 runs</span>
  </div>
  <div class="cb-mtch-lst cb-tms-itm">
    England vs Pakistan, 2nd T20I Live
    <span>ENG 182/6 (18.4 Overs)</span> <span>PAK 97/3 (11.0 Overs)</span>
  </div>
  <div class="cb-mtch-lst">Ad</div>
</body>
</html>"#;

pub struct CricbuzzServer {
    port: u16,
    delay: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl Drop for CricbuzzServer {
    fn drop(&mut self) {
        for e in &self.handles {
            e.abort();
        }
    }
}

impl CricbuzzServer {
    pub fn new(port: u16) -> CricbuzzServer {
        CricbuzzServer { port, delay: Duration::ZERO, handles: vec![] }
    }

    /// A page that takes its time, to keep a scrape pass in flight.
    pub fn slow(port: u16, delay: Duration) -> CricbuzzServer {
        CricbuzzServer { port, delay, handles: vec![] }
    }

    pub async fn start(&mut self) {
        let port = self.port;
        let delay = self.delay;
        let handle = tokio::spawn(async move { CricbuzzServer::serve(port, delay).await });
        self.handles.push(handle);

        tokio::time::sleep(Duration::from_millis(500)).await; // wait for mock to start
    }

    pub fn get_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    async fn serve(port: u16, delay: Duration) {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let app = Router::new()
            .route(
                "/cricket-match/live-scores",
                get(move || async move {
                    tokio::time::sleep(delay).await;
                    CricbuzzServer::get_live_scores().await
                }),
            )
            // anything else on this host is an HTML page too
            .fallback(CricbuzzServer::get_live_scores);

        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await
            .unwrap();
    }

    async fn get_live_scores() -> Html<&'static str> {
        Html(LIVE_SCORES_PAGE)
    }
}
