//! Mock node server for testing the three node API dialects
//!
//! This simulates node HTTP APIs without requiring a real node.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use status_monitor::status::{MonitoredNode, PeerRecord};

/// Mock server that answers like a node of any dialect
pub struct MockNodeServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockNodeServer {
    /// Create a new mock node server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Ip part of the server address
    pub fn ip(&self) -> String {
        self.server.address().ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.server.address().port()
    }

    /// Peer record pointing at this server
    pub fn peer_record(&self, name: &str) -> PeerRecord {
        PeerRecord {
            name: name.to_string(),
            ip: self.ip(),
            port: self.port(),
        }
    }

    /// Monitored node entry pointing at this server
    pub fn monitored_node(&self, name: &str) -> MonitoredNode {
        MonitoredNode {
            name: name.to_string(),
            host: self.ip(),
            port: self.port(),
        }
    }

    /// Answer `GET path` with a JSON body
    pub async fn mock_json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `GET path` with a bare status code
    pub async fn mock_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer `GET path` with a 200 whose body is not JSON
    pub async fn mock_malformed(&self, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&self.server)
            .await;
    }

    /// Answer every request only after `delay`
    pub async fn mock_slow(&self, delay: Duration) {
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true}))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Generic dialect: height, version and peers all succeed
    pub async fn mock_generic_healthy(&self, height: u64, version: &str, peers: Value) {
        self.mock_json(
            "/api/blocks/getHeight",
            json!({"success": true, "height": height}),
        )
        .await;
        self.mock_json(
            "/api/peers/version",
            json!({"success": true, "version": version}),
        )
        .await;
        self.mock_json("/api/peers", json!({"success": true, "peers": peers}))
            .await;
    }

    /// Lisk dialect: node status and sorted peer list
    pub async fn mock_lisk_healthy(&self, height: u64, peers: Value) {
        self.mock_json("/api/node/status", json!({"data": {"height": height}}))
            .await;
        Mock::given(method("GET"))
            .and(path("/api/peers"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .and(query_param("sort", "height:desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": peers})))
            .mount(&self.server)
            .await;
    }

    /// Ark v2 dialect: only answers requests carrying `API-Version: 2`
    pub async fn mock_arkv2_healthy(&self, now: u64, peers: Value) {
        Mock::given(method("GET"))
            .and(path("/api/node/status"))
            .and(header("API-Version", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"now": now}})),
            )
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/peers"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .and(header("API-Version", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": peers})))
            .mount(&self.server)
            .await;
    }

    /// Fail the test on drop if this server receives any request
    pub async fn expect_no_requests(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
