use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Nothing listens here, so every store call fails once server selection
/// times out and the API runs on its sample-data fallback.
pub const UNREACHABLE_MONGODB_URL: &str = "mongodb://127.0.0.1:1";

pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_edusign-api"));
        cmd.arg("serve")
            .env("API_PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("MONGODB_URL", UNREACHABLE_MONGODB_URL)
            .env("MONGODB_SERVER_SELECTION_TIMEOUT_MS", "300")
            .env("DATABASE_NAME", "edusign_test")
            // blank values count as unset and win over any local .env
            .env("SUPABASE_URL", "")
            .env("SUPABASE_SERVICE_ROLE_KEY", "")
            .env("AUTH_DEMO_TOKENS", "demo-token,fallback")
            .env("AUTH_ALLOW_PLACEHOLDER_IDENTITIES", "true")
            .env("API_MIN_AGE", "2")
            .env("API_MAX_AGE", "120")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start a dedicated server for one test; it is killed when dropped
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(20)).await?;
    Ok(server)
}
