use cucumber::World;
use loose_end::run::Outcome;
use std::fmt;
use tempfile::TempDir;
use wiremock::MockServer;

#[derive(Default, World)]
pub struct LooseEndWorld {
    pub work_dir: Option<TempDir>,
    pub server: Option<MockServer>,
    pub answers: Vec<String>,
    pub captured_output: Vec<u8>,
    pub outcome: Option<Result<Outcome, loose_end::Error>>,
}

impl fmt::Debug for LooseEndWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LooseEndWorld")
            .field("work_dir", &self.work_dir.as_ref().map(|d| d.path().to_path_buf()))
            .field("server", &self.server.as_ref().map(MockServer::uri))
            .field("answers", &self.answers)
            .field("captured_output", &String::from_utf8_lossy(&self.captured_output))
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[tokio::main]
async fn main() {
    LooseEndWorld::run("features").await;
}

mod steps;
