use super::server::{spawn_server, Server};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Holds a raw brightness value and refuses to step past the top of the range.
struct StepServer {
    level: u8,
    fail_initialization: bool,
    teardown_notifier: mpsc::Sender<u8>,
}

impl StepServer {
    fn new(level: u8, fail_initialization: bool) -> (StepServer, mpsc::Receiver<u8>) {
        let (sender, receiver) = mpsc::channel(1);
        (
            StepServer {
                level,
                fail_initialization,
                teardown_notifier: sender,
            },
            receiver,
        )
    }
}

#[async_trait]
impl Server<u8, u8> for StepServer {
    fn get_name(&self) -> String {
        "StepServer".to_owned()
    }

    async fn handle_message(&mut self, step: u8) -> Result<u8> {
        self.level = self
            .level
            .checked_add(step)
            .ok_or_else(|| anyhow!("Step would overflow"))?;
        Ok(self.level)
    }

    async fn initialize(&mut self) -> Result<()> {
        if self.fail_initialization {
            Err(anyhow!("Forced initialization fail"))
        } else {
            Ok(())
        }
    }

    async fn tear_down(&mut self) -> Result<()> {
        Ok(self.teardown_notifier.send(self.level).await?)
    }
}

#[tokio::test]
async fn test_happy_path() {
    let (server, mut notifier) = StepServer::new(10, false);
    let port = spawn_server(server).await.expect("No port returned");
    assert_eq!(port.request(5).await.unwrap(), 15);
    assert_eq!(port.request(100).await.unwrap(), 115);
    drop(port);
    assert_eq!(
        notifier.recv().await.expect("tear_down not called on server"),
        115
    );
}

#[tokio::test]
async fn test_handler_failure_keeps_serving() {
    let (server, mut notifier) = StepServer::new(250, false);
    let port = spawn_server(server).await.expect("No port returned");
    assert!(port.request(10).await.is_err());
    assert_eq!(port.request(5).await.unwrap(), 255);
    drop(port);
    assert_eq!(
        notifier.recv().await.expect("tear_down not called on server"),
        255
    );
}

#[tokio::test]
async fn test_initialization_failure() {
    let (server, _) = StepServer::new(0, true);
    assert!(spawn_server(server).await.is_err());
}
