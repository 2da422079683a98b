use super::ports::{ChannelError, ChannelPort, Request};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Clone, Copy)]
enum LevelMessage {
    Raise,
    Detach,
}

#[tokio::test]
async fn test_request_response() {
    let (request, receiver): (Request<u8, bool, ()>, _) = Request::new(42);
    assert_eq!(request.payload, 42);
    request
        .response_sender
        .send(Ok(true))
        .expect("Channel failure when sending response");
    let response = receiver
        .await
        .expect("Channel failure when receiving response");
    assert_eq!(response, Ok(true));
}

#[tokio::test]
async fn test_port_round_trip() {
    let detached = Arc::new(AtomicBool::new(false));
    let port = spawn_level_task(254, detached.clone());
    assert_eq!(port.request(LevelMessage::Raise).await.unwrap(), 255);
    match port.request(LevelMessage::Raise).await {
        Err(ChannelError::Server(message)) => assert_eq!(message, "Already at maximum"),
        other => panic!("Unexpected response {:?}", other),
    }
    assert!(!detached.load(Ordering::Acquire));
    port.await_shutdown().await;
    assert!(detached.load(Ordering::Acquire));
}

#[tokio::test]
async fn test_transport_errors() {
    let detached = Arc::new(AtomicBool::new(false));
    let port = spawn_level_task(0, detached.clone());
    let second_port = port.clone();
    match port.request(LevelMessage::Detach).await {
        Err(ChannelError::Recv) => {}
        other => panic!("Expected a receive error, got {:?}", other),
    }
    match second_port.request(LevelMessage::Raise).await {
        Err(ChannelError::Send) => {}
        other => panic!("Expected a send error, got {:?}", other),
    }
    // Hangs if the shutdown notifier is not dropped together with the receiver
    port.await_shutdown().await;
    second_port.await_shutdown().await;
    assert!(detached.load(Ordering::Acquire));
}

fn spawn_level_task(
    initial: u8,
    detached: Arc<AtomicBool>,
) -> ChannelPort<LevelMessage, u8, &'static str> {
    let (port, mut receiver) = ChannelPort::make();
    tokio::spawn(async move {
        let mut level = initial;
        while let Some(request) = receiver.recv().await {
            match request.payload {
                LevelMessage::Raise => {
                    let response = if level == u8::MAX {
                        Err("Already at maximum")
                    } else {
                        level += 1;
                        Ok(level)
                    };
                    let _ = request.response_sender.send(response);
                }
                LevelMessage::Detach => break,
            }
        }
        detached.store(true, Ordering::Release);
    });
    port
}
