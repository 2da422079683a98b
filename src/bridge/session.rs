//! Serving a bridge channel over a line-oriented byte stream.
//!
//! Every line read is one JSON request, a [MethodCall] optionally addressed
//! to a channel by name:
//!
//! ```text
//! {"channel": "brightness_bridge", "method": "keepScreenOn", "argument": true}
//! ```
//!
//! Every request gets exactly one JSON-encoded [MethodResponse] line back, in
//! order. The channel stays open for the whole session, so window attributes
//! set by one request are still in place for the next.

use super::{codec::MethodCall, dispatch::BridgeChannel, MethodResponse};
use anyhow::Result;
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    channel: Option<String>,
    #[serde(flatten)]
    call: MethodCall,
}

/// Answer requests from `reader` on `writer` until `reader` is exhausted.
///
/// Requests addressed to another channel and lines that aren't requests at
/// all are answered with [MethodResponse::NotImplemented]. Blank lines are
/// skipped.
pub async fn serve_lines<R, W>(channel: &BridgeChannel, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Envelope>(&line) {
            Ok(Envelope {
                channel: Some(name),
                ..
            }) if name != channel.name() => {
                log::warn!("Request for unknown channel {}", name);
                MethodResponse::NotImplemented
            }
            Ok(envelope) => channel.call(envelope.call).await?,
            Err(e) => {
                log::warn!("Malformed request {:?}: {}", line, e);
                MethodResponse::NotImplemented
            }
        };
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }
    log::debug!("{}: input closed", channel.name());
    Ok(())
}
