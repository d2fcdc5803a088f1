//! Newline-delimited JSON change feed.
//!
//! Each non-blank line is one [`MessageCreated`] event:
//!
//! ```text
//! {"id":"k3Jd9","phone":"+905551234567","text":"Randevu hatırlatma"}
//! ```
//!
//! Malformed lines are logged and skipped so that one bad record does not
//! stop the feed.

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::SplitStream;
use tokio_stream::{Stream, StreamExt};

use super::MessageCreated;

/// Parses one feed line. Returns `None` for blank or malformed lines.
#[must_use]
pub fn parse_line(line: &str) -> Option<MessageCreated> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Skipping malformed feed line: {e}");
            None
        }
    }
}

/// Turns a line-oriented reader into a stream of events.
///
/// Lines that are not valid UTF-8 are skipped like any other malformed line.
/// The stream ends at EOF or on the first read error (which is logged).
pub fn events<R>(reader: R) -> impl Stream<Item = MessageCreated>
where
    R: AsyncBufRead + Unpin,
{
    SplitStream::new(reader.split(b'\n'))
        .map_while(|segment| match segment {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::error!("Failed to read change feed: {e}");
                None
            }
        })
        .filter_map(|bytes| match String::from_utf8(bytes) {
            Ok(line) => parse_line(&line),
            Err(e) => {
                tracing::warn!("Skipping feed line that is not UTF-8: {e}");
                None
            }
        })
}

/// Event stream over standard input.
pub fn stdin() -> impl Stream<Item = MessageCreated> {
    events(BufReader::new(tokio::io::stdin()))
}

/// Event stream over a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub async fn file(path: PathBuf) -> std::io::Result<impl Stream<Item = MessageCreated>> {
    let file = tokio::fs::File::open(&path).await?;
    Ok(events(BufReader::new(file)))
}
