//! Server-sent event decoding.

use bytes::Bytes;
use futures::{Stream, StreamExt};

use agentrun_protocols::error::ProviderError;
use agentrun_protocols::provider::{TextChunk, UsageSnapshot};

use crate::api::StreamChunk;

/// What one decoded SSE line contributes to the chunk stream.
#[derive(Debug)]
pub enum LineOutcome {
    /// Nothing to emit (blank line, comment, non-data field).
    Skip,
    /// A text fragment or a usage-only trailer.
    Chunk(TextChunk),
    /// The `[DONE]` sentinel; the stream ends here.
    End,
}

/// Decode one SSE line.
///
/// Only `data:` fields matter for this API; everything else is skipped.
pub fn parse_line(line: &str) -> Result<LineOutcome, ProviderError> {
    let line = line.trim_end_matches('\r');
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(LineOutcome::Skip);
    };
    let data = data.trim();

    if data == "[DONE]" {
        return Ok(LineOutcome::End);
    }

    let parsed: StreamChunk = serde_json::from_str(data)
        .map_err(|e| ProviderError::StreamError(format!("malformed stream chunk: {e}")))?;

    let text = parsed
        .choices
        .first()
        .and_then(|c| c.delta.content.clone())
        .unwrap_or_default();

    let mut chunk = TextChunk::text(text);
    if let Some(usage) = parsed.usage {
        chunk = chunk.with_usage(UsageSnapshot {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        });
    }
    Ok(LineOutcome::Chunk(chunk))
}

/// Turn the raw SSE byte stream into a chunk stream, reassembling events
/// split across transport frames.
pub fn chunk_stream<B, E>(bytes: B) -> impl Stream<Item = Result<TextChunk, ProviderError>>
where
    B: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    struct State<B> {
        bytes: B,
        buffer: Vec<u8>,
        finished: bool,
    }

    futures::stream::unfold(
        State {
            bytes,
            buffer: Vec::new(),
            finished: false,
        },
        |mut state| async move {
            if state.finished {
                return None;
            }

            loop {
                if let Some(pos) = state.buffer.iter().position(|&b| b == b'\n') {
                    let line_bytes: Vec<u8> = state.buffer.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line_bytes).into_owned();
                    match parse_line(&line) {
                        Ok(LineOutcome::Skip) => continue,
                        Ok(LineOutcome::Chunk(chunk)) => return Some((Ok(chunk), state)),
                        Ok(LineOutcome::End) => {
                            state.finished = true;
                            return None;
                        }
                        Err(e) => {
                            state.finished = true;
                            return Some((Err(e), state));
                        }
                    }
                }

                match state.bytes.next().await {
                    Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                    Some(Err(e)) => {
                        state.finished = true;
                        return Some((Err(ProviderError::Network(e.to_string())), state));
                    }
                    None => {
                        state.finished = true;
                        let trailing = String::from_utf8_lossy(&state.buffer).into_owned();
                        return match parse_line(&trailing) {
                            Ok(LineOutcome::Chunk(chunk)) => Some((Ok(chunk), state)),
                            Ok(LineOutcome::Skip) | Ok(LineOutcome::End) => None,
                            Err(e) => Some((Err(e), state)),
                        };
                    }
                }
            }
        },
    )
}
