//! Streamed response decoding.

use bytes::Bytes;
use futures::{Stream, StreamExt};

use agentrun_protocols::error::ProviderError;
use agentrun_protocols::provider::{TextChunk, UsageSnapshot};

use crate::api::StreamLine;

/// What one decoded line contributes to the chunk stream.
#[derive(Debug)]
pub enum LineOutcome {
    /// Nothing to emit (blank line).
    Skip,
    /// A text fragment.
    Chunk(TextChunk),
    /// The terminal `done: true` line; the stream ends after it.
    Final(TextChunk),
}

/// Decode one NDJSON line.
pub fn parse_line(line: &str) -> Result<LineOutcome, ProviderError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(LineOutcome::Skip);
    }

    let parsed: StreamLine = serde_json::from_str(line)
        .map_err(|e| ProviderError::StreamError(format!("malformed stream line: {e}")))?;

    if let Some(error) = parsed.error {
        return Err(ProviderError::StreamError(error));
    }

    let text = parsed.message.map(|m| m.content).unwrap_or_default();

    if parsed.done {
        let usage = match (parsed.prompt_eval_count, parsed.eval_count) {
            (None, None) => None,
            (prompt, completion) => Some(UsageSnapshot {
                prompt_tokens: prompt.unwrap_or(0),
                completion_tokens: completion.unwrap_or(0),
            }),
        };
        let mut chunk = TextChunk::text(text);
        if let Some(usage) = usage {
            chunk = chunk.with_usage(usage);
        }
        return Ok(LineOutcome::Final(chunk));
    }

    Ok(LineOutcome::Chunk(TextChunk::text(text)))
}

/// Turn a raw byte stream into a chunk stream, reassembling lines that were
/// split across transport frames. Splitting on the newline byte is safe:
/// JSON never contains a raw newline, so every complete line is valid UTF-8.
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
                    let line = match String::from_utf8(line_bytes) {
                        Ok(line) => line,
                        Err(e) => {
                            state.finished = true;
                            return Some((
                                Err(ProviderError::StreamError(format!(
                                    "invalid UTF-8 in stream: {e}"
                                ))),
                                state,
                            ));
                        }
                    };
                    match parse_line(&line) {
                        Ok(LineOutcome::Skip) => continue,
                        Ok(LineOutcome::Chunk(chunk)) => return Some((Ok(chunk), state)),
                        Ok(LineOutcome::Final(chunk)) => {
                            state.finished = true;
                            return Some((Ok(chunk), state));
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
                            Ok(LineOutcome::Skip) => None,
                            Ok(LineOutcome::Chunk(chunk)) | Ok(LineOutcome::Final(chunk)) => {
                                Some((Ok(chunk), state))
                            }
                            Err(e) => Some((Err(e), state)),
                        };
                    }
                }
            }
        },
    )
}
