//! Adapter from completion chunks to agent events

use super::types::OrchestrationEvent;
use crate::error::{Error, Result};
use futures::stream::{self, BoxStream, StreamExt};
use maestro_llm::CompletionStream;

/// Turn streamed completion chunks into `token` events closed by `complete`.
///
/// A failing chunk is yielded as `Err` and ends the stream; no `complete`
/// follows it. Empty chunks are skipped.
pub fn token_events(
    chunks: CompletionStream,
    session_id: String,
) -> BoxStream<'static, Result<OrchestrationEvent>> {
    stream::unfold(Some(chunks), move |state| {
        let session_id = session_id.clone();
        async move {
            let Some(mut chunks) = state else {
                return None;
            };
            loop {
                match chunks.next().await {
                    Some(Ok(text)) if text.is_empty() => continue,
                    Some(Ok(text)) => {
                        return Some((Ok(OrchestrationEvent::token(text)), Some(chunks)));
                    }
                    Some(Err(e)) => return Some((Err(Error::Llm(e)), None)),
                    None => return Some((Ok(OrchestrationEvent::complete(session_id)), None)),
                }
            }
        }
    })
    .boxed()
}
