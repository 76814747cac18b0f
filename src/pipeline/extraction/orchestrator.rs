use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::types::{PageRecognition, PageRenderer, TextRecognizer};
use super::ExtractionError;

/// Render and recognize every page of a document in parallel.
///
/// One blocking task per page runs on the tokio blocking pool; all of them
/// are joined before returning. Each result lands in the slot of its page
/// index, so the output is in page order whatever the completion order. A page
/// that fails to render or recognize, or whose task panics, keeps an empty
/// slot. Only a failure to open the document (page count) is an error.
pub async fn recognize_pages(
    renderer: Arc<dyn PageRenderer>,
    recognizer: Arc<dyn TextRecognizer>,
) -> Result<Vec<PageRecognition>, ExtractionError> {
    let page_count = renderer.page_count()?;
    tracing::info!(page_count, "Starting page recognition");

    let mut slots: Vec<PageRecognition> = (0..page_count).map(PageRecognition::empty).collect();
    let mut tasks = JoinSet::new();
    let mut task_pages = HashMap::with_capacity(page_count);

    for page_index in 0..page_count {
        let renderer = Arc::clone(&renderer);
        let recognizer = Arc::clone(&recognizer);
        let handle = tasks.spawn_blocking(move || {
            recognize_page(renderer.as_ref(), recognizer.as_ref(), page_index)
        });
        task_pages.insert(handle.id(), page_index);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, Ok(page))) => {
                if let Some(slot) = task_pages.get(&id).and_then(|&i| slots.get_mut(i)) {
                    *slot = page;
                }
            }
            Ok((id, Err(e))) => {
                tracing::warn!(page = ?task_pages.get(&id), error = %e, "Page skipped");
            }
            Err(e) => {
                tracing::warn!(
                    page = ?task_pages.get(&e.id()),
                    error = %e,
                    "Page task panicked, skipped"
                );
            }
        }
    }

    let recognized = slots.iter().filter(|s| !s.is_empty()).count();
    tracing::info!(page_count, recognized, "Page recognition complete");

    Ok(slots)
}

fn recognize_page(
    renderer: &dyn PageRenderer,
    recognizer: &dyn TextRecognizer,
    page_index: usize,
) -> Result<PageRecognition, ExtractionError> {
    let image = renderer.render_page(page_index)?;
    let observations = recognizer.recognize(&image)?;
    Ok(PageRecognition {
        page_index,
        width: image.width,
        height: image.height,
        observations,
    })
}
