use futures_util::{stream, Stream, TryStreamExt};
use tracing::debug;
use crate::domain::{error::MoverError, models::ObjectSummary, ports::ObjectStore};

/// Lazily walks every page of a prefix listing. The next page is only requested once the
/// objects of the previous one have been consumed, and the stream ends after the first error.
pub fn list_objects<'a>(
    store: &'a dyn ObjectStore,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = Result<ObjectSummary, MoverError>> + Send + 'a {
    // None: exhausted. Some(token): fetch the page starting at token.
    let start: Option<Option<String>> = Some(None);

    stream::try_unfold((start, 0usize), move |(state, page_no)| async move {
        let Some(token) = state else {
            return Ok::<_, MoverError>(None);
        };

        let page = store.list_page(bucket, prefix, token).await?;
        debug!(
            "Listed page {} of s3://{}/{}: {} objects, more pages: {}",
            page_no + 1,
            bucket,
            prefix,
            page.objects.len(),
            page.next_continuation_token.is_some()
        );

        let next = page.next_continuation_token.map(Some);
        Ok(Some((page.objects, (next, page_no + 1))))
    })
    .map_ok(|objects| stream::iter(objects.into_iter().map(Ok)))
    .try_flatten()
}
