//! Timeout guard for driven-port calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::Error;

/// Await `call`, failing with [`Error::service_unavailable`] once `limit`
/// elapses. The call's own output, successful or not, is returned untouched.
pub(crate) async fn with_deadline<Fut>(
    limit: Duration,
    operation: &'static str,
    call: Fut,
) -> Result<Fut::Output, Error>
where
    Fut: Future,
{
    tokio::time::timeout(limit, call).await.map_err(|_| {
        warn!(
            operation,
            timeout_ms = limit.as_millis() as u64,
            "storage call timed out"
        );
        Error::service_unavailable("storage did not respond in time")
    })
}
