//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::TitlerError;

/// Wrap a future with a timeout. A zero duration disables the limit.
pub async fn with_timeout<T, E>(
    duration: Duration,
    future: impl Future<Output = Result<T, E>>,
) -> Result<T, E>
where
    E: From<TitlerError>,
{
    if duration.is_zero() {
        return future.await;
    }
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(TitlerError::Timeout(duration.as_millis() as u64).into()),
    }
}
