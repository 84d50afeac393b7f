//! Read Retries
//!
//! Bounded exponential backoff for idempotent reads. Mutations never go
//! through here: a failed write must surface at once so the caller can roll back.

use std::future::Future;

use crate::config::RetryPolicy;
use crate::error::ApiResult;

/// Run `op` until it succeeds, fails permanently, or retries run out
pub async fn retry_read<T, F, Fut>(policy: RetryPolicy, mut op: F) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                let delay = policy.delay_ms(attempt);
                log::warn!(
                    "[API] read failed (attempt {}/{}): {}; retrying in {}ms",
                    attempt + 1,
                    policy.max_retries + 1,
                    err,
                    delay
                );
                sleep_ms(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn sleep_ms(ms: u32) {
    if ms > 0 {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
