use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::warning;
use crate::yandex::error::{ApiError, describe_chain, root_cause};

/// Maximum number of attempts for one retried call.
pub const MAX_ERRORS: usize = 3;

/// Runs `operation` with bounded retry and classified backoff.
///
/// Success returns immediately. Failures are classified through
/// [`ApiError`]:
///
/// - `Unauthorized` is terminal and returned at once: a rejected token
///   will not start working on the next attempt.
/// - `Network` failures print a compact root cause on the first attempt
///   and the full chain afterwards, then back off (1s, then 3s).
/// - `BadResponse` failures log the raw payload for diagnostics and back
///   off 3s.
/// - Everything else logs the full chain and backs off 1s.
///
/// After [`MAX_ERRORS`] attempts the last error is returned and the
/// caller decides whether that abandons the track or the whole run.
/// The wrapper keeps no state between calls and is safe to use from
/// several concurrent call sites.
pub async fn retry<T, F, Fut>(mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut last_error = None;
    for attempt in 0..MAX_ERRORS {
        if attempt > 0 {
            println!("RETRYING {attempt}");
        }
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        match &err {
            ApiError::Unauthorized(message) => {
                warning!("Unauthorized: {message}");
                return Err(err);
            }
            ApiError::Network(cause) => {
                if attempt == 0 {
                    println!(" {}", root_cause(cause));
                    sleep(Duration::from_secs(1)).await;
                } else {
                    warning!("{}", describe_chain(&err));
                    sleep(Duration::from_secs(3)).await;
                }
            }
            ApiError::BadResponse { payload, .. } => {
                warning!("malformed response: \"{payload}\"");
                sleep(Duration::from_secs(3)).await;
            }
            _ => {
                warning!("{}", describe_chain(&err));
                sleep(Duration::from_secs(1)).await;
            }
        }
        last_error = Some(err);
    }

    Err(last_error.unwrap_or_else(|| ApiError::Api {
        name: String::from("retry-exhausted"),
        message: String::from("no attempts were made"),
    }))
}
