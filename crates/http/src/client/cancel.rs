//! Cancellation for page-level fetches

use super::ClientError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run `fut` until it completes or `token` is cancelled
///
/// A cancelled call resolves to [`ClientError::Cancelled`] and its result is
/// never observed.
pub async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(ClientError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancelled_token_wins() {
        let token = CancellationToken::new();
        token.cancel();

        let result = cancellable(&token, async { Ok::<_, ClientError>(1) }).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let result = cancellable(&token, async { Ok::<_, ClientError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
