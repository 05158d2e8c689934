use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::domain::user::ports::UserServicePort;

/// Periodically counts registered users and logs the total.
///
/// Failures are logged and the loop keeps going; nothing here touches
/// request handling.
pub struct UserCounter {
    service: Arc<dyn UserServicePort>,
    interval: Duration,
}

impl UserCounter {
    pub fn new(service: Arc<dyn UserServicePort>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Run forever. The first count happens one interval after start.
    pub async fn run(self) {
        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            "Starting user counter"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    pub async fn tick(&self) -> Option<i64> {
        match self.service.count_users().await {
            Ok(count) => {
                tracing::info!(count, "Counted users");
                Some(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to count users");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::domain::user::ports::mocks::MockTestUserService;
    use crate::user::errors::UserError;

    #[tokio::test]
    async fn test_tick_reports_count() {
        let mut service = MockTestUserService::new();
        service.expect_count_users().times(1).returning(|| Ok(3));

        let counter = UserCounter::new(Arc::new(service), Duration::from_secs(10));

        assert_eq!(counter.tick().await, Some(3));
    }

    #[tokio::test]
    async fn test_tick_swallows_errors() {
        let mut service = MockTestUserService::new();
        service
            .expect_count_users()
            .times(1)
            .returning(|| Err(UserError::DatabaseError("down".to_string())));

        let counter = UserCounter::new(Arc::new(service), Duration::from_secs(10));

        assert_eq!(counter.tick().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_counts_on_each_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut service = MockTestUserService::new();
        service.expect_count_users().returning(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });

        let counter = UserCounter::new(Arc::new(service), Duration::from_secs(10));
        let handle = tokio::spawn(counter.run());

        tokio::time::sleep(Duration::from_secs(25)).await;
        handle.abort();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
