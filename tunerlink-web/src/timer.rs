use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;
use tunerlink_core::Scheduler;

/// [`Scheduler`] backed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

#[async_trait(?Send)]
impl Scheduler for GlooScheduler {
    async fn sleep(&self, period: Duration) {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}
