use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ui;

/// Run `render` once, or every `every` until Ctrl-C when `watch` is set.
///
/// A failed poll is logged and retried on the next tick; only the first
/// run propagates its error.
pub async fn run_or_watch<F, Fut>(watch: bool, every: Duration, mut render: F) -> anyhow::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    render().await?;
    if !watch {
        return Ok(());
    }

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; the initial render covered it.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::debug!("watch stopped");
                return Ok(());
            }
            _ = interval.tick() => {
                if ui::prefs().watch_banner {
                    println!(
                        "\n-- refreshed {} (every {}s, Ctrl-C to stop) --",
                        chrono::Local::now().format("%H:%M:%S"),
                        every.as_secs()
                    );
                }
                if let Err(error) = render().await {
                    tracing::warn!(error = %format!("{error:#}"), "refresh failed");
                }
            }
        }
    }
}
