//! Weekly triggers driven by tokio timers.

pub mod roundup;
pub mod schedule;
pub mod vlog;

use chrono::Local;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::app::AppContext;

pub use roundup::{run_roundup, run_roundup_for};
pub use schedule::WeeklySchedule;
pub use vlog::{VLOG_TOPICS, run_vlog};

/// Spawns the round-up and vlog triggers. Each runs until aborted.
pub fn spawn_triggers(ctx: Arc<AppContext>) -> Vec<JoinHandle<()>> {
    let roundup_ctx = Arc::clone(&ctx);
    let roundup = tokio::spawn(trigger_loop(
        "round-up",
        ctx.config.roundup_schedule,
        move || {
            let ctx = Arc::clone(&roundup_ctx);
            async move {
                run_roundup(&ctx).await;
            }
        },
    ));

    let vlog_ctx = Arc::clone(&ctx);
    let vlog = tokio::spawn(trigger_loop("vlog", ctx.config.vlog_schedule, move || {
        let ctx = Arc::clone(&vlog_ctx);
        async move {
            if let Err(e) = run_vlog(&ctx).await {
                error!("Error generating vlog article: {e}");
            }
        }
    }));

    vec![roundup, vlog]
}

async fn trigger_loop<F, Fut>(name: &'static str, schedule: WeeklySchedule, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Local::now();
        let Some(wait) = schedule.duration_until_next(&now) else {
            warn!("The {name} trigger has no valid next slot ({schedule}); stopping it");
            return;
        };

        info!(
            "Next {name} run at {} (in {}s)",
            (now + chrono::Duration::from_std(wait).unwrap_or_default()).format("%Y-%m-%d %H:%M"),
            wait.as_secs()
        );
        tokio::time::sleep(wait).await;

        info!("Running the {name} trigger");
        job().await;

        // Step past the slot minute before computing the next one
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
