use crate::{
    reminders::dispatch_reminders::{DispatchRemindersUseCase, DispatchTrigger},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use coop_reminders_infra::CoopContext;
use std::time::Duration;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Dispatches reminders every `reminders_interval_secs`, starting at the next
/// full minute. A run is awaited before the next tick so runs of one process
/// never overlap.
pub fn start_dispatch_reminders_job(ctx: CoopContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        info!(
            "Reminder job starts in {} seconds and runs every {} seconds",
            secs_to_next_run, ctx.config.reminders_interval_secs
        );
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut dispatch_interval = interval(Duration::from_secs(ctx.config.reminders_interval_secs));
        loop {
            dispatch_interval.tick().await;

            let usecase = DispatchRemindersUseCase {
                trigger: DispatchTrigger::JobScheduler,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
