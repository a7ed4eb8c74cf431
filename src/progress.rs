//! Fake processing run: walks the four phases on fixed delays.
//!
//! Nothing is computed; the longer stitching delay only makes the run look
//! proportional to work. Once started the run always completes.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::model::{PhaseStatus, ProgressPhase};

/// Delay for every phase except stitching
pub const PHASE_DELAY: Duration = Duration::from_millis(1200);
/// Delay while the stitching phase (index 2) is active
pub const STITCH_DELAY: Duration = Duration::from_millis(2000);
/// Pause after every phase is marked completed
pub const SETTLE_DELAY: Duration = Duration::from_millis(600);

const STITCH_INDEX: usize = 2;

/// Source of suspension points, swapped out in tests.
pub trait Clock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real timers on the tokio runtime
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

fn delay_for(index: usize) -> Duration {
    if index == STITCH_INDEX { STITCH_DELAY } else { PHASE_DELAY }
}

/// Runs the simulation over `phases`, calling `on_update` after every change.
pub async fn simulate<C, F>(clock: &C, phases: &mut [ProgressPhase], mut on_update: F)
where
    C: Clock,
    F: FnMut(&[ProgressPhase]),
{
    for i in 0..phases.len() {
        for (idx, phase) in phases.iter_mut().enumerate() {
            if idx == i {
                phase.status = PhaseStatus::Active;
            } else if idx < i {
                phase.status = PhaseStatus::Completed;
            }
        }
        debug!(phase = phases[i].id, "phase active");
        on_update(phases);
        clock.sleep(delay_for(i)).await;
    }

    for phase in phases.iter_mut() {
        phase.status = PhaseStatus::Completed;
    }
    on_update(phases);
    clock.sleep(SETTLE_DELAY).await;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::initial_phases;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records requested delays and returns immediately.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingClock {
        pub sleeps: Arc<Mutex<Vec<Duration>>>,
    }

    impl Clock for RecordingClock {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
            self.sleeps.lock().push(duration);
            std::future::ready(())
        }
    }

    fn statuses(phases: &[ProgressPhase]) -> Vec<PhaseStatus> {
        phases.iter().map(|p| p.status).collect()
    }

    #[tokio::test]
    async fn delay_schedule_sums_to_6200ms() {
        let clock = RecordingClock::default();
        let mut phases = initial_phases();
        simulate(&clock, &mut phases, |_| {}).await;

        let sleeps = clock.sleeps.lock().clone();
        let ms: Vec<u128> = sleeps.iter().map(|d| d.as_millis()).collect();
        assert_eq!(ms, [1200, 1200, 2000, 1200, 600]);
        assert_eq!(sleeps.iter().sum::<Duration>(), Duration::from_millis(6200));
    }

    #[tokio::test]
    async fn phases_advance_strictly_in_order() {
        use PhaseStatus::*;

        let clock = RecordingClock::default();
        let mut phases = initial_phases();
        let mut snapshots = Vec::new();
        simulate(&clock, &mut phases, |p| snapshots.push(statuses(p))).await;

        assert_eq!(
            snapshots,
            vec![
                vec![Active, Waiting, Waiting, Waiting],
                vec![Completed, Active, Waiting, Waiting],
                vec![Completed, Completed, Active, Waiting],
                vec![Completed, Completed, Completed, Active],
                vec![Completed, Completed, Completed, Completed],
            ]
        );

        // no phase ever moves backwards
        for pair in snapshots.windows(2) {
            assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| a <= b));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn real_clock_takes_exactly_the_schedule() {
        let start = tokio::time::Instant::now();
        let mut phases = initial_phases();
        simulate(&TokioClock, &mut phases, |_| {}).await;
        assert_eq!(start.elapsed(), Duration::from_millis(6200));
        assert!(phases.iter().all(|p| p.status == PhaseStatus::Completed));
    }
}
