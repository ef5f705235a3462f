//! Periodic triggers driving the game
//!
//! A [`Trigger`] is a cancellable periodic timer on the tokio clock. It is
//! plain data until awaited, so a session can own and arm its triggers
//! without running inside a runtime; only [`Trigger::fired`] needs one.

use std::future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Shortest period a trigger accepts; shorter periods are raised to this
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// One periodic, cancellable trigger
#[derive(Debug, Clone)]
pub struct Trigger {
    period: Duration,
    next_fire: Option<Instant>,
}

impl Trigger {
    /// A stopped trigger with the given period (at least [`MIN_PERIOD`])
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next_fire: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm the trigger; the first firing is one period from now.
    /// Re-arming a running trigger restarts its phase.
    pub fn start(&mut self) {
        self.next_fire = Some(Instant::now() + self.period);
    }

    /// Disarm the trigger. Stopping a stopped trigger is a no-op.
    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Wait for the next firing.
    ///
    /// Never completes while stopped. Cancel-safe: if the future is dropped
    /// before completing, the pending firing is kept.
    pub async fn fired(&mut self) {
        match self.next_fire {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.next_fire = Some(next_after(deadline, Instant::now(), self.period));
            }
            None => future::pending::<()>().await,
        }
    }
}

/// The first firing strictly after `now`, keeping the phase of `deadline`.
/// Missed firings are skipped rather than replayed in a burst.
fn next_after(deadline: Instant, now: Instant, period: Duration) -> Instant {
    let behind = now.saturating_duration_since(deadline).as_nanos();
    let into_period = behind % period.as_nanos();
    let into_period = Duration::from_nanos(u64::try_from(into_period).unwrap_or(u64::MAX));
    now + period.saturating_sub(into_period)
}

/// Which trigger fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Advance the snake one cell
    Move,
    /// One second of play elapsed
    Time,
}

/// The movement and elapsed-time triggers, started and stopped together
#[derive(Debug, Clone)]
pub struct GameClock {
    movement: Trigger,
    time: Trigger,
}

impl GameClock {
    pub fn new(move_period: Duration, time_period: Duration) -> Self {
        Self {
            movement: Trigger::new(move_period),
            time: Trigger::new(time_period),
        }
    }

    pub fn start(&mut self) {
        self.movement.start();
        self.time.start();
    }

    pub fn stop(&mut self) {
        self.movement.stop();
        self.time.stop();
    }

    pub fn movement(&self) -> &Trigger {
        &self.movement
    }

    pub fn time(&self) -> &Trigger {
        &self.time
    }

    pub fn is_running(&self) -> bool {
        self.movement.is_running() || self.time.is_running()
    }

    /// Wait for whichever trigger fires next. Pending forever when stopped.
    pub async fn next_tick(&mut self) -> Tick {
        tokio::select! {
            _ = self.movement.fired() => Tick::Move,
            _ = self.time.fired() => Tick::Time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[test]
    fn test_stop_is_idempotent() {
        let mut trigger = Trigger::new(Duration::from_millis(300));
        assert!(!trigger.is_running());

        trigger.stop();
        trigger.stop();
        assert!(!trigger.is_running());

        trigger.start();
        assert!(trigger.is_running());
        trigger.stop();
        trigger.stop();
        assert!(!trigger.is_running());
    }

    #[test]
    fn test_clock_starts_and_stops_both() {
        let mut clock = GameClock::new(Duration::from_millis(300), Duration::from_secs(1));
        clock.start();
        assert!(clock.movement().is_running());
        assert!(clock.time().is_running());

        clock.stop();
        assert!(!clock.movement().is_running());
        assert!(!clock.time().is_running());
        assert!(!clock.is_running());
    }

    #[test]
    fn test_zero_period_is_raised() {
        let trigger = Trigger::new(Duration::ZERO);
        assert_eq!(trigger.period(), MIN_PERIOD);
    }

    #[test]
    fn test_next_after_keeps_phase() {
        let start = Instant::now();
        let period = Duration::from_millis(100);

        let on_time = next_after(start, start, period);
        assert_eq!(on_time, start + period);

        let late = next_after(start, start + Duration::from_millis(250), period);
        assert_eq!(late, start + Duration::from_millis(300));

        let exact = next_after(start, start + Duration::from_millis(200), period);
        assert_eq!(exact, start + Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_clock_still_ticks() {
        let mut clock = GameClock::new(Duration::ZERO, Duration::ZERO);
        clock.start();

        for _ in 0..10 {
            let tick = timeout(Duration::from_secs(1), clock.next_tick()).await;
            assert!(tick.is_ok());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_fires_each_period() {
        let mut trigger = Trigger::new(Duration::from_millis(300));
        let started = Instant::now();
        trigger.start();

        trigger.fired().await;
        assert_eq!(started.elapsed(), Duration::from_millis(300));

        trigger.fired().await;
        assert_eq!(started.elapsed(), Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_trigger_never_fires() {
        let mut trigger = Trigger::new(Duration::from_millis(300));
        trigger.start();
        trigger.stop();

        let result = timeout(Duration::from_secs(5), trigger.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_firings_are_skipped() {
        let mut trigger = Trigger::new(Duration::from_millis(100));
        let started = Instant::now();
        trigger.start();

        advance(Duration::from_millis(350)).await;
        trigger.fired().await;
        trigger.fired().await;
        assert_eq!(started.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_interleaves_ticks() {
        let mut clock = GameClock::new(Duration::from_millis(300), Duration::from_millis(1000));
        clock.start();

        let mut moves = 0;
        let mut seconds = 0;
        let started = Instant::now();
        while started.elapsed() < Duration::from_millis(2000) {
            match clock.next_tick().await {
                Tick::Move => moves += 1,
                Tick::Time => seconds += 1,
            }
        }

        assert_eq!(seconds, 2);
        assert_eq!(moves, 6);
    }
}
