//! Retry countdown timer
//!
//! When a rate-limit classification carries a server-advised delay, the
//! caller arms this countdown so the UI can show remaining seconds and
//! auto-clear the error surface when the wait is over. Single instance:
//! arming replaces any in-flight countdown, and the tick task is released
//! whenever the countdown reaches zero or is dismissed.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Observable countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// No countdown running; any associated error surface is dismissed
    Idle,
    /// Seconds remaining (always > 0)
    Counting(u64),
}

impl CountdownState {
    pub fn seconds_remaining(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Counting(n) => Some(*n),
        }
    }
}

/// One-second tick countdown with a watch-channel observer
pub struct RetryCountdown {
    tx: watch::Sender<CountdownState>,
    tick_task: Option<JoinHandle<()>>,
}

impl RetryCountdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CountdownState::Idle);
        Self {
            tx,
            tick_task: None,
        }
    }

    /// Start (or restart) a countdown of `seconds`. Arming with 0 is a no-op:
    /// the only valid transition out of Idle is to a positive count.
    pub fn arm(&mut self, seconds: u64) {
        if seconds == 0 {
            return;
        }

        self.release_tick_task();
        self.tx.send_replace(CountdownState::Counting(seconds));
        tracing::debug!("[Countdown] Armed for {}s", seconds);

        let tx = self.tx.clone();
        self.tick_task = Some(tokio::spawn(async move {
            let mut remaining = seconds;
            while remaining > 0 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                remaining -= 1;
                let next = if remaining == 0 {
                    CountdownState::Idle
                } else {
                    CountdownState::Counting(remaining)
                };
                // Receiver may be gone; the countdown still runs to completion
                tx.send_replace(next);
            }
        }));
    }

    /// External dismissal: force Idle immediately regardless of remaining time
    pub fn dismiss(&mut self) {
        self.release_tick_task();
        self.tx.send_replace(CountdownState::Idle);
    }

    pub fn state(&self) -> CountdownState {
        *self.tx.borrow()
    }

    /// Subscribe to state changes (for rendering remaining seconds)
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.tx.subscribe()
    }

    fn release_tick_task(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }
}

impl Default for RetryCountdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RetryCountdown {
    fn drop(&mut self) {
        self.release_tick_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_idle() {
        let mut countdown = RetryCountdown::new();
        let mut rx = countdown.subscribe();

        countdown.arm(3);
        assert_eq!(*rx.borrow_and_update(), CountdownState::Counting(3));

        let mut observed = Vec::new();
        while rx.changed().await.is_ok() {
            let state = *rx.borrow_and_update();
            observed.push(state);
            if state == CountdownState::Idle {
                break;
            }
        }

        assert_eq!(
            observed,
            vec![
                CountdownState::Counting(2),
                CountdownState::Counting(1),
                CountdownState::Idle,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_forces_idle() {
        let mut countdown = RetryCountdown::new();
        countdown.arm(60);
        assert_eq!(countdown.state(), CountdownState::Counting(60));

        countdown.dismiss();
        assert_eq!(countdown.state(), CountdownState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_in_flight_countdown() {
        let mut countdown = RetryCountdown::new();
        countdown.arm(60);
        countdown.arm(2);
        assert_eq!(countdown.state(), CountdownState::Counting(2));

        let mut rx = countdown.subscribe();
        rx.mark_unchanged();
        while rx.changed().await.is_ok() {
            if *rx.borrow_and_update() == CountdownState::Idle {
                break;
            }
        }
        assert_eq!(countdown.state(), CountdownState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_zero_is_noop() {
        let mut countdown = RetryCountdown::new();
        countdown.arm(0);
        assert_eq!(countdown.state(), CountdownState::Idle);
    }
}
