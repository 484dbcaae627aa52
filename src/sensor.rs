//! Live sensor trace, advanced on its own timer.
//!
//! The series shares nothing with the thermal pipeline. A [`SensorFeed`]
//! owns a background thread that ticks the series at a fixed interval until
//! it is stopped or dropped.

use std::collections::VecDeque;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{Result, SensorError};

/// Samples kept on screen.
pub const DEFAULT_WINDOW: usize = 60;

/// Initial spread of the measured trace around the simulated one.
const INITIAL_SPREAD: f64 = 5.0;
/// Random-walk step bound per tick.
const MAX_DRIFT: f64 = 6.0;

/// Simulated probe reading at time `t`.
#[allow(clippy::cast_precision_loss)]
fn simulated_reading(t: u64) -> f64 {
    1150.0 + 30.0 * (t as f64 / 9.0).sin()
}

/// Copy of the current window, ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub times: Vec<u64>,
    pub simulated: Vec<f64>,
    pub measured: Vec<f64>,
}

/// A sliding window of simulated and measured temperatures.
#[derive(Debug, Clone)]
pub struct SensorSeries {
    times: VecDeque<u64>,
    simulated: VecDeque<f64>,
    measured: VecDeque<f64>,
    rng: StdRng,
}

impl SensorSeries {
    /// Fills a window of `window` samples.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::EmptyWindow`] if `window` is zero.
    pub fn new(window: usize, seed: Option<u64>) -> Result<Self> {
        if window == 0 {
            return Err(SensorError::EmptyWindow.into());
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let times: VecDeque<u64> = (0..window as u64).collect();
        let simulated: VecDeque<f64> = times.iter().map(|&t| simulated_reading(t)).collect();
        let measured = simulated
            .iter()
            .map(|&s| s + rng.gen_range(-INITIAL_SPREAD..=INITIAL_SPREAD))
            .collect();
        Ok(Self {
            times,
            simulated,
            measured,
            rng,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Slides the window by one tick. The simulated trace holds its last
    /// value; the measured trace takes a random-walk step.
    pub fn advance(&mut self) {
        let (Some(&t), Some(&sim), Some(&measured)) =
            (self.times.back(), self.simulated.back(), self.measured.back())
        else {
            return;
        };
        let drift = self.rng.gen_range(-MAX_DRIFT..=MAX_DRIFT);

        self.times.pop_front();
        self.simulated.pop_front();
        self.measured.pop_front();
        self.times.push_back(t + 1);
        self.simulated.push_back(sim);
        self.measured.push_back(measured + drift);
    }

    #[must_use]
    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            times: self.times.iter().copied().collect(),
            simulated: self.simulated.iter().copied().collect(),
            measured: self.measured.iter().copied().collect(),
        }
    }
}

/// Ticks a [`SensorSeries`] on a background thread.
#[derive(Debug)]
pub struct SensorFeed {
    series: Arc<Mutex<SensorSeries>>,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl SensorFeed {
    /// Starts ticking `series` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::ZeroInterval`] if `interval` is zero.
    pub fn start(series: SensorSeries, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(SensorError::ZeroInterval.into());
        }
        let series = Arc::new(Mutex::new(series));
        let (stop, stopped) = mpsc::channel::<()>();
        let shared = Arc::clone(&series);
        let worker = std::thread::spawn(move || loop {
            match stopped.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .advance(),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        tracing::debug!(?interval, "started sensor feed");
        Ok(Self {
            series,
            stop: Some(stop),
            worker: Some(worker),
        })
    }

    /// Copy of the current window.
    #[must_use]
    pub fn snapshot(&self) -> SensorSnapshot {
        self.series
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Stops the ticking thread and waits for it. Idempotent.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The worker may already have exited.
            let _ = stop.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("sensor feed thread panicked");
            }
        }
    }
}

impl Drop for SensorFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_window_is_rejected() {
        assert!(SensorSeries::new(0, Some(1)).is_err());
    }

    #[test]
    fn initial_window_follows_simulation() {
        let series = SensorSeries::new(DEFAULT_WINDOW, Some(3)).unwrap();
        let snap = series.snapshot();
        assert_eq!(snap.times, (0..60).collect::<Vec<u64>>());
        assert_relative_eq!(snap.simulated[0], 1150.0);
        for (s, m) in snap.simulated.iter().zip(&snap.measured) {
            assert!((s - m).abs() <= INITIAL_SPREAD);
        }
    }

    #[test]
    fn advance_slides_window() {
        let mut series = SensorSeries::new(DEFAULT_WINDOW, Some(3)).unwrap();
        let before = series.snapshot();
        series.advance();
        let after = series.snapshot();

        assert_eq!(series.len(), DEFAULT_WINDOW);
        assert_eq!(after.times[0], 1);
        assert_eq!(after.times[59], 60);
        assert_relative_eq!(after.simulated[59], before.simulated[59]);
        assert_eq!(after.measured[..59], before.measured[1..]);
        assert!((after.measured[59] - before.measured[59]).abs() <= MAX_DRIFT);
    }

    #[test]
    fn seeded_series_is_reproducible() {
        let mut a = SensorSeries::new(10, Some(11)).unwrap();
        let mut b = SensorSeries::new(10, Some(11)).unwrap();
        for _ in 0..5 {
            a.advance();
            b.advance();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let series = SensorSeries::new(4, Some(1)).unwrap();
        assert!(SensorFeed::start(series, Duration::ZERO).is_err());
    }

    #[test]
    fn feed_ticks_until_stopped() {
        let series = SensorSeries::new(8, Some(2)).unwrap();
        let mut feed = SensorFeed::start(series, Duration::from_millis(2)).unwrap();
        std::thread::sleep(Duration::from_millis(60));
        feed.stop();
        let stopped = feed.snapshot();
        assert!(stopped.times[7] > 7);

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(feed.snapshot(), stopped);
        feed.stop();
    }
}
