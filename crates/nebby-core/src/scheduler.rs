//! Frame scheduling: clocks, cancellation and the frame loop.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;

/// Source of simulation time and frame pacing.
pub trait Clock {
    /// Current simulation time in seconds.
    fn now(&self) -> f64;

    /// Real time elapsed since the clock was created, used for pacing.
    fn elapsed(&self) -> Duration;

    /// Block the frame loop for `duration`.
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Wall clock anchored at creation and advanced by a monotonic timer.
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// Unix time in seconds when the clock was created.
    anchor_secs: f64,
    /// Monotonic start instant.
    started: Instant,
    /// Simulation speed relative to real time.
    speed: f64,
}

impl SystemClock {
    pub fn new(speed: f64) -> Self {
        let anchor = Utc::now();
        Self {
            anchor_secs: anchor.timestamp_millis() as f64 / 1000.0,
            started: Instant::now(),
            speed,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.anchor_secs + self.started.elapsed().as_secs_f64() * self.speed
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Virtual clock that only moves when told to. Sleeping advances it.
#[derive(Debug, Default)]
pub struct ManualClock {
    origin_secs: f64,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new(origin_secs: f64) -> Self {
        Self {
            origin_secs,
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward without sleeping.
    pub fn advance(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.origin_secs + self.elapsed.get().as_secs_f64()
    }

    fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Shared stop signal for the frame loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Summary of a finished frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    /// Frames executed.
    pub frames: u64,
    /// Frames that finished after their deadline.
    pub overruns: u64,
}

/// Runs frames back to back at a fixed target rate until cancelled.
#[derive(Debug)]
pub struct FrameScheduler<C: Clock> {
    clock: C,
    token: CancellationToken,
    interval: Duration,
}

impl<C: Clock> FrameScheduler<C> {
    /// Create a scheduler targeting `target_fps` frames per second.
    pub fn new(clock: C, token: CancellationToken, target_fps: u32) -> Self {
        Self {
            clock,
            token,
            interval: Duration::from_secs(1) / target_fps.max(1),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the frame loop.
    ///
    /// `frame` receives the clock reading for the frame. The loop stops when
    /// the token is cancelled or `frame` returns an error. A late frame moves
    /// the schedule forward instead of queuing catch-up frames.
    pub fn run<E, F>(&self, mut frame: F) -> Result<SchedulerReport, E>
    where
        F: FnMut(f64) -> Result<(), E>,
    {
        let mut report = SchedulerReport::default();
        let mut deadline = self.clock.elapsed();
        tracing::debug!(interval = ?self.interval, "frame loop started");

        while !self.token.is_cancelled() {
            frame(self.clock.now())?;
            report.frames += 1;

            if self.token.is_cancelled() {
                break;
            }

            deadline += self.interval;
            let elapsed = self.clock.elapsed();
            if let Some(remaining) = deadline.checked_sub(elapsed)
                && !remaining.is_zero()
            {
                self.clock.sleep(remaining);
            } else {
                report.overruns += 1;
                deadline = elapsed;
            }
        }

        tracing::debug!(
            frames = report.frames,
            overruns = report.overruns,
            "frame loop stopped"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_before_start_runs_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let scheduler = FrameScheduler::new(ManualClock::new(0.0), token, 30);
        let report = scheduler
            .run(|_| -> Result<(), ()> { panic!("frame should not run") })
            .unwrap();
        assert_eq!(report.frames, 0);
    }

    #[test]
    fn test_runs_until_cancelled() {
        let token = CancellationToken::new();
        let scheduler = FrameScheduler::new(ManualClock::new(0.0), token.clone(), 10);
        let mut seen = Vec::new();
        let report = scheduler
            .run(|now| -> Result<(), ()> {
                seen.push(now);
                if seen.len() == 5 {
                    token.cancel();
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(report.frames, 5);
        assert_eq!(report.overruns, 0);
        // 10 fps on a virtual clock: one frame every 100ms
        let expected: Vec<f64> = (0..5).map(|i| i as f64 * 0.1).collect();
        for (a, b) in seen.iter().zip(&expected) {
            assert!((a - b).abs() < 1e-9, "{a} != {b}");
        }
    }

    #[test]
    fn test_frames_are_strictly_increasing_in_time() {
        let token = CancellationToken::new();
        let scheduler = FrameScheduler::new(ManualClock::new(1_000.0), token.clone(), 60);
        let mut last = f64::NEG_INFINITY;
        let mut count = 0;
        scheduler
            .run(|now| -> Result<(), ()> {
                assert!(now > last);
                last = now;
                count += 1;
                if count == 20 {
                    token.cancel();
                }
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_error_stops_loop() {
        let scheduler = FrameScheduler::new(ManualClock::new(0.0), CancellationToken::new(), 30);
        let mut calls = 0;
        let result = scheduler.run(|_| {
            calls += 1;
            if calls == 3 { Err("surface lost") } else { Ok(()) }
        });
        assert_eq!(result, Err("surface lost"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_overrun_reanchors_schedule() {
        let token = CancellationToken::new();
        let scheduler = FrameScheduler::new(ManualClock::new(0.0), token.clone(), 10);
        let mut times = Vec::new();
        let report = scheduler
            .run(|now| -> Result<(), ()> {
                times.push(now);
                if times.len() == 1 {
                    // first frame takes 350ms, three intervals and a half
                    scheduler.clock().advance(Duration::from_millis(350));
                }
                if times.len() == 3 {
                    token.cancel();
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(report.frames, 3);
        assert_eq!(report.overruns, 1);
        // no burst of catch-up frames: the second frame starts right away,
        // the third one interval later
        assert!((times[1] - 0.35).abs() < 1e-9);
        assert!((times[2] - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_interval_from_fps() {
        let scheduler = FrameScheduler::new(ManualClock::default(), CancellationToken::new(), 0);
        assert_eq!(scheduler.interval(), Duration::from_secs(1));
        let scheduler = FrameScheduler::new(ManualClock::default(), CancellationToken::new(), 50);
        assert_eq!(scheduler.interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_system_clock_scaled() {
        let clock = SystemClock::new(1000.0);
        let a = clock.now();
        clock.sleep(Duration::from_millis(5));
        let b = clock.now();
        assert!(b - a >= 5.0);
    }
}
