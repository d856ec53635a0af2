//! Epoch cycle arithmetic: progress, epoch number and sector index.

/// Default epoch length (24 hours).
pub const DEFAULT_EPOCH_SECONDS: f64 = 24.0 * 60.0 * 60.0;

/// Default number of orbit sectors.
pub const DEFAULT_SECTORS: u32 = 90;

/// A repeating period split into equal sectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    period_secs: f64,
    sectors: u32,
}

impl Default for Cycle {
    fn default() -> Self {
        Self::new(DEFAULT_EPOCH_SECONDS, DEFAULT_SECTORS)
    }
}

impl Cycle {
    /// Create a cycle. Non-positive periods fall back to the default and
    /// zero sectors become one.
    pub fn new(period_secs: f64, sectors: u32) -> Self {
        let period_secs = if period_secs.is_finite() && period_secs > 0.0 {
            period_secs
        } else {
            DEFAULT_EPOCH_SECONDS
        };
        Self {
            period_secs,
            sectors: sectors.max(1),
        }
    }

    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }

    pub fn sectors(&self) -> u32 {
        self.sectors
    }

    /// Fraction of the current epoch elapsed at time `t`, always in `[0, 1)`.
    pub fn progress(&self, t: f64) -> f64 {
        let p = t.rem_euclid(self.period_secs) / self.period_secs;
        // rem_euclid may round up to the divisor itself
        if p >= 1.0 || p.is_nan() { 0.0 } else { p }
    }

    /// Number of whole periods elapsed since the time origin.
    pub fn epoch(&self, t: f64) -> i64 {
        (t / self.period_secs).floor() as i64
    }

    /// Zero-based sector index for a progress value, in `0..sectors`.
    pub fn sector(&self, progress: f64) -> u32 {
        let raw = (progress * self.sectors as f64).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as u32).min(self.sectors - 1)
        }
    }

    /// Overlay values for time `t`.
    pub fn readout(&self, t: f64) -> HudReadout {
        let progress = self.progress(t);
        HudReadout {
            epoch: self.epoch(t),
            sector: self.sector(progress),
            sectors: self.sectors,
            percent: (progress * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Values shown by the HUD for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout {
    /// Whole epochs elapsed.
    pub epoch: i64,
    /// Zero-based sector index.
    pub sector: u32,
    /// Total sector count.
    pub sectors: u32,
    /// Progress through the epoch as a percentage in `[0, 100]`.
    pub percent: f64,
}

impl HudReadout {
    pub fn epoch_label(&self) -> String {
        self.epoch.to_string()
    }

    /// One-based sector label, e.g. `"46 / 90"`.
    pub fn sector_label(&self) -> String {
        format!("{} / {}", self.sector + 1, self.sectors)
    }

    /// Bar fill as a ratio in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }
}
