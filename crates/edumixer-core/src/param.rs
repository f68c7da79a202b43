//! One-pole parameter smoothing.
//!
//! Backends receive new targets at tick rate (around 60 Hz) but render at
//! audio rate. [`SmoothedParam`] glides between targets so level changes do
//! not step audibly.
//!
//! ```rust
//! use edumixer_core::SmoothedParam;
//!
//! let mut volume = SmoothedParam::with_config(0.0, 48_000.0, 50.0);
//! volume.set_target(1.0);
//! // After one time constant the glide has covered ~63% of the distance.
//! for _ in 0..2_400 {
//!     volume.advance();
//! }
//! assert!((volume.get() - 0.632).abs() < 0.01);
//! ```

use libm::expf;

/// A value that approaches its target with exponential decay.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    /// Per-sample step fraction; 1.0 means instant.
    coeff: f32,
    sample_rate: f32,
    time_constant_ms: f32,
}

impl SmoothedParam {
    /// Creates an unsmoothed parameter at `initial`.
    ///
    /// Call [`set_sample_rate`](Self::set_sample_rate) and
    /// [`set_time_constant_ms`](Self::set_time_constant_ms) to enable
    /// smoothing.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 48_000.0,
            time_constant_ms: 0.0,
        }
    }

    /// Creates a parameter with sample rate and time constant set.
    pub fn with_config(initial: f32, sample_rate: f32, time_constant_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.time_constant_ms = time_constant_ms;
        param.recalculate_coeff();
        param
    }

    /// Sets the value to glide towards.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jumps to `value` with no glide.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Updates the sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Updates the time constant (time to cover 63.2% of a step).
    pub fn set_time_constant_ms(&mut self, time_ms: f32) {
        self.time_constant_ms = time_ms;
        self.recalculate_coeff();
    }

    /// Advances one sample and returns the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the glide is within 1e-6 of the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Finishes the glide immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    // coeff = 1 - exp(-1 / (tau · fs))
    fn recalculate_coeff(&mut self) {
        if self.time_constant_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.time_constant_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
