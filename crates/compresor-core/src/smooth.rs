//! Linear parameter smoothing.
//!
//! Every compressor parameter owns one [`LinearSmoother`]. A target change
//! starts a ramp of fixed duration (set once at stream preparation); the
//! audio thread pulls one interpolated value per sample with
//! [`advance`](LinearSmoother::advance), which both returns the current
//! value and steps the ramp - a stateful, side-effecting read.

/// A value that ramps linearly toward its target over a fixed number of
/// samples.
///
/// # Example
///
/// ```rust
/// use compresor_core::LinearSmoother;
///
/// let mut gain = LinearSmoother::new(0.0);
/// gain.reset(48000.0, 0.001); // 1 ms ramp = 48 samples
/// gain.set_target(1.0);
///
/// for _ in 0..48 {
///     gain.advance();
/// }
/// assert_eq!(gain.current(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSmoother {
    /// Current interpolated value
    current: f32,
    /// Target value the ramp is heading toward
    target: f32,
    /// Per-sample increment while ramping
    step: f32,
    /// Samples left until the target is reached
    steps_remaining: u32,
    /// Full ramp length in samples, fixed by [`reset`](Self::reset)
    ramp_samples: u32,
}

impl LinearSmoother {
    /// Create a smoother holding `initial` with no ramp configured.
    ///
    /// Until [`reset`](Self::reset) is called, target changes take effect
    /// instantly.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            steps_remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Configure the ramp duration for the given sample rate and snap to
    /// the current target.
    ///
    /// Called at stream preparation; any in-flight ramp is abandoned
    /// because smoothing state does not survive a sample rate change.
    pub fn reset(&mut self, sample_rate: f32, ramp_secs: f32) {
        self.ramp_samples = (ramp_secs * sample_rate) as u32;
        self.current = self.target;
        self.step = 0.0;
        self.steps_remaining = 0;
    }

    /// Start a ramp from the current value toward `target`.
    ///
    /// With no ramp configured (or a zero-length one), the change is
    /// instant. Re-targeting mid-ramp restarts the full ramp duration from
    /// wherever the value currently is.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        if self.ramp_samples == 0 {
            self.current = target;
            self.step = 0.0;
            self.steps_remaining = 0;
        } else {
            self.step = (target - self.current) / self.ramp_samples as f32;
            self.steps_remaining = self.ramp_samples;
        }
    }

    /// Set target and current together, skipping any ramp.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.steps_remaining = 0;
    }

    /// Return the current value and advance the ramp by one sample.
    ///
    /// The final step lands exactly on the target, not within rounding of
    /// it.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.steps_remaining > 0 {
            self.current += self.step;
            self.steps_remaining -= 1;
            if self.steps_remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True while a ramp is in flight.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.steps_remaining > 0
    }
}

impl Default for LinearSmoother {
    fn default() -> Self {
        Self::new(0.0)
    }
}
