//! The per-sample dynamics processing loop.

use compresor_core::{AudioBuffer, ParamId, ParamSet, ParamSnapshot, db_to_linear, squared_to_db};
use libm::powf;
use tracing::debug;

/// Base of the attack/release coefficient formula.
///
/// `(1/e)^(1/(sample_rate * t))` makes `t` directly the ~63%-settling time
/// of the one-pole filter in seconds.
const INVERSE_E: f32 = 1.0 / core::f32::consts::E;

/// Parameter ramp duration. Every smoother interpolates linearly over this
/// span regardless of sample rate.
const PARAM_RAMP_SECS: f32 = 1e-3;

/// Configuration errors reported by [`Compressor::prepare`].
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// Sample rate was zero, negative, or non-finite.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// Maximum block size was zero.
    #[error("invalid maximum block size: {0}")]
    InvalidBlockSize(usize),

    /// Input channel count was zero.
    #[error("invalid input channel count: {0}")]
    InvalidChannelCount(usize),
}

/// Feed-forward compressor with logarithmic level detection.
///
/// Owns the six parameter smoothers and the envelope memory. Call
/// [`prepare`](Self::prepare) before streaming; it sizes the mixdown
/// scratch and resets all state, so [`process_block`](Self::process_block)
/// never allocates.
#[derive(Debug, Clone)]
pub struct Compressor {
    params: ParamSet,
    /// One-pole envelope memory: last smoothed gain reduction in dB.
    /// Persists across blocks; always >= 0.
    prev_gain_reduction_db: f32,
    inverse_sample_rate: f32,
    sample_rate: f32,
    max_block_size: usize,
    input_channels: usize,
    /// Mono detector scratch, cleared and refilled every block.
    mixdown: Vec<f32>,
}

impl Compressor {
    /// Create a compressor with every parameter at its default.
    ///
    /// Unusable for audio until [`prepare`](Self::prepare) is called.
    pub fn new() -> Self {
        Self {
            params: ParamSet::new(),
            prev_gain_reduction_db: 0.0,
            inverse_sample_rate: 0.0,
            sample_rate: 0.0,
            max_block_size: 0,
            input_channels: 0,
            mixdown: Vec::new(),
        }
    }

    /// Configure for a stream: sample rate, largest block, and the number
    /// of input channels the detector averages over.
    ///
    /// Resets every parameter ramp to [`PARAM_RAMP_SECS`] at the new rate,
    /// zeroes the envelope memory, and allocates the mixdown scratch.
    /// Runs on a non-real-time thread; may allocate.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        input_channels: usize,
    ) -> Result<(), PrepareError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(PrepareError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(PrepareError::InvalidBlockSize(max_block_size));
        }
        if input_channels == 0 {
            return Err(PrepareError::InvalidChannelCount(input_channels));
        }

        self.params.reset(sample_rate, PARAM_RAMP_SECS);
        self.prev_gain_reduction_db = 0.0;
        self.sample_rate = sample_rate;
        self.inverse_sample_rate = 1.0 / sample_rate;
        self.max_block_size = max_block_size;
        self.input_channels = input_channels;
        self.mixdown = vec![0.0; max_block_size];

        debug!(sample_rate, max_block_size, input_channels, "compressor prepared");
        Ok(())
    }

    /// Process a block in place.
    ///
    /// `buffer` must have at least the prepared input channel count and no
    /// more than the prepared maximum frames. Channels beyond the input
    /// count are cleared to silence (mono-in/stereo-out layouts).
    pub fn process_block(&mut self, buffer: &mut AudioBuffer) {
        self.run_block(buffer, None);
    }

    /// Process a block in place and record the per-channel gain reduction.
    ///
    /// `reduction` must match `buffer`'s shape. Each sample receives
    /// `old - new` where the control gain attenuated the signal, and 0
    /// where it did not (makeup-driven boosts are not reported as
    /// reduction). Bypassed blocks record all zeros.
    pub fn process_block_tapped(&mut self, buffer: &mut AudioBuffer, reduction: &mut AudioBuffer) {
        debug_assert_eq!(buffer.frames(), reduction.frames(), "tap shape mismatch");
        debug_assert_eq!(buffer.channels(), reduction.channels(), "tap shape mismatch");
        self.run_block(buffer, Some(reduction));
    }

    fn run_block(&mut self, buffer: &mut AudioBuffer, mut tap: Option<&mut AudioBuffer>) {
        let frames = buffer.frames();
        let channels = self.input_channels;
        debug_assert!(frames <= self.max_block_size, "block exceeds prepared size");
        debug_assert!(buffer.channels() >= channels, "buffer narrower than prepared");

        // Bypass is decided from the target, not the smoothed value, so a
        // toggle takes effect at the next block boundary.
        if self.params.bypass_target() {
            if let Some(reduction) = tap.as_deref_mut() {
                reduction.clear();
            }
            // The dynamics smoothers keep advancing so parameters changed
            // while bypassed are settled when bypass is released.
            for _ in 0..frames {
                self.params.advance_threshold_db();
                self.params.advance_ratio();
                self.params.advance_attack_secs();
                self.params.advance_release_secs();
                self.params.advance_makeup_db();
            }
            Self::clear_trailing_channels(buffer, channels);
            return;
        }

        // Detector input: arithmetic mean of the input channels. One gain
        // value per frame drives every channel.
        let mixdown = &mut self.mixdown[..frames];
        mixdown.fill(0.0);
        let channel_gain = 1.0 / channels as f32;
        for ch in 0..channels {
            for (mix, &sample) in mixdown.iter_mut().zip(buffer.channel(ch)) {
                *mix += sample * channel_gain;
            }
        }

        for frame in 0..frames {
            // Each pull returns the interpolated value and advances that
            // parameter's ramp by one sample.
            let threshold = self.params.advance_threshold_db();
            let ratio = self.params.advance_ratio();
            let attack_secs = self.params.advance_attack_secs();
            let alpha_attack = self.coefficient(attack_secs);
            let release_secs = self.params.advance_release_secs();
            let alpha_release = self.coefficient(release_secs);
            let makeup = self.params.advance_makeup_db();

            // Square to discard sign; factor-10 conversion because the
            // level is already squared.
            let sample = self.mixdown[frame];
            let level_db = squared_to_db(sample * sample);

            // Knee-free gain computer in the log domain.
            let compressed_db = if level_db < threshold {
                level_db
            } else {
                threshold + (level_db - threshold) / ratio
            };

            // Requested reduction, smoothed with the attack coefficient
            // while rising and the release coefficient otherwise.
            let requested = level_db - compressed_db;
            let smoothed = if requested > self.prev_gain_reduction_db {
                alpha_attack * self.prev_gain_reduction_db + (1.0 - alpha_attack) * requested
            } else {
                alpha_release * self.prev_gain_reduction_db + (1.0 - alpha_release) * requested
            };
            self.prev_gain_reduction_db = smoothed;

            let control = db_to_linear(makeup - smoothed);

            for ch in 0..channels {
                let samples = buffer.channel_mut(ch);
                let old = samples[frame];
                let new = old * control;
                samples[frame] = new;
                if let Some(reduction) = tap.as_deref_mut() {
                    reduction.channel_mut(ch)[frame] =
                        if control < 1.0 { old - new } else { 0.0 };
                }
            }
        }

        Self::clear_trailing_channels(buffer, channels);
    }

    /// One-pole coefficient from a time constant in seconds.
    ///
    /// A zero time yields 0: the filter reacts instantly, no memory.
    #[inline]
    fn coefficient(&self, time_secs: f32) -> f32 {
        if time_secs == 0.0 {
            0.0
        } else {
            powf(INVERSE_E, self.inverse_sample_rate / time_secs)
        }
    }

    fn clear_trailing_channels(buffer: &mut AudioBuffer, input_channels: usize) {
        for ch in input_channels..buffer.channels() {
            buffer.clear_channel(ch);
        }
    }

    /// Last smoothed gain reduction in dB (always >= 0).
    ///
    /// 0.0 means no compression; 6.0 means the signal is currently
    /// attenuated by 6 dB before makeup gain.
    pub fn gain_reduction_db(&self) -> f32 {
        self.prev_gain_reduction_db
    }

    /// Set threshold in dB.
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.params.set_target(ParamId::Threshold, threshold_db);
    }

    /// Set compression ratio.
    pub fn set_ratio(&mut self, ratio: f32) {
        self.params.set_target(ParamId::Ratio, ratio);
    }

    /// Set attack time in milliseconds.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.params.set_target(ParamId::Attack, attack_ms);
    }

    /// Set release time in milliseconds.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.params.set_target(ParamId::Release, release_ms);
    }

    /// Set makeup gain in dB.
    pub fn set_makeup_gain_db(&mut self, gain_db: f32) {
        self.params.set_target(ParamId::MakeupGain, gain_db);
    }

    /// Set the bypass flag.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.params.set_bypass(bypass);
    }

    /// Set any parameter's target by id, clamped to its range.
    pub fn set_param(&mut self, id: ParamId, value: f32) {
        self.params.set_target(id, value);
    }

    /// A parameter's current target, in display units.
    pub fn param_target(&self, id: ParamId) -> f32 {
        self.params.target(id)
    }

    /// Serializable snapshot of every parameter target.
    pub fn snapshot(&self) -> ParamSnapshot {
        self.params.snapshot()
    }

    /// Restore parameter targets from a snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &ParamSnapshot) {
        self.params.apply_snapshot(snapshot);
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}
