//! The compressor's parameter set.
//!
//! Each parameter is a [`ParamDescriptor`] (static metadata) plus one
//! [`LinearSmoother`] owned by [`ParamSet`]. Target setters clamp to the
//! descriptor range; the engine alone advances the smoothed values.
//!
//! Attack and release are set and reported in milliseconds but *smoothed*
//! in seconds: the unit conversion happens exactly once at the setter
//! boundary, never inside the audio loop.
//!
//! [`ParamSnapshot`] is the serializable view a host shell (or the CLI
//! preset file) persists. Its keys are the parameter display names
//! lower-cased with spaces stripped ("Makeup Gain" -> `makeupgain`).

use crate::smooth::LinearSmoother;
use serde::{Deserialize, Serialize};

/// Unit of a parameter value, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Compression ratio (N:1).
    Ratio,
    /// Milliseconds.
    Milliseconds,
    /// On/off flag.
    Toggle,
}

impl ParamUnit {
    /// Display suffix for this unit.
    pub fn label(self) -> &'static str {
        match self {
            ParamUnit::Decibels => "dB",
            ParamUnit::Ratio => ":1",
            ParamUnit::Milliseconds => "ms",
            ParamUnit::Toggle => "",
        }
    }
}

/// Static metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name (e.g. "Makeup Gain").
    pub name: &'static str,
    /// Stable serialization key: display name lower-cased, spaces stripped.
    pub key: &'static str,
    /// Unit for display.
    pub unit: ParamUnit,
    /// Minimum allowed value, in display units.
    pub min: f32,
    /// Maximum allowed value, in display units.
    pub max: f32,
    /// Default value, in display units.
    pub default: f32,
}

/// The six compressor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Level above which compression begins (dB).
    Threshold,
    /// Compression ratio above threshold (N:1).
    Ratio,
    /// Attack time (ms).
    Attack,
    /// Release time (ms).
    Release,
    /// Fixed post-compression gain (dB).
    MakeupGain,
    /// Pass-through flag.
    Bypass,
}

impl ParamId {
    /// All parameters, in descriptor order.
    pub const ALL: [ParamId; 6] = [
        ParamId::Threshold,
        ParamId::Ratio,
        ParamId::Attack,
        ParamId::Release,
        ParamId::MakeupGain,
        ParamId::Bypass,
    ];

    /// Descriptor for this parameter.
    ///
    /// Ranges and defaults match the original processor: threshold
    /// [-60, 0] dB, ratio [1, 100], attack [0.1, 100] ms, release
    /// [10, 1000] ms, makeup [-12, 12] dB.
    pub fn descriptor(self) -> ParamDescriptor {
        match self {
            ParamId::Threshold => ParamDescriptor {
                name: "Threshold",
                key: "threshold",
                unit: ParamUnit::Decibels,
                min: -60.0,
                max: 0.0,
                default: 0.0,
            },
            ParamId::Ratio => ParamDescriptor {
                name: "Ratio",
                key: "ratio",
                unit: ParamUnit::Ratio,
                min: 1.0,
                max: 100.0,
                default: 1.0,
            },
            ParamId::Attack => ParamDescriptor {
                name: "Attack",
                key: "attack",
                unit: ParamUnit::Milliseconds,
                min: 0.1,
                max: 100.0,
                default: 2.0,
            },
            ParamId::Release => ParamDescriptor {
                name: "Release",
                key: "release",
                unit: ParamUnit::Milliseconds,
                min: 10.0,
                max: 1000.0,
                default: 300.0,
            },
            ParamId::MakeupGain => ParamDescriptor {
                name: "Makeup Gain",
                key: "makeupgain",
                unit: ParamUnit::Decibels,
                min: -12.0,
                max: 12.0,
                default: 0.0,
            },
            ParamId::Bypass => ParamDescriptor {
                name: "Bypass",
                key: "bypass",
                unit: ParamUnit::Toggle,
                min: 0.0,
                max: 1.0,
                default: 0.0,
            },
        }
    }

    /// Stable serialization key.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }
}

/// Serializable snapshot of every parameter's target value.
///
/// Field names are the stable keys a host shell persists. Times are in
/// milliseconds, levels in dB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSnapshot {
    /// Threshold in dB.
    pub threshold: f32,
    /// Compression ratio.
    pub ratio: f32,
    /// Attack time in ms.
    pub attack: f32,
    /// Release time in ms.
    pub release: f32,
    /// Makeup gain in dB.
    pub makeupgain: f32,
    /// Bypass flag.
    pub bypass: bool,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            threshold: ParamId::Threshold.descriptor().default,
            ratio: ParamId::Ratio.descriptor().default,
            attack: ParamId::Attack.descriptor().default,
            release: ParamId::Release.descriptor().default,
            makeupgain: ParamId::MakeupGain.descriptor().default,
            bypass: false,
        }
    }
}

/// All six parameter smoothers, one per [`ParamId`].
///
/// Created once at engine construction with the descriptor defaults.
/// [`reset`](Self::reset) re-derives every ramp length for a new sample
/// rate; setters only move targets.
#[derive(Debug, Clone)]
pub struct ParamSet {
    threshold_db: LinearSmoother,
    ratio: LinearSmoother,
    attack_secs: LinearSmoother,
    release_secs: LinearSmoother,
    makeup_db: LinearSmoother,
    bypass: LinearSmoother,
}

/// Milliseconds to seconds, applied once when attack/release targets are set.
const MS_TO_SECS: f32 = 1e-3;

impl ParamSet {
    /// Create a parameter set holding every descriptor default.
    pub fn new() -> Self {
        Self {
            threshold_db: LinearSmoother::new(ParamId::Threshold.descriptor().default),
            ratio: LinearSmoother::new(ParamId::Ratio.descriptor().default),
            attack_secs: LinearSmoother::new(ParamId::Attack.descriptor().default * MS_TO_SECS),
            release_secs: LinearSmoother::new(ParamId::Release.descriptor().default * MS_TO_SECS),
            makeup_db: LinearSmoother::new(ParamId::MakeupGain.descriptor().default),
            bypass: LinearSmoother::new(0.0),
        }
    }

    /// Reconfigure every smoother's ramp for a new sample rate.
    ///
    /// In-flight ramps snap to their targets; smoothing state does not
    /// survive a sample rate change.
    pub fn reset(&mut self, sample_rate: f32, ramp_secs: f32) {
        self.threshold_db.reset(sample_rate, ramp_secs);
        self.ratio.reset(sample_rate, ramp_secs);
        self.attack_secs.reset(sample_rate, ramp_secs);
        self.release_secs.reset(sample_rate, ramp_secs);
        self.makeup_db.reset(sample_rate, ramp_secs);
        self.bypass.reset(sample_rate, ramp_secs);
    }

    /// Set a parameter's target, clamped to its descriptor range.
    ///
    /// `value` is in display units (ms for attack/release); conversion to
    /// the smoothed domain happens here.
    pub fn set_target(&mut self, id: ParamId, value: f32) {
        let desc = id.descriptor();
        let clamped = value.clamp(desc.min, desc.max);
        match id {
            ParamId::Threshold => self.threshold_db.set_target(clamped),
            ParamId::Ratio => self.ratio.set_target(clamped),
            ParamId::Attack => self.attack_secs.set_target(clamped * MS_TO_SECS),
            ParamId::Release => self.release_secs.set_target(clamped * MS_TO_SECS),
            ParamId::MakeupGain => self.makeup_db.set_target(clamped),
            // The flag shares the smoothing mechanism but is read by target
            ParamId::Bypass => self.bypass.set_target(if clamped >= 0.5 { 1.0 } else { 0.0 }),
        }
    }

    /// A parameter's current target, in display units.
    pub fn target(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Threshold => self.threshold_db.target(),
            ParamId::Ratio => self.ratio.target(),
            ParamId::Attack => self.attack_secs.target() / MS_TO_SECS,
            ParamId::Release => self.release_secs.target() / MS_TO_SECS,
            ParamId::MakeupGain => self.makeup_db.target(),
            ParamId::Bypass => self.bypass.target(),
        }
    }

    /// Set the bypass flag.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.set_target(ParamId::Bypass, if bypass { 1.0 } else { 0.0 });
    }

    /// Bypass decision, read from the *target* (not smoothed) value.
    pub fn bypass_target(&self) -> bool {
        self.bypass.target() >= 0.5
    }

    /// Next smoothed threshold in dB; advances one sample.
    #[inline]
    pub fn advance_threshold_db(&mut self) -> f32 {
        self.threshold_db.advance()
    }

    /// Next smoothed ratio; advances one sample.
    #[inline]
    pub fn advance_ratio(&mut self) -> f32 {
        self.ratio.advance()
    }

    /// Next smoothed attack time in seconds; advances one sample.
    #[inline]
    pub fn advance_attack_secs(&mut self) -> f32 {
        self.attack_secs.advance()
    }

    /// Next smoothed release time in seconds; advances one sample.
    #[inline]
    pub fn advance_release_secs(&mut self) -> f32 {
        self.release_secs.advance()
    }

    /// Next smoothed makeup gain in dB; advances one sample.
    #[inline]
    pub fn advance_makeup_db(&mut self) -> f32 {
        self.makeup_db.advance()
    }

    /// Snapshot of every target, in display units.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            threshold: self.target(ParamId::Threshold),
            ratio: self.target(ParamId::Ratio),
            attack: self.target(ParamId::Attack),
            release: self.target(ParamId::Release),
            makeupgain: self.target(ParamId::MakeupGain),
            bypass: self.bypass_target(),
        }
    }

    /// Apply a snapshot; every value goes through the clamped setters.
    pub fn apply_snapshot(&mut self, snapshot: &ParamSnapshot) {
        self.set_target(ParamId::Threshold, snapshot.threshold);
        self.set_target(ParamId::Ratio, snapshot.ratio);
        self.set_target(ParamId::Attack, snapshot.attack);
        self.set_target(ParamId::Release, snapshot.release);
        self.set_target(ParamId::MakeupGain, snapshot.makeupgain);
        self.set_bypass(snapshot.bypass);
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self::new()
    }
}
