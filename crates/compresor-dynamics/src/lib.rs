//! Compresor Dynamics - the feed-forward compressor engine
//!
//! The [`Compressor`] transforms an N-channel audio block in place,
//! sample by sample:
//!
//! ```text
//! Mono Mixdown → Level Detector (dB) → Gain Computer → Attack/Release
//!                                                      Smoothing
//!                                                          ↓
//! Input Channels ─────────────────── × control ← Makeup Gain
//! ```
//!
//! Level detection observes the *average* of the input channels, so all
//! channels receive identical gain and the stereo image cannot shift.
//! The gain computer is knee-free: below threshold the signal passes,
//! above it the overshoot is divided by the ratio in the log domain.
//! The control signal is smoothed by a one-pole filter whose coefficient
//! switches between attack and release depending on whether the requested
//! reduction is rising or falling; that filter's memory persists across
//! block boundaries.
//!
//! # Example
//!
//! ```rust
//! use compresor_core::AudioBuffer;
//! use compresor_dynamics::Compressor;
//!
//! let mut comp = Compressor::new();
//! comp.set_threshold_db(-20.0);
//! comp.set_ratio(4.0);
//! comp.prepare(48000.0, 512, 2).unwrap();
//!
//! let mut block = AudioBuffer::new(2, 512);
//! comp.process_block(&mut block);
//! ```

mod compressor;

pub use compressor::{Compressor, PrepareError};
