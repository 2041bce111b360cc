//! End-to-end scenarios for the compressor engine.

use compresor_core::{AudioBuffer, db_to_linear};
use compresor_dynamics::Compressor;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 512;

fn engine(threshold: f32, ratio: f32, attack_ms: f32, release_ms: f32, channels: usize) -> Compressor {
    let mut comp = Compressor::new();
    comp.set_threshold_db(threshold);
    comp.set_ratio(ratio);
    comp.set_attack_ms(attack_ms);
    comp.set_release_ms(release_ms);
    comp.prepare(SAMPLE_RATE, BLOCK, channels).unwrap();
    comp
}

fn rms(samples: &[f32]) -> f32 {
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Sustained -10 dBFS level, threshold -20 dB, ratio 4:1: steady-state
/// reduction must converge to (-10 - (-20)) * (1 - 1/4) = 7.5 dB, a
/// control gain of about 0.4217.
#[test]
fn steady_state_reduction_matches_static_curve() {
    let mut comp = engine(-20.0, 4.0, 10.0, 100.0, 1);

    let level = db_to_linear(-10.0);
    let mut last_output = 0.0;
    for _ in 0..20 {
        let mut buf = AudioBuffer::new(1, BLOCK);
        buf.channel_mut(0).fill(level);
        comp.process_block(&mut buf);
        last_output = buf.channel(0)[BLOCK - 1];
    }

    let reduction = comp.gain_reduction_db();
    assert!(
        (reduction - 7.5).abs() < 0.02,
        "expected 7.5 dB of reduction, got {reduction}"
    );

    let control = last_output / level;
    assert!(
        (control - 0.4217).abs() < 0.002,
        "expected control ~0.4217, got {control}"
    );
}

/// Same scenario with a sine instead of DC: the detector tracks the
/// instantaneous level, so the reduction hovers around the static value
/// with release-biased weighting toward the peaks.
#[test]
fn sine_scenario_converges_near_static_curve() {
    let mut comp = engine(-20.0, 4.0, 10.0, 100.0, 1);

    // RMS of -10 dBFS => amplitude sqrt(2) * 10^(-10/20)
    let amplitude = core::f32::consts::SQRT_2 * db_to_linear(-10.0);
    let omega = core::f32::consts::TAU * 997.0 / SAMPLE_RATE;

    let mut input_rms = 0.0;
    let mut output_rms = 0.0;
    for block in 0..20 {
        let mut buf = AudioBuffer::new(1, BLOCK);
        for (i, sample) in buf.channel_mut(0).iter_mut().enumerate() {
            let n = (block * BLOCK + i) as f32;
            *sample = amplitude * libm::sinf(omega * n);
        }
        input_rms = rms(buf.channel(0));
        comp.process_block(&mut buf);
        output_rms = rms(buf.channel(0));
    }

    let reduction = comp.gain_reduction_db();
    assert!(
        (5.5..=10.5).contains(&reduction),
        "sine reduction should settle near 7.5 dB, got {reduction}"
    );
    assert!(
        output_rms < input_rms,
        "compression must lower the level: {output_rms} vs {input_rms}"
    );
}

/// The detector observes the channel mean, not per-channel level: a
/// phase-inverted stereo pair cancels to silence at the detector and is
/// passed through uncompressed.
#[test]
fn phase_inverted_stereo_cancels_at_the_detector() {
    let mut comp = engine(-30.0, 10.0, 1.0, 50.0, 2);

    let mut buf = AudioBuffer::new(2, BLOCK);
    for i in 0..BLOCK {
        let s = 0.8 * libm::sinf(i as f32 * 0.2);
        buf.channel_mut(0)[i] = s;
        buf.channel_mut(1)[i] = -s;
    }
    let before = buf.to_interleaved();
    comp.process_block(&mut buf);

    assert_eq!(comp.gain_reduction_db(), 0.0);
    assert_eq!(buf.to_interleaved(), before);
}

/// Toggling bypass mid-stream: bypassed blocks are untouched, active
/// blocks compress, and the reduction signal is zero exactly while
/// bypassed.
#[test]
fn bypass_toggle_mid_stream() {
    let mut comp = engine(-20.0, 8.0, 1.0, 50.0, 1);

    let loud = db_to_linear(-6.0);
    let run_block = |comp: &mut Compressor| {
        let mut buf = AudioBuffer::new(1, BLOCK);
        buf.channel_mut(0).fill(loud);
        let mut reduction = AudioBuffer::new(1, BLOCK);
        comp.process_block_tapped(&mut buf, &mut reduction);
        (buf, reduction)
    };

    let (active, active_reduction) = run_block(&mut comp);
    assert!(active.channel(0)[BLOCK - 1] < loud);
    assert!(active_reduction.channel(0)[BLOCK - 1] > 0.0);

    comp.set_bypass(true);
    let (bypassed, bypassed_reduction) = run_block(&mut comp);
    assert!(bypassed.channel(0).iter().all(|&s| s == loud));
    assert!(bypassed_reduction.channel(0).iter().all(|&s| s == 0.0));

    comp.set_bypass(false);
    let (again, _) = run_block(&mut comp);
    assert!(again.channel(0)[BLOCK - 1] < loud);
}

/// Mono-in/stereo-out: the prepared input channel count drives the
/// detector and the apply loop; the extra output channel is silenced.
#[test]
fn mono_in_stereo_out_layout() {
    let mut comp = engine(-20.0, 4.0, 5.0, 50.0, 1);

    let mut buf = AudioBuffer::new(2, BLOCK);
    buf.channel_mut(0).fill(0.5);
    buf.channel_mut(1).fill(0.123);

    comp.process_block(&mut buf);
    assert!(buf.channel(0).iter().all(|&s| s > 0.0 && s < 0.5));
    assert!(buf.channel(1).iter().all(|&s| s == 0.0));
}

/// Re-preparing for a new sample rate resets the envelope memory and
/// the parameter ramps.
#[test]
fn prepare_resets_engine_state() {
    let mut comp = engine(-20.0, 8.0, 1.0, 1000.0, 1);

    let mut buf = AudioBuffer::new(1, BLOCK);
    buf.channel_mut(0).fill(0.8);
    comp.process_block(&mut buf);
    assert!(comp.gain_reduction_db() > 0.0);

    comp.prepare(44100.0, BLOCK, 1).unwrap();
    assert_eq!(comp.gain_reduction_db(), 0.0);
    // Targets survive the re-prepare
    assert_eq!(comp.param_target(compresor_core::ParamId::Ratio), 8.0);
}
