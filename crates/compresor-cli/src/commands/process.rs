//! File-based compression command.

use crate::preset;
use crate::wav::{self, WavSpec};
use clap::Args;
use compresor_core::{AudioBuffer, ParamId, linear_to_db};
use compresor_dynamics::Compressor;
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Threshold in dB [-60, 0]
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<f32>,

    /// Compression ratio [1, 100]
    #[arg(short, long)]
    ratio: Option<f32>,

    /// Attack time in ms [0.1, 100]
    #[arg(short, long)]
    attack: Option<f32>,

    /// Release time in ms [10, 1000]
    #[arg(long)]
    release: Option<f32>,

    /// Makeup gain in dB [-12, 12]
    #[arg(short, long, allow_negative_numbers = true)]
    makeup: Option<f32>,

    /// Pass audio through unprocessed
    #[arg(long)]
    bypass: bool,

    /// Preset file (JSON), applied before any flag overrides
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Write the final parameter values to a preset file (JSON)
    #[arg(long)]
    save_preset: Option<PathBuf>,

    /// Write the per-sample attenuation (input minus output) to a sidecar WAV
    #[arg(long)]
    reduction_out: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (input, spec) = wav::read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    let channels = input.channels();
    let frames = input.frames();

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        channels,
        spec.sample_rate,
        frames as f32 / sample_rate
    );

    let mut comp = Compressor::new();
    if let Some(path) = &args.preset {
        let snapshot = preset::load(path)?;
        comp.apply_snapshot(&snapshot);
        println!("Loaded preset {}", path.display());
    }
    if let Some(v) = args.threshold {
        comp.set_param(ParamId::Threshold, v);
    }
    if let Some(v) = args.ratio {
        comp.set_param(ParamId::Ratio, v);
    }
    if let Some(v) = args.attack {
        comp.set_param(ParamId::Attack, v);
    }
    if let Some(v) = args.release {
        comp.set_param(ParamId::Release, v);
    }
    if let Some(v) = args.makeup {
        comp.set_param(ParamId::MakeupGain, v);
    }
    if args.bypass {
        comp.set_bypass(true);
    }

    comp.prepare(sample_rate, args.block_size, channels)?;
    tracing::debug!(
        block_size = args.block_size,
        channels,
        sample_rate,
        "engine prepared"
    );

    let mut output = AudioBuffer::new(channels, frames);
    let mut reduction = args
        .reduction_out
        .as_ref()
        .map(|_| AudioBuffer::new(channels, frames));

    let mut block = AudioBuffer::new(channels, args.block_size);
    let mut reduction_block = AudioBuffer::new(channels, args.block_size);

    let mut frame = 0;
    while frame < frames {
        let len = args.block_size.min(frames - frame);
        if len != block.frames() {
            // Final partial block runs at its exact length; the envelope
            // and the parameter ramps never see padding samples.
            block = AudioBuffer::new(channels, len);
            reduction_block = AudioBuffer::new(channels, len);
        }
        block.copy_window_from(&input, frame, len);

        if reduction.is_some() {
            comp.process_block_tapped(&mut block, &mut reduction_block);
        } else {
            comp.process_block(&mut block);
        }

        block.copy_window_into(&mut output, frame, len);
        if let Some(sidecar) = reduction.as_mut() {
            reduction_block.copy_window_into(sidecar, frame, len);
        }
        frame += len;
    }

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&input)),
        linear_to_db(peak(&input))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );
    println!("  Final gain reduction: {:.1} dB", comp.gain_reduction_db());

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    wav::write_wav(&args.output, &output, out_spec)?;

    if let (Some(path), Some(sidecar)) = (&args.reduction_out, &reduction) {
        // Always 32-bit float, regardless of --bit-depth
        let sidecar_spec = WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: 32,
        };
        println!("Writing reduction sidecar {}...", path.display());
        wav::write_wav(path, sidecar, sidecar_spec)?;
    }

    if let Some(path) = &args.save_preset {
        preset::save(path, &comp.snapshot())?;
        println!("Saved preset {}", path.display());
    }

    println!("Done!");
    Ok(())
}

fn rms(buffer: &AudioBuffer) -> f32 {
    let total = buffer.channels() * buffer.frames();
    if total == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for ch in 0..buffer.channels() {
        sum += buffer.channel(ch).iter().map(|s| s * s).sum::<f32>();
    }
    (sum / total as f32).sqrt()
}

fn peak(buffer: &AudioBuffer) -> f32 {
    let mut max = 0.0f32;
    for ch in 0..buffer.channels() {
        max = buffer.channel(ch).iter().map(|s| s.abs()).fold(max, f32::max);
    }
    max
}
