//! Inspect a WAV file before compressing it.

use crate::wav::{self, WavFormat};
use clap::Args;
use compresor_core::{AudioBuffer, linear_to_db};

/// Report a WAV file's format and level statistics.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = wav::read_wav_info(&args.file)?;
    let (audio, _) = wav::read_wav(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    // The numbers a threshold choice hangs on: where the peaks sit, where
    // the body of the signal sits, and how far apart they are.
    let peak_db = linear_to_db(peak(&audio));
    let rms_db = linear_to_db(rms(&audio));
    println!("\nLevels:");
    println!("  Peak:  {peak_db:.1} dB");
    println!("  RMS:   {rms_db:.1} dB");
    println!("  Crest: {:.1} dB", peak_db - rms_db);

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
