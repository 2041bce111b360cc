//! Planar multichannel audio buffers.
//!
//! [`AudioBuffer`] stores N channels of S frames contiguously, one channel
//! after another. The engine mutates buffers in place; the CLI front end
//! converts to and from interleaved WAV frames at the edges.

/// A planar N-channel audio buffer.
pub struct AudioBuffer {
    channels: usize,
    frames: usize,
    data: Vec<f32>,
}

impl AudioBuffer {
    /// Create a zeroed buffer with the given shape.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            channels,
            frames,
            data: vec![0.0; channels * frames],
        }
    }

    /// Build a planar buffer from interleaved frames
    /// (`L R L R ...` for stereo).
    ///
    /// # Panics
    ///
    /// Panics if `interleaved.len()` is not a multiple of `channels`.
    pub fn from_interleaved(channels: usize, interleaved: &[f32]) -> Self {
        assert!(channels > 0, "channel count must be nonzero");
        assert_eq!(
            interleaved.len() % channels,
            0,
            "interleaved length must be a multiple of the channel count"
        );
        let frames = interleaved.len() / channels;
        let mut buffer = Self::new(channels, frames);
        for (frame, samples) in interleaved.chunks_exact(channels).enumerate() {
            for (ch, &sample) in samples.iter().enumerate() {
                buffer.channel_mut(ch)[frame] = sample;
            }
        }
        buffer
    }

    /// Flatten to interleaved frames.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.channels * self.frames];
        for ch in 0..self.channels {
            let src = self.channel(ch);
            for (frame, &sample) in src.iter().enumerate() {
                out[frame * self.channels + ch] = sample;
            }
        }
        out
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Frames per channel.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// One channel's samples.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channels()`.
    #[inline]
    pub fn channel(&self, channel: usize) -> &[f32] {
        let start = channel * self.frames;
        &self.data[start..start + self.frames]
    }

    /// One channel's samples, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channels()`.
    #[inline]
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        let start = channel * self.frames;
        &mut self.data[start..start + self.frames]
    }

    /// Zero every channel.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Zero a single channel.
    pub fn clear_channel(&mut self, channel: usize) {
        self.channel_mut(channel).fill(0.0);
    }

    /// Copy another buffer's contents.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn copy_from(&mut self, other: &AudioBuffer) {
        assert_eq!(self.channels, other.channels, "channel count mismatch");
        assert_eq!(self.frames, other.frames, "frame count mismatch");
        self.data.copy_from_slice(&other.data);
    }

    /// Copy `len` frames from `src` starting at `src_frame` into this
    /// buffer starting at frame 0, channel by channel.
    ///
    /// Used by block-based callers to window a long recording through a
    /// fixed-size block buffer.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is too short or channel counts differ.
    pub fn copy_window_from(&mut self, src: &AudioBuffer, src_frame: usize, len: usize) {
        assert_eq!(self.channels, src.channels, "channel count mismatch");
        assert!(len <= self.frames, "window longer than destination");
        for ch in 0..self.channels {
            let source = &src.channel(ch)[src_frame..src_frame + len];
            self.channel_mut(ch)[..len].copy_from_slice(source);
        }
    }

    /// Copy `len` frames from this buffer (starting at frame 0) into
    /// `dst` starting at `dst_frame`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is too short or channel counts differ.
    pub fn copy_window_into(&self, dst: &mut AudioBuffer, dst_frame: usize, len: usize) {
        assert_eq!(self.channels, dst.channels, "channel count mismatch");
        assert!(len <= self.frames, "window longer than source");
        for ch in 0..self.channels {
            let source = &self.channel(ch)[..len];
            dst.channel_mut(ch)[dst_frame..dst_frame + len].copy_from_slice(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = AudioBuffer::new(2, 16);
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.frames(), 16);
        assert!(buf.channel(0).iter().all(|&s| s == 0.0));
        assert!(buf.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn channels_are_independent() {
        let mut buf = AudioBuffer::new(2, 4);
        buf.channel_mut(0).fill(1.0);
        assert!(buf.channel(0).iter().all(|&s| s == 1.0));
        assert!(buf.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn interleave_roundtrip() {
        let interleaved = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let buf = AudioBuffer::from_interleaved(2, &interleaved);
        assert_eq!(buf.frames(), 3);
        assert_eq!(buf.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(buf.channel(1), &[-1.0, -2.0, -3.0]);
        assert_eq!(buf.to_interleaved(), interleaved);
    }

    #[test]
    fn clear_channel_leaves_others() {
        let mut buf = AudioBuffer::from_interleaved(2, &[1.0, 2.0, 1.0, 2.0]);
        buf.clear_channel(1);
        assert_eq!(buf.channel(0), &[1.0, 1.0]);
        assert_eq!(buf.channel(1), &[0.0, 0.0]);
    }

    #[test]
    fn window_copies_roundtrip() {
        let long = AudioBuffer::from_interleaved(1, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut block = AudioBuffer::new(1, 4);
        block.copy_window_from(&long, 2, 3);
        assert_eq!(&block.channel(0)[..3], &[2.0, 3.0, 4.0]);

        let mut out = AudioBuffer::new(1, 6);
        block.copy_window_into(&mut out, 2, 3);
        assert_eq!(out.channel(0), &[0.0, 0.0, 2.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "multiple of the channel count")]
    fn from_interleaved_rejects_ragged_input() {
        let _ = AudioBuffer::from_interleaved(2, &[1.0, 2.0, 3.0]);
    }
}
