//! Gain and signal summing primitives.

/*
Voltage-Controlled Amplification
================================

A VCA multiplies an audio signal by a control signal sample by sample:

    output[i] = signal[i] × gain[i]

  gain = 1.0  →  unchanged
  gain = 0.5  →  half amplitude (about -6 dB)
  gain = 0.0  →  silence

The gain here is not a constant. It is sampled from a parameter timeline, so
an envelope scheduled on that timeline becomes the loudness contour of the
note:

    Oscillator: [ 0.8, -0.6,  0.9, -0.7, ...]
    Gain:       [ 0.2,  0.5,  0.8,  1.0, ...]
    Output:     [0.16, -0.3, 0.72, -0.7, ...]

Parameters can also take audio-rate modulation from other nodes. The
modulating signal is summed onto the scheduled value before it is used:

    gain[i] = scheduled[i] + modulation[i]

Both operations are stateless; each output sample depends only on the inputs
at the same index.
*/

/// Multiply two signal buffers sample-by-sample into `out`.
#[inline]
pub fn multiply(signal: &[f32], modulator: &[f32], out: &mut [f32]) {
    debug_assert_eq!(signal.len(), modulator.len());
    debug_assert_eq!(signal.len(), out.len());

    for ((o, &s), &m) in out.iter_mut().zip(signal.iter()).zip(modulator.iter()) {
        *o = s * m;
    }
}

/// Sum `other` onto `signal` in place.
#[inline]
pub fn add_in_place(signal: &mut [f32], other: &[f32]) {
    debug_assert_eq!(signal.len(), other.len());

    for (s, &o) in signal.iter_mut().zip(other.iter()) {
        *s += o;
    }
}
