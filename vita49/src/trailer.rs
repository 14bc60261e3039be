// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the trailer field
(ANSI/VITA-49.2-2017 section 5.1.6).
*/

use deku::prelude::*;

/// Sample frame indicator enumeration.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(id_type = "u8", endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleFrameIndicator {
    #[deku(id = 0x0)]
    NotApplicable,
    #[deku(id = 0x1)]
    FirstDataPacket,
    #[deku(id = 0x2)]
    MiddleDataPacket,
    #[deku(id = 0x3)]
    FinalDataPacket,
}

impl TryFrom<u32> for SampleFrameIndicator {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            x if x == SampleFrameIndicator::NotApplicable as u32 => {
                Ok(SampleFrameIndicator::NotApplicable)
            }
            x if x == SampleFrameIndicator::FirstDataPacket as u32 => {
                Ok(SampleFrameIndicator::FirstDataPacket)
            }
            x if x == SampleFrameIndicator::MiddleDataPacket as u32 => {
                Ok(SampleFrameIndicator::MiddleDataPacket)
            }
            x if x == SampleFrameIndicator::FinalDataPacket as u32 => {
                Ok(SampleFrameIndicator::FinalDataPacket)
            }
            _ => Err(()),
        }
    }
}

/// Base trailer field data structure.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite,
)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trailer(u32);

impl Trailer {
    fn cal_time_enabled(&self) -> bool {
        self.0 & (1 << 31) > 0
    }
    fn valid_data_enabled(&self) -> bool {
        self.0 & (1 << 30) > 0
    }
    fn reference_lock_enabled(&self) -> bool {
        self.0 & (1 << 29) > 0
    }
    fn agc_enabled(&self) -> bool {
        self.0 & (1 << 28) > 0
    }
    fn detected_signal_enabled(&self) -> bool {
        self.0 & (1 << 27) > 0
    }
    fn spectral_inversion_enabled(&self) -> bool {
        self.0 & (1 << 26) > 0
    }
    fn over_range_enabled(&self) -> bool {
        self.0 & (1 << 25) > 0
    }
    fn sample_loss_enabled(&self) -> bool {
        self.0 & (1 << 24) > 0
    }
    fn sample_frame_enabled(&self) -> bool {
        self.0 & (1 << 23) > 0 && self.0 & (1 << 22) > 0
    }
    fn user_defined_enabled(&self) -> bool {
        self.0 & (1 << 21) > 0 && self.0 & (1 << 20) > 0
    }
    /// Returns the calibration time indicator status if present.
    pub fn cal_time_indicator(&self) -> Option<bool> {
        if self.cal_time_enabled() {
            Some(self.0 & (1 << 19) > 0)
        } else {
            None
        }
    }
    /// Returns the valid data indicator status if present.
    pub fn valid_data_indicator(&self) -> Option<bool> {
        if self.valid_data_enabled() {
            Some(self.0 & (1 << 18) > 0)
        } else {
            None
        }
    }
    /// Returns the reference lock indicator status if present.
    pub fn reference_lock_indicator(&self) -> Option<bool> {
        if self.reference_lock_enabled() {
            Some(self.0 & (1 << 17) > 0)
        } else {
            None
        }
    }
    /// Returns the automcatic gain control (AGC) indicator status if present.
    pub fn agc_indicator(&self) -> Option<bool> {
        if self.agc_enabled() {
            Some(self.0 & (1 << 16) > 0)
        } else {
            None
        }
    }
    /// Returns the detected signal indicator status if present.
    pub fn detected_signal_indicator(&self) -> Option<bool> {
        if self.detected_signal_enabled() {
            Some(self.0 & (1 << 15) > 0)
        } else {
            None
        }
    }
    /// Returns the spectral inversion indicator status if present.
    pub fn spectral_inversion_indicator(&self) -> Option<bool> {
        if self.spectral_inversion_enabled() {
            Some(self.0 & (1 << 14) > 0)
        } else {
            None
        }
    }
    /// Returns the over range indicator status if present.
    pub fn over_range_indicator(&self) -> Option<bool> {
        if self.over_range_enabled() {
            Some(self.0 & (1 << 13) > 0)
        } else {
            None
        }
    }
    /// Returns the sample loss indicator status if present.
    pub fn sample_loss_indicator(&self) -> Option<bool> {
        if self.sample_loss_enabled() {
            Some(self.0 & (1 << 12) > 0)
        } else {
            None
        }
    }
    /// Returns the sample frame indicator status if present.
    pub fn sample_frame_indicator(&self) -> Option<SampleFrameIndicator> {
        if self.sample_frame_enabled() {
            Some(((self.0 >> 10) & 0b11).try_into().unwrap())
        } else {
            None
        }
    }
    /// Returns the user-defined indicator status byte if present.
    pub fn user_defined_indicator(&self) -> Option<u8> {
        if self.user_defined_enabled() {
            Some(((self.0 >> 8) & 0b11) as u8)
        } else {
            None
        }
    }
    fn associated_context_packet_count_enabled(&self) -> bool {
        self.0 & (1 << 7) > 0
    }
    /// Returns the associated context packet count if present.
    pub fn associated_context_packet_count(&self) -> Option<u8> {
        if self.associated_context_packet_count_enabled() {
            Some((self.0 & 0x7F) as u8)
        } else {
            None
        }
    }
}

/// Number of picoseconds in one second, used by the timestamp arithmetic
/// below (ANSI/VITA-49.2-2017 section 6.1.4).
pub const PICOSECONDS_PER_SECOND: u64 = 1_000_000_000_000;

/// Computes the number of samples (or, for complex formats with
/// `scalar = false`, sample pairs) represented by a signal data payload of
/// `payload_size_words` 32-bit words, given the packed payload format and
/// the trailing pad-bit count recorded alongside the payload.
///
/// This crate does not thread a per-packet pad-bit count through
/// [`crate::packet_header::PacketHeader`]; callers that round-trip pad bits
/// must track `pad_bit_count` themselves and pass it back in on both sides.
pub fn data_length(
    format: &crate::packed::PackedPayloadFormat,
    payload_size_words: usize,
    pad_bit_count: u8,
    scalar: bool,
) -> usize {
    let total_bits = (payload_size_words as u64) * 32 - pad_bit_count as u64;
    let item_bits = format.bits_per_sample() as u64;
    if item_bits == 0 {
        return 0;
    }
    let pairs = total_bits / item_bits;
    if scalar {
        (pairs * format.sample_component().components() as u64) as usize
    } else {
        pairs as usize
    }
}

/// Inverse of [`data_length`]: returns the `(payload_size_words,
/// pad_bit_count)` needed to hold `n` samples (or sample pairs, for
/// `scalar = false` complex formats), rounded up to the nearest whole
/// 32-bit word.
pub fn set_data_length(
    format: &crate::packed::PackedPayloadFormat,
    n: usize,
    scalar: bool,
) -> (usize, u8) {
    let pairs = if scalar {
        n as u64 / format.sample_component().components() as u64
    } else {
        n as u64
    };
    let total_bits = format.bits_per_sample() as u64 * pairs;
    let words = total_bits.div_ceil(32);
    let pad_bits = (words * 32).saturating_sub(total_bits);
    (words as usize, pad_bits as u8)
}

/// Adds the time spanned by `samples` at `sample_rate_hz` to a timestamp,
/// returning the updated `(integer_seconds, fractional_picoseconds)` pair.
/// Only meaningful when `tsf` is [`crate::packet_header::Tsf::RealTimePs`];
/// other modes count samples or free-running ticks rather than wall time
/// and are returned unchanged with `samples` added to the fractional field
/// directly.
pub fn next_timestamp(
    integer_seconds: u32,
    fractional: u64,
    tsf: crate::packet_header::Tsf,
    samples: u64,
    sample_rate_hz: f64,
) -> (u32, u64) {
    use crate::packet_header::Tsf;
    match tsf {
        Tsf::RealTimePs => {
            let elapsed_ps = (samples as f64 / sample_rate_hz) * PICOSECONDS_PER_SECOND as f64;
            let total_ps = fractional as u128 + elapsed_ps.round() as u128;
            let extra_seconds = (total_ps / PICOSECONDS_PER_SECOND as u128) as u32;
            let remainder_ps = (total_ps % PICOSECONDS_PER_SECOND as u128) as u64;
            (integer_seconds + extra_seconds, remainder_ps)
        }
        _ => (integer_seconds, fractional + samples),
    }
}

/// Returns the integer number of samples missing between an `expected`
/// timestamp and the `actual` one observed on the wire, at `sample_rate_hz`.
///
/// The seconds and picoseconds deltas are accumulated separately, with a
/// half-picosecond rounding term added before truncation, so that the
/// compiler cannot fuse the two timestamp components into a single
/// lower-precision subtraction.
pub fn lost_samples(
    expected_integer: u32,
    expected_fractional: u64,
    actual_integer: u32,
    actual_fractional: u64,
    sample_rate_hz: f64,
) -> i64 {
    let seconds_delta = actual_integer as i64 - expected_integer as i64;
    let ps_delta = actual_fractional as i64 - expected_fractional as i64;
    let samples_from_seconds = seconds_delta as f64 * sample_rate_hz;
    let samples_from_ps =
        ps_delta as f64 * sample_rate_hz / PICOSECONDS_PER_SECOND as f64;
    let half_sample = 0.5_f64.copysign(samples_from_seconds + samples_from_ps);
    (samples_from_seconds + samples_from_ps + half_sample) as i64
}

#[cfg(test)]
mod sizing_tests {
    use super::*;
    use crate::packed::{DataItemFormat, PackedPayloadFormat, SampleComponent};
    use crate::packet_header::Tsf;

    fn int16() -> PackedPayloadFormat {
        PackedPayloadFormat::new(
            true,
            SampleComponent::Real,
            DataItemFormat::SignedInt,
            16,
        )
        .unwrap()
    }

    #[test]
    fn data_length_round_trips_through_set_data_length() {
        let fmt = int16();
        let (words, pad) = set_data_length(&fmt, 10, true);
        assert_eq!(words, 5);
        assert_eq!(pad, 0);
        assert_eq!(data_length(&fmt, words, pad, true), 10);
    }

    #[test]
    fn set_data_length_pads_to_word_boundary() {
        let fmt = int16();
        let (words, pad) = set_data_length(&fmt, 3, true);
        assert_eq!(words, 2);
        assert_eq!(pad, 16);
    }

    #[test]
    fn next_timestamp_advances_by_sample_count() {
        let (secs, ps) = next_timestamp(10, 0, Tsf::RealTimePs, 8_000_000, 8_000_000.0);
        assert_eq!(secs, 11);
        assert_eq!(ps, 0);
    }

    #[test]
    fn lost_samples_is_zero_for_matching_timestamps() {
        assert_eq!(lost_samples(10, 500, 10, 500, 8_000_000.0), 0);
    }

    #[test]
    fn lost_samples_counts_missing_samples_across_one_second() {
        let n = lost_samples(10, 0, 11, 0, 8_000_000.0);
        assert_eq!(n, 8_000_000);
    }
}
