// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Packed payload codec (ANSI/VITA-49.0-2007 Appendix D / section 5.4), which
packs arrays of real or complex samples into arbitrary-bit-width fields
within a signal data packet's payload, in either "link efficient" (bit
packed, fewest bytes used) or "processing efficient" (each item's packing
field rounded up to a 32- or 64-bit container) layout.
*/

use crate::VitaError;

/// Real/complex nature of each sample.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum SampleComponent {
    /// A single real-valued sample component.
    #[default]
    Real,
    /// Two sample components, in-phase then quadrature.
    ComplexCartesian,
    /// Two sample components, amplitude then phase.
    ComplexPolar,
}

impl SampleComponent {
    /// Number of data-item components making up one sample of this kind.
    pub fn components(self) -> usize {
        match self {
            SampleComponent::Real => 1,
            SampleComponent::ComplexCartesian | SampleComponent::ComplexPolar => 2,
        }
    }
}

/// Numeric encoding used for each data item.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DataItemFormat {
    /// Signed two's-complement fixed-point.
    #[default]
    SignedInt,
    /// Signed VRT floating-point, with the given number of exponent bits
    /// (1..6).
    SignedVrtFloat(u8),
    /// Unsigned fixed-point.
    UnsignedInt,
    /// Unsigned VRT floating-point, with the given number of exponent bits
    /// (1..6).
    UnsignedVrtFloat(u8),
    /// 16-bit IEEE-754 half precision float. Valid only when the item size
    /// is 16 bits.
    Float16,
    /// 32-bit IEEE-754 single precision float. Valid only when the item
    /// size is 32 bits.
    Float32,
    /// 64-bit IEEE-754 double precision float. Valid only when the item
    /// size is 64 bits.
    Float64,
}

impl DataItemFormat {
    /// True for the two VRT-floating-point/IEEE formats that hold a
    /// normalized real value rather than an exact integer.
    fn is_float(&self) -> bool {
        matches!(
            self,
            DataItemFormat::SignedVrtFloat(_)
                | DataItemFormat::UnsignedVrtFloat(_)
                | DataItemFormat::Float16
                | DataItemFormat::Float32
                | DataItemFormat::Float64
        )
    }
}

/// A single packed sample value, typed per the format's [`DataItemFormat`]:
/// an exact integer for `SignedInt`/`UnsignedInt`, or a floating-point value
/// for the VRT/IEEE floating formats.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sample {
    /// An exact integer value, valid for `SignedInt`/`UnsignedInt` formats.
    Int(i64),
    /// A floating-point value, valid for VRT-float/IEEE formats.
    Float(f64),
}

/// Describes how samples are packed into a signal data payload: whether
/// packing is processing- or link-efficient, the real/complex nature of
/// each sample, the numeric format and bit width of each data item, and
/// any per-sample event/channel tag bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackedPayloadFormat {
    processing_efficient: bool,
    sample_component: SampleComponent,
    data_item_format: DataItemFormat,
    event_tag_size: u8,
    channel_tag_size: u8,
    /// Number of bits each data item occupies within its packing field.
    item_size: u8,
    /// Number of bits in the packing field holding each data item (>=
    /// `item_size + event_tag_size + channel_tag_size`). Equal to
    /// `item_size` unless extra padding bits or tags are present.
    field_size: u8,
}

impl PackedPayloadFormat {
    /// Creates a format descriptor with no event/channel tags and the
    /// field size equal to the item size.
    pub fn new(
        processing_efficient: bool,
        sample_component: SampleComponent,
        data_item_format: DataItemFormat,
        item_size: u8,
    ) -> Result<Self, VitaError> {
        if item_size == 0 || item_size > 64 {
            return Err(VitaError::OutOfRange);
        }
        let fmt = Self {
            processing_efficient,
            sample_component,
            data_item_format,
            event_tag_size: 0,
            channel_tag_size: 0,
            item_size,
            field_size: item_size,
        };
        fmt.validate()?;
        Ok(fmt)
    }

    /// Sets the event tag size (0..7 bits). The packing field size grows
    /// to fit if it is currently too small.
    pub fn set_event_tag_size(&mut self, size: u8) -> Result<(), VitaError> {
        if size > 7 {
            return Err(VitaError::OutOfRange);
        }
        self.event_tag_size = size;
        self.field_size = self.field_size.max(self.min_field_size());
        Ok(())
    }

    /// Sets the channel tag size (0..15 bits). The packing field size
    /// grows to fit if it is currently too small.
    pub fn set_channel_tag_size(&mut self, size: u8) -> Result<(), VitaError> {
        if size > 15 {
            return Err(VitaError::OutOfRange);
        }
        self.channel_tag_size = size;
        self.field_size = self.field_size.max(self.min_field_size());
        Ok(())
    }

    /// Sets the packing field size. Must be `>= item_size + event_tag_size
    /// + channel_tag_size` and `<= 64`.
    pub fn set_field_size(&mut self, size: u8) -> Result<(), VitaError> {
        if size < self.min_field_size() || size > 64 {
            return Err(VitaError::OutOfRange);
        }
        self.field_size = size;
        Ok(())
    }

    fn min_field_size(&self) -> u8 {
        self.item_size + self.event_tag_size + self.channel_tag_size
    }

    /// The container width, in bits, each item's packing field occupies on
    /// the wire: the packing field itself for link-efficient formats, or
    /// the next of {32, 64} bits for processing-efficient formats (ANSI/
    /// VITA-49.0 section 6.2).
    fn container_bits(&self) -> u32 {
        if self.processing_efficient {
            if self.field_size <= 32 {
                32
            } else {
                64
            }
        } else {
            self.field_size as u32
        }
    }

    /// Total bits consumed per sample on the wire, including all of its
    /// components' packing fields/containers.
    pub fn bits_per_sample(&self) -> usize {
        self.sample_component.components() * self.container_bits() as usize
    }

    /// The real/complex/polar component layout of this format.
    pub fn sample_component(&self) -> SampleComponent {
        self.sample_component
    }

    /// Validates the descriptor per ANSI/VITA-49.0 section 6.2: the
    /// packing field must be large enough to hold the data item and its
    /// tags, VRT-float formats need more bits than their own exponent
    /// field, and IEEE formats are pinned to their natural width.
    fn validate(&self) -> Result<(), VitaError> {
        if self.field_size < self.min_field_size() {
            return Err(VitaError::UnsupportedFormat(
                "item packing field size smaller than data item size plus tag sizes".into(),
            ));
        }
        match self.data_item_format {
            DataItemFormat::SignedVrtFloat(n) | DataItemFormat::UnsignedVrtFloat(n) => {
                if self.item_size <= n + 1 {
                    return Err(VitaError::UnsupportedFormat(
                        "VRT floating-point data item size must exceed its exponent field size"
                            .into(),
                    ));
                }
            }
            DataItemFormat::Float16 if self.item_size != 16 => {
                return Err(VitaError::UnsupportedFormat(
                    "Float16 requires a 16-bit data item size".into(),
                ));
            }
            DataItemFormat::Float32 if self.item_size != 32 => {
                return Err(VitaError::UnsupportedFormat(
                    "Float32 requires a 32-bit data item size".into(),
                ));
            }
            DataItemFormat::Float64 if self.item_size != 64 => {
                return Err(VitaError::UnsupportedFormat(
                    "Float64 requires a 64-bit data item size".into(),
                ));
            }
            _ => {}
        }
        Ok(())
    }
}

/// A standard 8-bit signed integer format, processing efficient, real.
pub const INT8: fn() -> PackedPayloadFormat =
    || PackedPayloadFormat::new(true, SampleComponent::Real, DataItemFormat::SignedInt, 8).unwrap();
/// A standard 16-bit signed integer format, processing efficient, real.
pub const INT16: fn() -> PackedPayloadFormat =
    || PackedPayloadFormat::new(true, SampleComponent::Real, DataItemFormat::SignedInt, 16).unwrap();

/// Packs bits MSB-first into a byte buffer.
struct BitWriter {
    buf: Vec<u8>,
    bit_pos: usize,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            buf: Vec::new(),
            bit_pos: 0,
        }
    }

    fn write_bits(&mut self, value: u64, n_bits: u32) {
        for i in (0..n_bits).rev() {
            let bit = (value >> i) & 1;
            let byte_idx = self.bit_pos / 8;
            if byte_idx >= self.buf.len() {
                self.buf.push(0);
            }
            if bit != 0 {
                self.buf[byte_idx] |= 1 << (7 - (self.bit_pos % 8));
            }
            self.bit_pos += 1;
        }
    }

    fn align_to_word(&mut self) {
        let rem = self.bit_pos % 32;
        if rem != 0 {
            self.write_bits(0, (32 - rem) as u32);
        }
    }

    fn into_bytes(mut self) -> Vec<u8> {
        self.align_to_word();
        self.buf
    }
}

/// Reads bits MSB-first from a byte buffer.
struct BitReader<'a> {
    buf: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    fn read_bits(&mut self, n_bits: u32) -> Result<u64, VitaError> {
        let mut out: u64 = 0;
        for _ in 0..n_bits {
            let byte_idx = self.bit_pos / 8;
            if byte_idx >= self.buf.len() {
                return Err(VitaError::InvalidLayout("ran out of bits while unpacking".into()));
            }
            let bit = (self.buf[byte_idx] >> (7 - (self.bit_pos % 8))) & 1;
            out = (out << 1) | bit as u64;
            self.bit_pos += 1;
        }
        Ok(out)
    }
}

fn sign_extend(val: u64, bits: u8) -> i64 {
    if bits >= 64 {
        return val as i64;
    }
    let shift = 64 - bits as u32;
    ((val << shift) as i64) >> shift
}

fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Encodes one sample's data item to its raw, unsigned bit pattern (exactly
/// `item_size` bits wide). Integer formats round-trip bit-exactly; VRT and
/// IEEE floating formats round-trip to the precision their width allows.
fn item_to_bits(fmt: &PackedPayloadFormat, sample: Sample) -> Result<u64, VitaError> {
    match (fmt.data_item_format, sample) {
        (DataItemFormat::SignedInt, Sample::Int(v)) => {
            let max = (1i64 << (fmt.item_size - 1)) - 1;
            let min = -(1i64 << (fmt.item_size - 1));
            if v < min || v > max {
                return Err(VitaError::OutOfRange);
            }
            Ok((v as u64) & mask(fmt.item_size))
        }
        (DataItemFormat::UnsignedInt, Sample::Int(v)) => {
            if v < 0 || (fmt.item_size < 64 && v as u64 > mask(fmt.item_size)) {
                return Err(VitaError::OutOfRange);
            }
            Ok(v as u64 & mask(fmt.item_size))
        }
        (DataItemFormat::Float32, Sample::Float(v)) => Ok((v as f32).to_bits() as u64),
        (DataItemFormat::Float64, Sample::Float(v)) => Ok(v.to_bits()),
        (DataItemFormat::Float16, Sample::Float(v)) => Ok(half::f16::from_f64(v).to_bits() as u64),
        (DataItemFormat::SignedVrtFloat(exp_bits), Sample::Float(v))
        | (DataItemFormat::UnsignedVrtFloat(exp_bits), Sample::Float(v)) => {
            Ok(vrt_float_to_bits(v, exp_bits, fmt.item_size))
        }
        _ => Err(VitaError::UnsupportedFormat(
            "sample value type does not match the descriptor's data item format".into(),
        )),
    }
}

/// Inverse of [`item_to_bits`].
fn bits_to_item(fmt: &PackedPayloadFormat, bits: u64) -> Sample {
    match fmt.data_item_format {
        DataItemFormat::SignedInt => Sample::Int(sign_extend(bits, fmt.item_size)),
        DataItemFormat::UnsignedInt => Sample::Int(bits as i64),
        DataItemFormat::Float32 => Sample::Float(f32::from_bits(bits as u32) as f64),
        DataItemFormat::Float64 => Sample::Float(f64::from_bits(bits)),
        DataItemFormat::Float16 => Sample::Float(half::f16::from_bits(bits as u16).to_f64()),
        DataItemFormat::SignedVrtFloat(exp_bits) | DataItemFormat::UnsignedVrtFloat(exp_bits) => {
            Sample::Float(vrt_float_from_bits(bits, exp_bits, fmt.item_size))
        }
    }
}

/// Converts a value in `[-1, 1)` to the VRT floating-point packed form
/// (ANSI/VITA-49.0 Appendix D): a sign bit, `exp_bits` exponent bits, and
/// the remaining bits as mantissa, normalized so the leading mantissa bit
/// is 1 except for values near zero.
fn vrt_float_to_bits(value: f64, exp_bits: u8, total_bits: u8) -> u64 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.clamp(-1.0, 1.0 - f64::EPSILON);
    let sign = if clamped < 0.0 { 1u64 } else { 0 };
    let mag = clamped.abs();
    let mantissa_bits = total_bits - 1 - exp_bits;
    if mag == 0.0 {
        return sign << (total_bits - 1);
    }
    let max_exp = (1u32 << exp_bits) - 1;
    let mut exp = 0u32;
    let mut scaled = mag;
    while scaled < 0.5 && exp < max_exp {
        scaled *= 2.0;
        exp += 1;
    }
    let mantissa = (scaled * (1u64 << mantissa_bits) as f64).round() as u64;
    let mantissa = mantissa.min((1u64 << mantissa_bits) - 1);
    (sign << (total_bits - 1)) | ((exp as u64) << mantissa_bits) | mantissa
}

fn vrt_float_from_bits(bits: u64, exp_bits: u8, total_bits: u8) -> f64 {
    let mantissa_bits = total_bits - 1 - exp_bits;
    let sign = (bits >> (total_bits - 1)) & 1;
    let exp = (bits >> mantissa_bits) & ((1u64 << exp_bits) - 1);
    let mantissa = bits & ((1u64 << mantissa_bits) - 1);
    let mag = (mantissa as f64 / (1u64 << mantissa_bits) as f64) / 2f64.powi(exp as i32);
    if sign != 0 {
        -mag
    } else {
        mag
    }
}

/// Assembles one item's full on-wire field: `[channel_tag | event_tag |
/// data_item | pad]` from MSB to LSB, per ANSI/VITA-49.0 section 6.2.
fn build_field(fmt: &PackedPayloadFormat, bits: u64, event_tag: u8, channel_tag: u8) -> u64 {
    let pad_bits = fmt.field_size as u32 - fmt.min_field_size() as u32;
    let mut field = bits << pad_bits;
    if fmt.event_tag_size > 0 {
        field |= ((event_tag as u64) & mask(fmt.event_tag_size)) << (fmt.item_size as u32 + pad_bits);
    }
    if fmt.channel_tag_size > 0 {
        field |= ((channel_tag as u64) & mask(fmt.channel_tag_size))
            << (fmt.item_size as u32 + fmt.event_tag_size as u32 + pad_bits);
    }
    field
}

/// Splits a field read back off the wire into `(data_item_bits, event_tag,
/// channel_tag)`.
fn split_field(fmt: &PackedPayloadFormat, field: u64) -> (u64, u8, u8) {
    let pad_bits = fmt.field_size as u32 - fmt.min_field_size() as u32;
    let bits = (field >> pad_bits) & mask(fmt.item_size);
    let event_tag = if fmt.event_tag_size > 0 {
        ((field >> (fmt.item_size as u32 + pad_bits)) & mask(fmt.event_tag_size)) as u8
    } else {
        0
    };
    let channel_tag = if fmt.channel_tag_size > 0 {
        ((field >> (fmt.item_size as u32 + fmt.event_tag_size as u32 + pad_bits))
            & mask(fmt.channel_tag_size)) as u8
    } else {
        0
    };
    (bits, event_tag, channel_tag)
}

/// Packs `samples` (one entry per real sample, or per in-phase/quadrature
/// component for complex samples) into a byte buffer according to `fmt`.
///
/// `event_tags`/`channel_tags`, when given, must have one entry per sample
/// and are written into each item's packing field; when omitted, zero tags
/// are written. Returns [`VitaError::UnsupportedFormat`] or
/// [`VitaError::OutOfRange`] without writing any data if the descriptor or
/// any sample value is invalid.
pub fn pack(
    fmt: &PackedPayloadFormat,
    samples: &[Sample],
    event_tags: Option<&[u8]>,
    channel_tags: Option<&[u8]>,
) -> Result<Vec<u8>, VitaError> {
    fmt.validate()?;
    if let Some(tags) = event_tags {
        if tags.len() != samples.len() {
            return Err(VitaError::InvalidLayout(
                "event tag array length must match sample count".into(),
            ));
        }
    }
    if let Some(tags) = channel_tags {
        if tags.len() != samples.len() {
            return Err(VitaError::InvalidLayout(
                "channel tag array length must match sample count".into(),
            ));
        }
    }
    // Validate every sample before writing any bits, per the codec's
    // all-or-nothing contract.
    let bits: Vec<u64> = samples
        .iter()
        .map(|&s| item_to_bits(fmt, s))
        .collect::<Result<_, _>>()?;

    let container_bits = fmt.container_bits();
    let mut writer = BitWriter::new();
    for (i, b) in bits.into_iter().enumerate() {
        let event_tag = event_tags.map(|t| t[i]).unwrap_or(0);
        let channel_tag = channel_tags.map(|t| t[i]).unwrap_or(0);
        let field = build_field(fmt, b, event_tag, channel_tag);
        let container_pad = container_bits - fmt.field_size as u32;
        if container_pad > 0 {
            writer.write_bits(0, container_pad);
        }
        writer.write_bits(field, fmt.field_size as u32);
    }
    Ok(writer.into_bytes())
}

/// Unpacks `count` samples (or sample pairs, for complex formats) from
/// `data` according to `fmt`, pushing any decoded tags onto `event_tags`/
/// `channel_tags` if given.
pub fn unpack(
    fmt: &PackedPayloadFormat,
    data: &[u8],
    count: usize,
    mut event_tags: Option<&mut Vec<u8>>,
    mut channel_tags: Option<&mut Vec<u8>>,
) -> Result<Vec<Sample>, VitaError> {
    fmt.validate()?;
    let components = fmt.sample_component.components();
    let total_items = count * components;
    let container_bits = fmt.container_bits();
    let container_pad = container_bits - fmt.field_size as u32;
    let mut reader = BitReader::new(data);
    let mut out = Vec::with_capacity(total_items);
    for _ in 0..total_items {
        if container_pad > 0 {
            reader.read_bits(container_pad)?;
        }
        let field = reader.read_bits(fmt.field_size as u32)?;
        let (bits, event_tag, channel_tag) = split_field(fmt, field);
        if let Some(tags) = event_tags.as_deref_mut() {
            tags.push(event_tag);
        }
        if let Some(tags) = channel_tags.as_deref_mut() {
            tags.push(channel_tag);
        }
        out.push(bits_to_item(fmt, bits));
    }
    Ok(out)
}

/// Convenience wrapper for real-valued integer formats with no tags: packs
/// plain `i64` samples.
pub fn pack_ints(fmt: &PackedPayloadFormat, samples: &[i64]) -> Result<Vec<u8>, VitaError> {
    let samples: Vec<Sample> = samples.iter().map(|&v| Sample::Int(v)).collect();
    pack(fmt, &samples, None, None)
}

/// Convenience wrapper for real-valued integer formats with no tags:
/// unpacks plain `i64` samples.
pub fn unpack_ints(fmt: &PackedPayloadFormat, data: &[u8], count: usize) -> Result<Vec<i64>, VitaError> {
    unpack(fmt, data, count, None, None)?
        .into_iter()
        .map(|s| match s {
            Sample::Int(v) => Ok(v),
            Sample::Float(_) => Err(VitaError::UnsupportedFormat(
                "format does not hold integer samples".into(),
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_fmt(processing_efficient: bool, bits: u8) -> PackedPayloadFormat {
        PackedPayloadFormat::new(
            processing_efficient,
            SampleComponent::Real,
            DataItemFormat::SignedInt,
            bits,
        )
        .unwrap()
    }

    /// spec.md section 8 scenario 5: pack [0, 1, 2047, -1, -2048] as signed
    /// 12-bit samples; unpack must yield the exact same values, and
    /// link-efficient packing must produce 8 bytes (5 * 12 = 60 bits,
    /// rounded up to the next 32-bit word).
    #[test]
    fn scenario_5_signed_12_bit_link_efficient() {
        let fmt = int_fmt(false, 12);
        let values = [0i64, 1, 2047, -1, -2048];
        let samples: Vec<Sample> = values.iter().map(|&v| Sample::Int(v)).collect();
        let packed = pack(&fmt, &samples, None, None).unwrap();
        assert_eq!(packed.len(), 8);
        let unpacked = unpack(&fmt, &packed, values.len(), None, None).unwrap();
        for (v, s) in values.iter().zip(unpacked.iter()) {
            assert_eq!(*s, Sample::Int(*v));
        }
    }

    /// Same values, processing-efficient mode: each 12-bit item is rounded
    /// up to its own 32-bit container, so 5 samples take 5 words (20
    /// bytes). Still bit-exact on round trip.
    #[test]
    fn scenario_5_signed_12_bit_processing_efficient() {
        let fmt = int_fmt(true, 12);
        let values = [0i64, 1, 2047, -1, -2048];
        let packed = pack_ints(&fmt, &values).unwrap();
        assert_eq!(packed.len(), 20);
        let unpacked = unpack_ints(&fmt, &packed, values.len()).unwrap();
        assert_eq!(unpacked, values);
    }

    #[test]
    fn round_trip_signed_int8_full_range() {
        let fmt = int_fmt(true, 8);
        let values: Vec<i64> = (-128..128).collect();
        let packed = pack_ints(&fmt, &values).unwrap();
        let unpacked = unpack_ints(&fmt, &packed, values.len()).unwrap();
        assert_eq!(unpacked, values);
    }

    #[test]
    fn round_trip_unsigned_int_rejects_out_of_range() {
        let fmt = PackedPayloadFormat::new(
            true,
            SampleComponent::Real,
            DataItemFormat::UnsignedInt,
            4,
        )
        .unwrap();
        assert!(pack_ints(&fmt, &[16]).is_err());
        assert!(pack_ints(&fmt, &[-1]).is_err());
        let packed = pack_ints(&fmt, &[0, 15]).unwrap();
        assert_eq!(unpack_ints(&fmt, &packed, 2).unwrap(), vec![0, 15]);
    }

    #[test]
    fn signed_int_rejects_out_of_range_values() {
        let fmt = int_fmt(true, 4);
        assert!(matches!(
            pack_ints(&fmt, &[8]),
            Err(VitaError::OutOfRange)
        ));
        assert!(matches!(
            pack_ints(&fmt, &[-9]),
            Err(VitaError::OutOfRange)
        ));
    }

    #[test]
    fn round_trip_with_event_and_channel_tags() {
        let mut fmt = int_fmt(false, 8);
        fmt.set_event_tag_size(3).unwrap();
        fmt.set_channel_tag_size(2).unwrap();
        let samples = vec![Sample::Int(5), Sample::Int(-5)];
        let event_tags = [3u8, 1];
        let channel_tags = [2u8, 0];
        let packed = pack(&fmt, &samples, Some(&event_tags), Some(&channel_tags)).unwrap();
        let mut out_event = Vec::new();
        let mut out_channel = Vec::new();
        let unpacked = unpack(
            &fmt,
            &packed,
            2,
            Some(&mut out_event),
            Some(&mut out_channel),
        )
        .unwrap();
        assert_eq!(unpacked, samples);
        assert_eq!(out_event, event_tags);
        assert_eq!(out_channel, channel_tags);
    }

    #[test]
    fn round_trip_complex_float32() {
        let fmt = PackedPayloadFormat::new(
            true,
            SampleComponent::ComplexCartesian,
            DataItemFormat::Float32,
            32,
        )
        .unwrap();
        let samples: Vec<Sample> = [0.5, -0.25, 1.5, 2.25]
            .into_iter()
            .map(Sample::Float)
            .collect();
        let packed = pack(&fmt, &samples, None, None).unwrap();
        let unpacked = unpack(&fmt, &packed, 2, None, None).unwrap();
        assert_eq!(unpacked, samples);
    }

    #[test]
    fn round_trip_vrt_float_approximate() {
        let fmt = PackedPayloadFormat::new(
            true,
            SampleComponent::Real,
            DataItemFormat::SignedVrtFloat(4),
            16,
        )
        .unwrap();
        let samples = [0.5, -0.5, 0.125];
        let packed: Vec<u8> = pack(
            &fmt,
            &samples.iter().map(|&v| Sample::Float(v)).collect::<Vec<_>>(),
            None,
            None,
        )
        .unwrap();
        let unpacked = unpack(&fmt, &packed, samples.len(), None, None).unwrap();
        for (a, s) in samples.iter().zip(unpacked.iter()) {
            let Sample::Float(b) = s else { panic!("expected float sample") };
            assert!((a - b).abs() < 0.01, "{a} vs {b}");
        }
    }

    #[test]
    fn rejects_vrt_float_with_dsize_leq_exp_bits_plus_one() {
        assert!(PackedPayloadFormat::new(
            true,
            SampleComponent::Real,
            DataItemFormat::SignedVrtFloat(6),
            6,
        )
        .is_err());
    }

    #[test]
    fn rejects_ieee_width_mismatch() {
        assert!(PackedPayloadFormat::new(
            true,
            SampleComponent::Real,
            DataItemFormat::Float32,
            16,
        )
        .is_err());
    }

    #[test]
    fn unpack_fails_on_truncated_data() {
        let fmt = int_fmt(true, 32);
        let data = [0u8; 2];
        assert!(unpack_ints(&fmt, &data, 1).is_err());
    }
}
