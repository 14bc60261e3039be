// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
VITA Radio Link (VRL) framing layer (ANSI/VITA-49.1-2015 section 6), which
wraps one or more VRT packets in a frame with its own length field, frame
counter, and optional CRC-32 trailer.
*/

use crate::{crc32, VitaError, Vrt};
use deku::prelude::*;

/// Frame Alignment Word that opens every VRL frame: ASCII `"VRLP"`.
pub const VRL_FAW: [u8; 4] = *b"VRLP";

/// Sentinel trailer value meaning "no CRC present", ASCII `"VEND"`.
pub const VRL_NO_CRC: [u8; 4] = *b"VEND";

const HEADER_LEN: usize = 8; // FAW + frame_count/frame_size word
const TRAILER_LEN: usize = 4;

/// A single VRL frame: a four-byte FAW, a 32-bit word combining the frame
/// counter and frame size, zero or more contiguous VRT packets, and a
/// four-byte trailer that is either a CRC-32 or the [`VRL_NO_CRC`] sentinel.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VrlFrame {
    frame_count: u16,
    payload: Vec<u8>,
    has_crc: bool,
}

impl VrlFrame {
    /// Creates a new, empty VRL frame with the given frame counter
    /// (taken mod 4096) and no CRC.
    pub fn new(frame_count: u16) -> Self {
        Self {
            frame_count: frame_count & 0x0FFF,
            payload: Vec::new(),
            has_crc: false,
        }
    }

    /// Frame counter, 0..4095, incrementing (with wraparound) once per
    /// frame transmitted on a given link.
    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }

    /// Sets the frame counter, masking to 12 bits.
    pub fn set_frame_count(&mut self, count: u16) {
        self.frame_count = count & 0x0FFF;
    }

    /// Whether this frame will be written with a CRC-32 trailer (as opposed
    /// to the no-CRC sentinel).
    pub fn has_crc(&self) -> bool {
        self.has_crc
    }

    /// Enables or disables writing a CRC-32 trailer.
    pub fn set_has_crc(&mut self, has_crc: bool) {
        self.has_crc = has_crc;
    }

    /// Appends a VRT packet's wire bytes to this frame's payload.
    pub fn add_packet(&mut self, packet: &Vrt) -> Result<(), VitaError> {
        self.payload.extend_from_slice(
            &packet
                .to_bytes()
                .map_err(|e| VitaError::InvalidLayout(e.to_string()))?,
        );
        Ok(())
    }

    /// The frame size in 32-bit words, including the 2-word header and the
    /// 1-word trailer, per the wire field's definition.
    pub fn frame_size_words(&self) -> u32 {
        ((HEADER_LEN + self.payload.len() + TRAILER_LEN) / 4) as u32
    }

    /// Serializes this frame, including FAW, header word, payload, and
    /// trailer (CRC-32 or the no-CRC sentinel).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.payload.len() + TRAILER_LEN);
        out.extend_from_slice(&VRL_FAW);
        let header_word = ((self.frame_count as u32) << 20) | self.frame_size_words();
        out.extend_from_slice(&header_word.to_be_bytes());
        out.extend_from_slice(&self.payload);
        if self.has_crc {
            let crc = crc32(&out);
            out.extend_from_slice(&crc.to_be_bytes());
        } else {
            out.extend_from_slice(&VRL_NO_CRC);
        }
        out
    }

    /// Parses a single VRL frame from the front of `data`, returning the
    /// frame and the number of bytes consumed.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), VitaError> {
        if data.len() < HEADER_LEN + TRAILER_LEN {
            return Err(VitaError::InvalidLayout("buffer too short for a VRL frame header/trailer".into()));
        }
        if data[0..4] != VRL_FAW {
            return Err(VitaError::InvalidLayout("missing VRLP frame alignment word".into()));
        }
        let header_word = u32::from_be_bytes(data[4..8].try_into().unwrap());
        let frame_count = ((header_word >> 20) & 0x0FFF) as u16;
        let frame_size_words = header_word & 0x000F_FFFF;
        let frame_len = frame_size_words as usize * 4;
        if frame_len < HEADER_LEN + TRAILER_LEN || frame_len > data.len() {
            return Err(VitaError::InvalidLayout(format!(
                "frame size ({frame_size_words} words) inconsistent with available data"
            )));
        }
        let payload_end = frame_len - TRAILER_LEN;
        let payload = data[HEADER_LEN..payload_end].to_vec();
        let trailer = &data[payload_end..frame_len];
        let has_crc = trailer != VRL_NO_CRC;
        if has_crc {
            let expected = u32::from_be_bytes(trailer.try_into().unwrap());
            let computed = crc32(&data[..payload_end]);
            if expected != computed {
                return Err(VitaError::CRCMismatch { expected, computed });
            }
        }
        Ok((
            VrlFrame {
                frame_count,
                payload,
                has_crc,
            },
            frame_len,
        ))
    }

    /// Iterates over the VRT packets contained in this frame's payload.
    pub fn packets(&self) -> VrlPacketIter<'_> {
        VrlPacketIter::new(&self.payload)
    }
}

/// Iterator over the VRT packets contained in a [`VrlFrame`]'s payload.
/// Packets are located one after another using each packet's own 16-bit
/// size-in-words field, so a malformed or truncated payload simply ends
/// iteration early.
pub struct VrlPacketIter<'a> {
    data: &'a [u8],
}

impl<'a> VrlPacketIter<'a> {
    /// Creates an iterator over the VRT packets packed contiguously in
    /// `data`, shared by [`VrlFrame::packets`] and
    /// [`crate::vra::VraFile::packets`].
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for VrlPacketIter<'a> {
    type Item = Vrt;

    fn next(&mut self) -> Option<Vrt> {
        if self.data.len() < 4 {
            return None;
        }
        let packet = Vrt::try_from(self.data).ok()?;
        let size_bytes = packet.header().packet_size() as usize * 4;
        if size_bytes == 0 || size_bytes > self.data.len() {
            self.data = &[];
            return None;
        }
        self.data = &self.data[size_bytes..];
        Some(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_empty_frame_no_crc() {
        let frame = VrlFrame::new(7);
        let bytes = frame.to_bytes();
        assert_eq!(&bytes[0..4], &VRL_FAW);
        assert_eq!(&bytes[bytes.len() - 4..], &VRL_NO_CRC);
        let (parsed, consumed) = VrlFrame::from_bytes(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(parsed.frame_count(), 7);
        assert!(!parsed.has_crc());
    }

    #[test]
    fn round_trip_with_crc() {
        let mut frame = VrlFrame::new(4095);
        frame.set_has_crc(true);
        let packet = Vrt::new_signal_data_packet();
        frame.add_packet(&packet).unwrap();
        let bytes = frame.to_bytes();
        let (parsed, consumed) = VrlFrame::from_bytes(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert!(parsed.has_crc());
        assert_eq!(parsed.packets().count(), 1);
    }

    #[test]
    fn rejects_bad_faw() {
        let bytes = vec![0u8; 12];
        assert!(VrlFrame::from_bytes(&bytes).is_err());
    }

    #[test]
    fn rejects_crc_mismatch() {
        let mut frame = VrlFrame::new(1);
        frame.set_has_crc(true);
        let mut bytes = frame.to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert!(matches!(
            VrlFrame::from_bytes(&bytes),
            Err(VitaError::CRCMismatch { .. })
        ));
    }
}
