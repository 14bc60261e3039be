// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Primary module for parsing/generating VRT data. This should
be the main entrypoint for any users of this crate.
*/

use crate::command_prelude::*;
use crate::prelude::*;
use crate::Trailer;
use deku::prelude::*;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(endian = "big")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The main VRT data structure that encapsulates all types
/// of VRT packets.
pub struct Vrt {
    /// VRT packet header (present on all packets).
    header: PacketHeader,
    /// Stream identifier.
    #[deku(cond = "header.stream_id_included()")]
    stream_id: Option<u32>,
    /// Class identifier.
    #[deku(cond = "header.class_id_included()")]
    class_id: Option<ClassIdentifier>,
    /// Integer timestamp.
    #[deku(cond = "header.integer_timestamp_included()")]
    integer_timestamp: Option<u32>,
    /// Fractional timestamp.
    #[deku(cond = "header.fractional_timestamp_included()")]
    fractional_timestamp: Option<u64>,
    /// Packet payload. For signal data, this would be raw bytes. For
    /// context, this would be context information, etc..
    #[deku(ctx = "header")]
    payload: Payload,
    /// Data trailer.
    #[deku(cond = "header.trailer_included()")]
    trailer: Option<Trailer>,
}

impl Vrt {
    /// Produce a new signal data packet with some sane defaults.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_stream_id(Some(0xDEADBEEF));
    /// packet.set_signal_payload(&vec![1, 2, 3, 4, 5, 6, 7, 8])?;
    /// assert_eq!(packet.stream_id(), Some(0xDEADBEEF));
    /// assert_eq!(packet.signal_payload()?, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_signal_data_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_signal_data_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::SignalData(SignalData::new()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produce a new context packet with some sane defaults.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_context_packet();
    /// let context: &mut Context = packet.payload_mut().context_mut().unwrap();
    /// context.set_bandwidth_hz(Some(8e6));
    /// assert_eq!(context.bandwidth_hz(), Some(8e6));
    /// ```
    pub fn new_context_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_context_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Context(Context::new()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produce a new control packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_control_packet();
    /// let mut command = packet.payload_mut().command_mut().unwrap();
    /// let mut control = command.payload_mut().control_mut().unwrap();
    /// control.set_bandwidth_hz(Some(8e6));
    /// assert_eq!(control.bandwidth_hz(), Some(8e6));
    /// ```
    pub fn new_control_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_control_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Command(Command::new_control()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produce a new cancellation packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_cancellation_packet();
    /// let mut command = packet.payload_mut().command_mut().unwrap();
    /// let mut cancel = command.payload_mut().cancellation_mut().unwrap();
    /// cancel.cif0_mut().set_bandwidth();
    /// assert!(cancel.cif0().bandwidth());
    /// ```
    pub fn new_cancellation_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_cancellation_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Command(Command::new_cancellation()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produce a new validation ACK packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// use vita49::command_prelude::*;
    /// let mut packet = Vrt::new_validation_ack_packet();
    /// let mut command = packet.payload_mut().command_mut().unwrap();
    /// let mut ack = command.payload_mut().validation_ack_mut().unwrap();
    /// ack.set_bandwidth(AckLevel::Warning, Some(AckResponse::default()));
    /// assert!(ack.bandwidth().is_some());
    /// ```
    pub fn new_validation_ack_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_ack_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Command(Command::new_validation_ack()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produce a new execution ACK packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// use vita49::command_prelude::*;
    /// let mut packet = Vrt::new_exec_ack_packet();
    /// let mut command = packet.payload_mut().command_mut().unwrap();
    /// let mut ack = command.payload_mut().exec_ack_mut().unwrap();
    /// ack.set_bandwidth(AckLevel::Warning, Some(AckResponse::default()));
    /// assert!(ack.bandwidth().is_some());
    /// ```
    pub fn new_exec_ack_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_ack_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Command(Command::new_exec_ack()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Produce a new query ACK packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// use vita49::command_prelude::*;
    /// let mut packet = Vrt::new_query_ack_packet();
    /// let mut command = packet.payload_mut().command_mut().unwrap();
    /// let mut ack = command.payload_mut().query_ack_mut().unwrap();
    /// ack.set_bandwidth_hz(Some(100e6));
    /// assert!(ack.bandwidth_hz().is_some());
    /// ```
    pub fn new_query_ack_packet() -> Vrt {
        let mut ret = Vrt {
            header: PacketHeader::new_ack_header(),
            stream_id: Some(0),
            class_id: None,
            integer_timestamp: None,
            fractional_timestamp: None,
            payload: Payload::Command(Command::new_query_ack()),
            trailer: None,
        };
        ret.update_packet_size();
        ret
    }

    /// Gets a reference to the packet header.
    pub fn header(&self) -> &PacketHeader {
        &self.header
    }
    /// Gets a mutable reference to the packet header.
    pub fn header_mut(&mut self) -> &mut PacketHeader {
        &mut self.header
    }

    /// Get the packet stream ID.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_stream_id(Some(0xDEADBEEF));
    /// assert_eq!(packet.stream_id(), Some(0xDEADBEEF));
    /// ```
    pub fn stream_id(&self) -> Option<u32> {
        self.stream_id
    }

    /// Sets the packet's stream ID. If `None` is passed, the stream ID
    /// field will be unset.
    ///
    /// Note: if the packet type does not match after setting/unsetting,
    /// the packet type will be updated to reflect the change. For example,
    /// if you did `packet.set_stream_id(1)` on a `PacketType::SignalDataWithoutStreamId`,
    /// it would change the packet to a `PacketType:SignalData`.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_stream_id(Some(0xDEADBEEF));
    /// assert_eq!(packet.stream_id(), Some(0xDEADBEEF));
    /// assert!(matches!(packet.header().packet_type(), PacketType::SignalData));
    /// packet.set_stream_id(None);
    /// assert!(matches!(packet.header().packet_type(), PacketType::SignalDataWithoutStreamId));
    /// ```
    pub fn set_stream_id(&mut self, stream_id: Option<u32>) {
        self.stream_id = stream_id;
        if self.stream_id.is_some() {
            match self.header.packet_type() {
                PacketType::SignalDataWithoutStreamId => {
                    self.header.set_packet_type(PacketType::SignalData);
                }
                PacketType::ExtensionDataWithoutStreamId => {
                    self.header.set_packet_type(PacketType::ExtensionData);
                }
                _ => (),
            }
        } else {
            match self.header.packet_type() {
                PacketType::SignalData => {
                    self.header
                        .set_packet_type(PacketType::SignalDataWithoutStreamId);
                }
                PacketType::ExtensionData => {
                    self.header
                        .set_packet_type(PacketType::ExtensionDataWithoutStreamId);
                }
                _ => (),
            }
        }
    }

    /// Gets a reference to the packet class identifier.
    pub fn class_id(&self) -> Option<&ClassIdentifier> {
        self.class_id.as_ref()
    }
    /// Gets the packet class identifier as a mutable reference.
    pub fn class_id_mut(&mut self) -> Option<&mut ClassIdentifier> {
        self.class_id.as_mut()
    }
    /// Set the packet class identifier.
    pub fn set_class_id(&mut self, class_id: Option<ClassIdentifier>) {
        self.class_id = class_id;
    }

    /// Gets the integer timestamp field.
    pub fn integer_timestamp(&self) -> Option<u32> {
        self.integer_timestamp
    }
    /// Sets the integer timestamp field.
    ///
    /// When setting this field, you must also provide a [`Tsi`] mode to indicate what
    /// kind of timestamp is being represented.
    ///
    /// # Errors
    /// If a timestamp and tsi mode are passed that don't work together, this function
    /// will return an error. For example, if `timestamp = Some(123)` and `tsi = Tsi::Null`.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_integer_timestamp(Some(12345), Tsi::Utc)?;
    /// assert_eq!(packet.integer_timestamp(), Some(12345));
    /// # Ok(())
    /// # }
    /// ```
    /// ```should_panic
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// // This call will return an error
    /// packet.set_integer_timestamp(Some(12345), Tsi::Null)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_integer_timestamp(
        &mut self,
        timestamp: Option<u32>,
        tsi: Tsi,
    ) -> Result<(), VitaError> {
        if (timestamp.is_some() && matches!(tsi, Tsi::Null))
            || (timestamp.is_none() && !matches!(tsi, Tsi::Null))
        {
            return Err(VitaError::TimestampModeMismatch);
        }
        self.integer_timestamp = timestamp;
        self.header.set_tsi(tsi);
        Ok(())
    }

    /// Gets the fractional timestamp field.
    pub fn fractional_timestamp(&self) -> Option<u64> {
        self.fractional_timestamp
    }
    /// Sets the fractional timestamp field.
    ///
    /// When setting this field, you must also provide a [`Tsf`] mode to indicate what
    /// kind of timestamp is being represented.
    ///
    /// # Errors
    /// If a timestamp and tsi mode are passed that don't work together, this function
    /// will return an error. For example, if `timestamp = Some(123)` and `tsi = Tsi::Null`.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_fractional_timestamp(Some(12345), Tsf::SampleCount)?;
    /// assert_eq!(packet.fractional_timestamp(), Some(12345));
    /// # Ok(())
    /// # }
    /// ```
    /// ```should_panic
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// // This call will return an error
    /// packet.set_fractional_timestamp(Some(12345), Tsf::Null)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_fractional_timestamp(
        &mut self,
        timestamp: Option<u64>,
        tsf: Tsf,
    ) -> Result<(), VitaError> {
        if (timestamp.is_some() && matches!(tsf, Tsf::Null))
            || (timestamp.is_none() && !matches!(tsf, Tsf::Null))
        {
            return Err(VitaError::TimestampModeMismatch);
        }
        self.fractional_timestamp = timestamp;
        self.header.set_tsf(tsf);
        Ok(())
    }

    /// Gets a reference to the payload enumeration.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Gets a mutable reference to the payload enumeration.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Gets a reference to the trailer.
    pub fn trailer(&self) -> Option<&Trailer> {
        self.trailer.as_ref()
    }

    /// Gets a mutable reference to the trailer.
    pub fn trailer_mut(&mut self) -> Option<&mut Trailer> {
        self.trailer.as_mut()
    }

    /// Get the packet payload as a vector of bytes.
    ///
    /// # Errors
    /// This function should only be used with a signal data packet type. Use
    /// of this function on other packet types will return an error.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_signal_payload(&vec![1, 2, 3, 4, 5, 6, 7, 8])?;
    /// assert_eq!(packet.signal_payload()?, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn signal_payload(&self) -> Result<Vec<u8>, VitaError> {
        Ok(self.payload.signal_data()?.payload())
    }

    /// Set the packet payload to some raw bytes (signal data only).
    ///
    /// # Errors
    /// This function should only be used with a signal data packet type. Use
    /// of this function on other packet types will return an error.
    ///
    /// Internally, the payload is represented as a vector of 32-bit integers.
    /// If you pass a payload of bytes with a length indivisible by 4, the call
    /// will return an error.
    ///
    /// # Example
    /// ```
    /// # use std::io;
    /// use vita49::prelude::*;
    /// # fn main() -> Result<(), VitaError> {
    /// let mut packet = Vrt::new_signal_data_packet();
    /// packet.set_signal_payload(&vec![1, 2, 3, 4, 5, 6, 7, 8])?;
    /// assert_eq!(packet.signal_payload()?, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    /// # Ok(())
    /// # }
    /// ```
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_signal_data_packet();
    /// // Passing in a vector of bytes whose length is not % 4
    /// let ret = packet.set_signal_payload(&vec![1, 2, 3, 4, 5, 6, 7]);
    /// assert!(ret.is_err());
    /// ```
    pub fn set_signal_payload(&mut self, payload: &[u8]) -> Result<(), VitaError> {
        let sig_data = self.payload.signal_data_mut()?;
        sig_data.set_payload(payload)?;
        self.update_packet_size();
        Ok(())
    }

    /// Update the VRT packet header size field to reflect the current contents of
    /// the data structure.
    ///
    /// This function should be executed after making any changes to a packet (i.e
    /// after any functions `set_*()`) to make sure the header size is set correctly
    /// prior to serialization.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_context_packet();
    /// let context = packet.payload_mut().context_mut().unwrap();
    /// context.set_bandwidth_hz(Some(8e6));
    /// context.set_sample_rate_sps(Some(8e6));
    /// packet.update_packet_size();
    /// // ... write the packet
    /// ```
    pub fn update_packet_size(&mut self) {
        let mut packet_size_words = 1;
        if self.header.stream_id_included() {
            packet_size_words += 1;
        }
        if self.header.class_id_included() {
            packet_size_words += 2;
        }
        if self.header.integer_timestamp_included() {
            packet_size_words += 1;
        }
        if self.header.fractional_timestamp_included() {
            packet_size_words += 2;
        }
        if self.header.trailer_included() {
            packet_size_words += 1;
        }

        packet_size_words += self.payload.size_words();

        self.header.set_packet_size(packet_size_words);
    }

    /// Validates this packet's header/length invariants.
    ///
    /// Always checks the serialized packet length against `expected_length`
    /// if it is non-negative (pass a negative value to skip that check).
    ///
    /// Under `strict`, also enforces the header/prologue length law: the
    /// header's `packet_size` field must agree with the packet's actual
    /// serialized length, and must not be stale relative to what
    /// [`Self::update_packet_size`] would compute now. Non-strict callers
    /// skip this so that a packet whose header size hasn't been refreshed
    /// yet (e.g. mid-construction) isn't rejected.
    ///
    /// # Errors
    /// Returns [`VitaError::InvalidLayout`] on any mismatch.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let packet = Vrt::new_signal_data_packet();
    /// let len = packet.to_bytes().unwrap().len() as i32;
    /// assert!(packet.validate(true, -1).is_ok());
    /// assert!(packet.validate(true, len).is_ok());
    /// assert!(packet.validate(true, len + 4).is_err());
    /// ```
    pub fn validate(&self, strict: bool, expected_length: i32) -> Result<(), VitaError> {
        let bytes = self
            .to_bytes()
            .map_err(|e| VitaError::InvalidLayout(e.to_string()))?;
        let actual_len = bytes.len() as i32;
        if expected_length >= 0 && actual_len != expected_length {
            return Err(VitaError::InvalidLayout(format!(
                "packet is {actual_len} bytes, expected {expected_length} bytes"
            )));
        }
        if strict {
            let header_len = self.header.packet_size() as i32 * 4;
            if actual_len != header_len {
                return Err(VitaError::InvalidLayout(format!(
                    "header packet size is {header_len} bytes but serialized packet is {actual_len} bytes"
                )));
            }
            let mut recomputed = self.clone();
            recomputed.update_packet_size();
            if recomputed.header.packet_size() != self.header.packet_size() {
                return Err(VitaError::InvalidLayout(
                    "header packet size is stale relative to the packet's actual contents".into(),
                ));
            }
        }
        Ok(())
    }

    /// Validates this packet using the process-wide [`crate::VrtConfig`]'s
    /// `strict` setting rather than an explicit flag.
    ///
    /// # Errors
    /// See [`Self::validate`].
    pub fn validate_with_config(&self, expected_length: i32) -> Result<(), VitaError> {
        self.validate(crate::config::VrtConfig::global().strict, expected_length)
    }
}

#[cfg(test)]
mod validate_tests {
    use super::*;

    #[test]
    fn validate_accepts_consistent_packet() {
        let packet = Vrt::new_signal_data_packet();
        assert!(packet.validate(false, -1).is_ok());
        assert!(packet.validate(true, -1).is_ok());
    }

    #[test]
    fn validate_checks_expected_length() {
        let packet = Vrt::new_signal_data_packet();
        let actual = packet.to_bytes().unwrap().len() as i32;
        assert!(packet.validate(false, actual).is_ok());
        assert!(matches!(
            packet.validate(false, actual + 4),
            Err(VitaError::InvalidLayout(_))
        ));
    }

    #[test]
    fn validate_strict_catches_stale_packet_size() {
        let mut packet = Vrt::new_signal_data_packet();
        packet.set_signal_payload(&[1, 2, 3, 4]).unwrap();
        // Corrupt the header's packet_size field directly so it disagrees
        // with the packet's actual contents.
        packet.header_mut().set_packet_size(1);
        // Non-strict validation only checks expected_length, so this is
        // still accepted.
        assert!(packet.validate(false, -1).is_ok());
        assert!(matches!(
            packet.validate(true, -1),
            Err(VitaError::InvalidLayout(_))
        ));
    }

    #[test]
    fn validate_with_config_uses_global_strict_default() {
        // Default process-wide config is strict; a packet with a stale
        // header size is rejected without passing `strict` explicitly.
        let mut packet = Vrt::new_signal_data_packet();
        packet.set_signal_payload(&[1, 2, 3, 4]).unwrap();
        packet.header_mut().set_packet_size(1);
        assert!(packet.validate_with_config(-1).is_err());
    }
}

/// A read-only view over a packet's wire bytes.
///
/// Every [`Vrt`] built by this crate fully decodes into owned fields, so
/// there is no "borrowed mutable" packet state to guard; the mutation
/// hazard this type exists to remove is holding onto someone else's byte
/// slice (e.g. a [`crate::vrl::VrlFrame`]'s backing buffer, or a region of
/// a [`crate::vra::VraFile`]) without committing to decoding it into an
/// owned, mutable [`Vrt`]. A `VrtView` exposes only read access; the only
/// way to mutate the data it points to is [`VrtView::to_owned_packet`],
/// which hands back a fully independent, owned copy.
pub struct VrtView<'a> {
    bytes: &'a [u8],
}

impl<'a> VrtView<'a> {
    /// Wraps `bytes` as a read-only packet view without copying them.
    ///
    /// # Errors
    /// Returns [`VitaError::InvalidLayout`] if `bytes` is too short to hold
    /// even a packet header.
    pub fn new(bytes: &'a [u8]) -> Result<Self, VitaError> {
        if bytes.len() < 4 {
            return Err(VitaError::InvalidLayout(
                "packet shorter than a header word".into(),
            ));
        }
        Ok(VrtView { bytes })
    }

    /// Parses and returns the packet header.
    ///
    /// This still decodes the whole packet internally (deku's header
    /// layout depends on context carried on [`Vrt`] itself, so there is no
    /// cheaper standalone header parse) but only hands the caller the
    /// header, not an owned, mutable packet.
    pub fn header(&self) -> Result<PacketHeader, VitaError> {
        Ok(*self.to_owned_packet()?.header())
    }

    /// The raw wire bytes backing this view.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Decodes this view's bytes into an owned, mutable [`Vrt`]. This is
    /// the only way to mutate data reached through a `VrtView`; there is no
    /// in-place mutation path, so an attempt to mutate through a borrowed
    /// view is rejected at compile time rather than with a runtime
    /// [`VitaError::ReadOnly`] check.
    pub fn to_owned_packet(&self) -> Result<Vrt, VitaError> {
        Vrt::try_from(self.bytes).map_err(|e| VitaError::InvalidLayout(e.to_string()))
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;

    #[test]
    fn view_exposes_header_and_raw_bytes() {
        let packet = Vrt::new_signal_data_packet();
        let bytes = packet.to_bytes().unwrap();
        let view = VrtView::new(&bytes).unwrap();
        assert_eq!(view.header().unwrap().packet_type(), PacketType::SignalData);
        assert_eq!(view.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn view_rejects_truncated_bytes() {
        assert!(matches!(
            VrtView::new(&[0u8; 2]),
            Err(VitaError::InvalidLayout(_))
        ));
    }

    #[test]
    fn view_decodes_into_mutable_owned_packet() {
        let packet = Vrt::new_context_packet();
        let bytes = packet.to_bytes().unwrap();
        let view = VrtView::new(&bytes).unwrap();
        let mut owned = view.to_owned_packet().unwrap();
        owned.set_stream_id(Some(0xABCD));
        assert_eq!(owned.stream_id(), Some(0xABCD));
    }
}
