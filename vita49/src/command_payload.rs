// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to command payloads
(ANSI/VITA-49.2-2017 section 8).
*/

use crate::{prelude::*, Ack, Cancellation, Control, ControlAckMode, QueryAck};
use deku::prelude::*;

/// Command payload enumeration. Command payloads can take several different
/// forms depending on various header and CAM fields:
///
/// 1. Control Packet - includes all CIF indicators; in Action Mode 0, CIF
///    data fields are absent, otherwise they are present.
/// 2. Cancellation Packet - only includes CIF indicator fields, never data.
/// 3. Validation ACK - can include warning indicators/fields and error
///    indicators/fields.
/// 4. Exec ACK - same shape as Validation ACK.
/// 5. Query ACK - similar to a context packet; includes all CIF indicators
///    and fields.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, DekuRead, DekuWrite)]
#[deku(
    endian = "endian",
    ctx = "endian: deku::ctx::Endian, cam: &ControlAckMode, packet_header: &PacketHeader",
    id = "CommandPayload::derive_type(cam, packet_header)"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandPayload {
    /// Payload for a control packet.
    #[deku(id = "CommandPayload::Control(_)")]
    Control(Control),
    /// Payload for a cancellation packet.
    #[deku(id = "CommandPayload::Cancellation(_)")]
    Cancellation(Cancellation),
    /// Payload for a validation ACK packet.
    #[deku(id = "CommandPayload::ValidationAck(_)")]
    ValidationAck(#[deku(ctx = "cam")] Ack),
    /// Payload for an execution ACK packet.
    #[deku(id = "CommandPayload::ExecAck(_)")]
    ExecAck(#[deku(ctx = "cam")] Ack),
    /// Payload for a query ACK packet.
    #[deku(id = "CommandPayload::QueryAck(_)")]
    QueryAck(QueryAck),
}

impl CommandPayload {
    /// Determine the type of command payload based on CAM field and VRT packet header.
    fn derive_type(cam: &ControlAckMode, packet_header: &PacketHeader) -> CommandPayload {
        if packet_header.is_ack_packet().unwrap() {
            if [cam.validation(), cam.execution(), cam.state()]
                .iter()
                .filter(|&x| *x)
                .count()
                != 1
            {
                panic!("CAM field in ACK packet does not exclusively select one of Validation, Exec, or Query");
            }
            if cam.validation() {
                CommandPayload::ValidationAck(Ack::default())
            } else if cam.execution() {
                CommandPayload::ExecAck(Ack::default())
            } else if cam.state() {
                CommandPayload::QueryAck(QueryAck::default())
            } else {
                unreachable!()
            }
        } else if packet_header.is_cancellation_packet().unwrap() {
            CommandPayload::Cancellation(Cancellation::default())
        } else {
            CommandPayload::Control(Control::default())
        }
    }

    /// Get the size of the command payload (in 32-bit words).
    pub fn size_words(&self) -> u16 {
        match self {
            CommandPayload::Control(p) => p.size_words(),
            CommandPayload::Cancellation(p) => p.size_words(),
            CommandPayload::ValidationAck(p) => p.size_words(),
            CommandPayload::ExecAck(p) => p.size_words(),
            CommandPayload::QueryAck(p) => p.size_words(),
        }
    }

    /// Gets a reference to the control payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a control packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let packet = Vrt::new_control_packet();
    /// let command = packet.payload().command().unwrap();
    /// let control = command.payload().control().unwrap();
    /// assert_eq!(control.bandwidth_hz(), None);
    /// ```
    pub fn control(&self) -> Result<&Control, VitaError> {
        match self {
            CommandPayload::Control(p) => Ok(p),
            _ => Err(VitaError::ControlOnly),
        }
    }

    /// Gets a mutable reference to the control payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a control packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_control_packet();
    /// let command = packet.payload_mut().command_mut().unwrap();
    /// let control = command.payload_mut().control_mut().unwrap();
    /// control.set_bandwidth_hz(Some(64e6));
    /// assert_eq!(control.bandwidth_hz(), Some(64e6));
    /// ```
    pub fn control_mut(&mut self) -> Result<&mut Control, VitaError> {
        match self {
            CommandPayload::Control(p) => Ok(p),
            _ => Err(VitaError::ControlOnly),
        }
    }

    /// Gets a reference to the cancellation payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a cancellation packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let packet = Vrt::new_cancellation_packet();
    /// let command = packet.payload().command().unwrap();
    /// let cancel = command.payload().cancellation().unwrap();
    /// assert!(!cancel.cif0().bandwidth());
    /// ```
    pub fn cancellation(&self) -> Result<&Cancellation, VitaError> {
        match self {
            CommandPayload::Cancellation(p) => Ok(p),
            _ => Err(VitaError::CancellationOnly),
        }
    }

    /// Gets a mutable reference to the cancellation payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a cancellation packet.
    ///
    /// # Example
    /// ```
    /// use vita49::prelude::*;
    /// let mut packet = Vrt::new_cancellation_packet();
    /// let command = packet.payload_mut().command_mut().unwrap();
    /// let cancel = command.payload_mut().cancellation_mut().unwrap();
    /// cancel.cif0_mut().set_bandwidth();
    /// assert!(cancel.cif0().bandwidth());
    /// ```
    pub fn cancellation_mut(&mut self) -> Result<&mut Cancellation, VitaError> {
        match self {
            CommandPayload::Cancellation(p) => Ok(p),
            _ => Err(VitaError::CancellationOnly),
        }
    }

    /// Gets a reference to the validation ack payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a validation ack packet.
    pub fn validation_ack(&self) -> Result<&Ack, VitaError> {
        match self {
            CommandPayload::ValidationAck(p) => Ok(p),
            _ => Err(VitaError::ValidationAckOnly),
        }
    }

    /// Gets a mutable reference to the validation ack payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a validation ack packet.
    pub fn validation_ack_mut(&mut self) -> Result<&mut Ack, VitaError> {
        match self {
            CommandPayload::ValidationAck(p) => Ok(p),
            _ => Err(VitaError::ValidationAckOnly),
        }
    }

    /// Gets a reference to the exec ack payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than an exec ack packet.
    pub fn exec_ack(&self) -> Result<&Ack, VitaError> {
        match self {
            CommandPayload::ExecAck(p) => Ok(p),
            _ => Err(VitaError::ExecAckOnly),
        }
    }

    /// Gets a mutable reference to the exec ack payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than an exec ack packet.
    pub fn exec_ack_mut(&mut self) -> Result<&mut Ack, VitaError> {
        match self {
            CommandPayload::ExecAck(p) => Ok(p),
            _ => Err(VitaError::ExecAckOnly),
        }
    }

    /// Gets a reference to the query ack payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a query ack packet.
    pub fn query_ack(&self) -> Result<&QueryAck, VitaError> {
        match self {
            CommandPayload::QueryAck(p) => Ok(p),
            _ => Err(VitaError::QueryAckOnly),
        }
    }

    /// Gets a mutable reference to the query ack payload.
    ///
    /// # Errors
    /// Returns an error if run on anything other than a query ack packet.
    pub fn query_ack_mut(&mut self) -> Result<&mut QueryAck, VitaError> {
        match self {
            CommandPayload::QueryAck(p) => Ok(p),
            _ => Err(VitaError::QueryAckOnly),
        }
    }
}
