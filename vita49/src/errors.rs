// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Error types/enumerations for the `vita49` crate.
*/

use thiserror::Error;

/// Generic `vita49` crate error enumeration.
#[derive(Error, Debug)]
pub enum VitaError {
    /// Indicates a payload that requires an even number of 32-bit words
    /// was given something else.
    #[error("payload must be an even number of 32-bit words")]
    PayloadUneven32BitWords,
    /// Error given when a function that can only operate on signal
    /// data packets is executed on something else.
    #[error("function can only run on signal data packets")]
    SignalDataOnly,
    /// Error given when a function that can only operate on context
    /// packets is executed on something else.
    #[error("function can only run on context packets")]
    ContextOnly,
    /// Error given when a function that can only operate on command
    /// packets is executed on something else.
    #[error("function can only run on command packets")]
    CommandOnly,
    /// Error given when a function that can only operate on control
    /// sub-packets is executed on something else.
    #[error("function can only run on control command packets")]
    ControlOnly,
    /// Error given when a function that can only operate on cancellation
    /// sub-packets is executed on something else.
    #[error("function can only run on cancellation command packets")]
    CancellationOnly,
    /// Error given when a function that can only operate on validation ACK
    /// sub-packets is executed on something else.
    #[error("function can only run on validation ACK command packets")]
    ValidationAckOnly,
    /// Error given when a function that can only operate on execution ACK
    /// sub-packets is executed on something else.
    #[error("function can only run on execution ACK command packets")]
    ExecAckOnly,
    /// Error given when a function that can only operate on query ACK
    /// sub-packets is executed on something else.
    #[error("function can only run on query ACK command packets")]
    QueryAckOnly,
    /// Error given when attempting to set a timestamp field with a
    /// Tsi or Tsf mode that doesn't make sense.
    #[error("attempted to set timestamp field with Tsi/Tsf mode that doesn't make sense")]
    TimestampModeMismatch,
    /// Error given when attempting to use a controller/controllee ID
    /// while the UUID is set. ID and UUID are mutually exclusive.
    #[error("attempted to set controllee/controller ID field when UUID field is set")]
    TriedIdWhenUuidSet,
    /// Error given when attempting to use a controller/controllee UUID
    /// while the ID is set. ID and UUID are mutually exclusive.
    #[error("attempted to set controllee/controller UUID field when ID field is set")]
    TriedUuidWhenIdSet,
    /// Error given when attempting to use an out-of-range value.
    #[error("out of range")]
    OutOfRange,
    /// Error given when trying to set a reserved value.
    #[error("attempted to set reserved field")]
    ReservedField,
    /// Error given when attempting to mutate a packet or buffer that is
    /// backed by a read-only (borrowed, non-mutable) byte slice.
    #[error("attempted to mutate a read-only buffer")]
    ReadOnly,
    /// Error given when a VRL frame, VRA file, or packed payload does not
    /// follow the layout required by its format (bad FAW, truncated data,
    /// size fields that don't agree with the actual buffer length, etc).
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    /// Error given when an integer value does not correspond to any known
    /// variant of an enumerated wire field.
    #[error("invalid enum value: {0}")]
    InvalidEnum(u32),
    /// Error given when a required field is absent.
    #[error("required field is absent")]
    FieldAbsent,
    /// Error given when a payload format descriptor describes a data type
    /// or packing mode this implementation does not support.
    #[error("unsupported payload format: {0}")]
    UnsupportedFormat(String),
    /// Error given when an I/O operation against a storage backend fails.
    #[error("I/O error: {0}")]
    IOError(String),
    /// Error given when a CRC check fails.
    #[error("CRC mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CRCMismatch {
        /// The CRC value read from the wire.
        expected: u32,
        /// The CRC value computed over the actual data.
        computed: u32,
    },
}

impl From<std::io::Error> for VitaError {
    fn from(e: std::io::Error) -> Self {
        VitaError::IOError(e.to_string())
    }
}
