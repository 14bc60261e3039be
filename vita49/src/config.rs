// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Process-wide configuration for the `vita49` crate, mirroring the reference
implementation's `VRTConfig`. A single [`VrtConfig`] is settable once (best
effort) before the first packet is built or parsed; after that, readers
should treat it as fixed.
*/

use std::sync::OnceLock;

/// Selects which revision of the VITA 49 standard packets are built/parsed
/// against. Most wire-level behavior is identical across versions; this
/// mainly affects default strictness and which CIF7/attribute-multiplier
/// behaviors are assumed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum ProtocolVersion {
    /// ANSI/VITA 49.0-2007.
    V49_0,
    /// ANSI/VITA 49.0b-2015.
    V49_0B,
    /// ANSI/VITA 49.2-2017.
    #[default]
    V49_2,
}

/// Whether to use the NORAD/IERS leap second convention or a caller-provided
/// table when resolving UTC/GPS epoch offsets.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum NoradLeapSeconds {
    /// Use the built-in NORAD leap-second convention.
    #[default]
    Norad,
    /// Defer to a caller-supplied [`crate::LeapSecondsProvider`].
    Custom,
}

/// Process-wide configuration. Construct with [`VrtConfig::default`] and
/// install it with [`VrtConfig::set_global`] before building or parsing any
/// packets; [`VrtConfig::global`] returns the installed configuration (or
/// the default, if none was installed).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VrtConfig {
    /// The protocol version packets are built/parsed against.
    pub version: ProtocolVersion,
    /// When true, parsing rejects packets with reserved bits set or other
    /// minor non-conformance rather than silently tolerating them.
    pub strict: bool,
    /// Prefer IPv6 representations for network-addressed fields where both
    /// IPv4 and IPv6 forms are possible.
    pub prefer_ipv6: bool,
    /// Filename of an on-disk leap second table, if any.
    pub leap_seconds_filename: Option<String>,
    /// Which leap second convention to use.
    pub leap_seconds_mode: NoradLeapSeconds,
}

impl Default for VrtConfig {
    fn default() -> Self {
        Self {
            version: ProtocolVersion::default(),
            strict: true,
            prefer_ipv6: false,
            leap_seconds_filename: None,
            leap_seconds_mode: NoradLeapSeconds::default(),
        }
    }
}

static GLOBAL_CONFIG: OnceLock<VrtConfig> = OnceLock::new();

impl VrtConfig {
    /// Installs `self` as the process-wide configuration.
    ///
    /// # Errors
    /// Returns `self` back to the caller if a configuration has already
    /// been installed; the global config can only be set once.
    pub fn set_global(self) -> Result<(), VrtConfig> {
        GLOBAL_CONFIG.set(self)
    }

    /// Returns the installed process-wide configuration, or the default
    /// configuration if none has been installed yet.
    pub fn global() -> &'static VrtConfig {
        GLOBAL_CONFIG.get_or_init(VrtConfig::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict_v49_2() {
        let cfg = VrtConfig::default();
        assert!(cfg.strict);
        assert_eq!(cfg.version, ProtocolVersion::V49_2);
    }
}
