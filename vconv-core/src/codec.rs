//! Video codec and ProRes profile selections.
//!
//! These replace free-form codec strings: a request either carries a known
//! codec or none at all, and a profile is a closed set of ProRes variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Video codecs the converter can hand to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Codec {
    #[serde(rename = "libx264")]
    Libx264,
    #[serde(rename = "libx265")]
    Libx265,
    #[serde(rename = "libvpx-vp9")]
    LibvpxVp9,
    #[serde(rename = "prores_ks")]
    ProresKs,
}

impl Codec {
    /// All codecs, in the order they are offered to the user.
    pub const ALL: [Codec; 4] = [
        Codec::Libx264,
        Codec::Libx265,
        Codec::LibvpxVp9,
        Codec::ProresKs,
    ];

    /// The encoder's name for this codec, as passed to `-c:v`.
    pub fn as_str(self) -> &'static str {
        match self {
            Codec::Libx264 => "libx264",
            Codec::Libx265 => "libx265",
            Codec::LibvpxVp9 => "libvpx-vp9",
            Codec::ProresKs => "prores_ks",
        }
    }

    /// Whether this codec accepts a `-profile:v` selection.
    pub fn supports_profile(self) -> bool {
        self == Codec::ProresKs
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown codec '{0}' (expected one of: libx264, libx265, libvpx-vp9, prores_ks)")]
pub struct ParseCodecError(String);

impl FromStr for Codec {
    type Err = ParseCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Codec::ALL
            .into_iter()
            .find(|codec| codec.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCodecError(s.to_string()))
    }
}

/// ProRes encoder profiles, numbered as `prores_ks` expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProresProfile {
    Proxy,
    Lt,
    Standard,
    Hq,
}

impl ProresProfile {
    pub const ALL: [ProresProfile; 4] = [
        ProresProfile::Proxy,
        ProresProfile::Lt,
        ProresProfile::Standard,
        ProresProfile::Hq,
    ];

    /// Value passed to `-profile:v`.
    pub fn as_arg(self) -> &'static str {
        match self {
            ProresProfile::Proxy => "0",
            ProresProfile::Lt => "1",
            ProresProfile::Standard => "2",
            ProresProfile::Hq => "3",
        }
    }

    /// Human readable label, e.g. "HQ (3)".
    pub fn label(self) -> &'static str {
        match self {
            ProresProfile::Proxy => "Proxy (0)",
            ProresProfile::Lt => "LT (1)",
            ProresProfile::Standard => "Normal (2)",
            ProresProfile::Hq => "HQ (3)",
        }
    }
}

impl fmt::Display for ProresProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown ProRes profile '{0}' (expected 0-3 or proxy, lt, normal, hq)")]
pub struct ParseProfileError(String);

impl FromStr for ProresProfile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "proxy" => Ok(ProresProfile::Proxy),
            "1" | "lt" => Ok(ProresProfile::Lt),
            "2" | "normal" | "standard" => Ok(ProresProfile::Standard),
            "3" | "hq" => Ok(ProresProfile::Hq),
            _ => Err(ParseProfileError(s.to_string())),
        }
    }
}
