//! Format detection and registration metadata.

use crate::container::{HEADER_LEN, KTX_SIGNATURE};

/// Image formats this crate recognizes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Khronos KTX 1.1 texture container.
    Ktx,
}

impl ImageFormat {
    /// Detect format from magic bytes. Returns `None` if unrecognized.
    ///
    /// KTX 2.0 files (`«KTX 20»`) are not recognized.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() >= KTX_SIGNATURE.len() && data[..KTX_SIGNATURE.len()] == KTX_SIGNATURE {
            return Some(ImageFormat::Ktx);
        }
        None
    }

    /// Detect format from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("ktx") {
            Some(ImageFormat::Ktx)
        } else {
            None
        }
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Ktx => "image/ktx",
        }
    }

    /// Common file extensions.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Ktx => &["ktx"],
        }
    }

    /// Minimum bytes needed to probe dimensions and pixel format.
    pub fn min_probe_bytes(self) -> usize {
        match self {
            ImageFormat::Ktx => HEADER_LEN,
        }
    }

    /// Registration metadata for an image-loading host.
    pub fn info(self) -> &'static FormatInfo {
        match self {
            ImageFormat::Ktx => &FormatInfo::KTX,
        }
    }
}

impl core::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ImageFormat::Ktx => "KTX",
        })
    }
}

/// A byte pattern matched at the start of a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignaturePattern {
    /// Bytes expected at offset 0.
    pub prefix: &'static [u8],
    /// Confidence of a match, 0-100.
    pub relevance: u8,
}

impl SignaturePattern {
    /// Relevance of a match against `data`, 0 when it does not match.
    pub fn relevance_for(&self, data: &[u8]) -> u8 {
        if data.starts_with(self.prefix) {
            self.relevance
        } else {
            0
        }
    }
}

/// What a host needs to register a loader: name, signatures, MIME types and
/// extensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatInfo {
    /// Short identifier.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    pub signatures: &'static [SignaturePattern],
    pub mime_types: &'static [&'static str],
    pub extensions: &'static [&'static str],
    /// Whether one loader may run on several threads at once.
    pub threadsafe: bool,
}

impl FormatInfo {
    /// KTX 1.1 registration.
    pub const KTX: FormatInfo = FormatInfo {
        name: "ktx",
        description: "The KTX image format",
        signatures: &[SignaturePattern {
            prefix: &KTX_SIGNATURE,
            relevance: 100,
        }],
        mime_types: &["image/ktx"],
        extensions: &["ktx"],
        threadsafe: true,
    };

    /// Best signature relevance for `data`, 0 when nothing matches.
    pub fn sniff(&self, data: &[u8]) -> u8 {
        self.signatures
            .iter()
            .map(|s| s.relevance_for(data))
            .max()
            .unwrap_or(0)
    }
}
