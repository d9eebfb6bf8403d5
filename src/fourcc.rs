//! MP4 atom FourCC.
//! See <https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFChap2/qtff2.html#//apple_ref/doc/uid/TP40000939-CH204-56313>.
//! Only atoms relevant to timestamp extraction are named;
//! everything else maps to `Custom` and is skipped by the walker.

/// MP4 atom Four CC.
/// See <https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFChap2/qtff2.html#//apple_ref/doc/uid/TP40000939-CH204-56313>.
#[derive(Debug, Clone, PartialEq)]
pub enum FourCC {
    /// File type compatibility atom
    Ftyp,
    /// Free space atom
    Free,
    /// Metadata item list atom
    Ilst,
    /// Metadata item keys atom
    Keys,
    /// Media data atom
    Mdat,
    /// Metadata container atom
    Meta,
    /// Movie atom
    Moov,
    /// Movie header atom
    Mvhd,
    /// User data atom
    Udta,
    /// Reserved space atom
    Wide,

    Custom(String)
}

impl FourCC {
    pub fn from_slice(fourcc: &[u8]) -> Self {
        match fourcc {
            b"ftyp" => Self::Ftyp,
            b"free" => Self::Free,
            b"ilst" => Self::Ilst,
            b"keys" => Self::Keys,
            b"mdat" => Self::Mdat,
            b"meta" => Self::Meta,
            b"moov" => Self::Moov,
            b"mvhd" => Self::Mvhd,
            b"udta" => Self::Udta,
            b"wide" => Self::Wide,

            _ => Self::Custom(String::from_utf8_lossy(fourcc).to_string()),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_slice(&value.to_be_bytes())
    }

    pub fn from_str(fourcc: &str) -> Self {
        match fourcc {
            "ftyp" => Self::Ftyp,
            "free" => Self::Free,
            "ilst" => Self::Ilst,
            "keys" => Self::Keys,
            "mdat" => Self::Mdat,
            "meta" => Self::Meta,
            "moov" => Self::Moov,
            "mvhd" => Self::Mvhd,
            "udta" => Self::Udta,
            "wide" => Self::Wide,
            _ => Self::Custom(fourcc.to_owned()),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::Ftyp => "ftyp",
            Self::Free => "free",
            Self::Ilst => "ilst",
            Self::Keys => "keys",
            Self::Mdat => "mdat",
            Self::Meta => "meta",
            Self::Moov => "moov",
            Self::Mvhd => "mvhd",
            Self::Udta => "udta",
            Self::Wide => "wide",
            Self::Custom(s) => s.as_str()
        }
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Custom("None".to_owned())
    }
}
