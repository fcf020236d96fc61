//! Media options - which portrait or which sound category to extract.

use std::fmt;

use serde::{Serialize, Serializer};

/// A portrait variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageOption {
    /// Regular card art (`m_PortraitTexturePath`).
    Normal,
    /// Signature card art (`m_SignaturePortraitTexturePath`).
    Signature,
}

impl ImageOption {
    /// Every image option, in canonical order.
    pub const ALL: [ImageOption; 2] = [Self::Normal, Self::Signature];

    /// Option name as used on the command line, in file names and in records.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Signature => "signature",
        }
    }

    /// Look an option up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.name() == name)
    }
}

/// Whether a sound category holds one effect definition or a list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectArity {
    Single,
    List,
}

/// A gameplay sound category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioOption {
    Attack,
    Death,
    Lifetime,
    AdditionalPlay,
    Trigger,
    SubOption,
    ResetGame,
    SubSpell,
}

impl AudioOption {
    /// Every audio option, in canonical order.
    pub const ALL: [AudioOption; 8] = [
        Self::AdditionalPlay,
        Self::Attack,
        Self::Death,
        Self::Lifetime,
        Self::Trigger,
        Self::SubOption,
        Self::ResetGame,
        Self::SubSpell,
    ];

    /// Option name as used on the command line, in directories and in records.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Death => "death",
            Self::Lifetime => "lifetime",
            Self::AdditionalPlay => "additional-play",
            Self::Trigger => "trigger",
            Self::SubOption => "sub-option",
            Self::ResetGame => "reset-game",
            Self::SubSpell => "sub-spell",
        }
    }

    /// Look an option up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.name() == name)
    }

    /// How many effect definitions the card def holds for this category.
    pub const fn arity(self) -> EffectArity {
        match self {
            Self::Attack | Self::Death | Self::Lifetime => EffectArity::Single,
            Self::AdditionalPlay | Self::Trigger | Self::SubOption | Self::ResetGame | Self::SubSpell => {
                EffectArity::List
            }
        }
    }
}

impl fmt::Display for ImageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for AudioOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ImageOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for AudioOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
