//! Client locale codes.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Every locale the client ships, in the order the client lists them.
const LOCALES: [&str; 14] = [
    "enus", "dede", "eses", "esmx", "frfr", "itit", "jajp", "kokr", "plpl", "ptbr", "ruru", "thth",
    "zhcn", "zhtw",
];

/// A supported locale code such as `enus` or `zhcn`.
///
/// `enus` is the base locale: base catalog entries are its assets, so it is
/// never redirected through a locale catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(&'static str);

impl Locale {
    /// The base locale.
    pub const ENUS: Self = Self("enus");

    /// Iterate over every supported locale.
    pub fn all() -> impl Iterator<Item = Locale> {
        LOCALES.iter().map(|code| Self(*code))
    }

    /// Get the locale code.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Check if this is the base locale.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.0 == Self::ENUS.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ENUS
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({})", self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        LOCALES
            .iter()
            .find(|code| **code == lower)
            .map(|code| Self(*code))
            .ok_or_else(|| Error::UnknownLocale(s.to_string()))
    }
}

impl serde::Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
