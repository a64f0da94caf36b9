//! Tag sets and deterministic tag coloring.

use serde::{Deserialize, Serialize};

/// Normalize a user-typed tag: trimmed and lowercased. Blank input yields `None`.
#[must_use]
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    if tag.is_empty() { None } else { Some(tag) }
}

/// Ordered set of normalized tags.
///
/// Insertion order is kept for display; duplicates and blank entries are
/// dropped on the way in, so every `TagSet` upholds the tag invariants
/// regardless of where its contents came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a tag. Returns `false` when it was blank or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_tag(raw) {
            Some(tag) if !self.0.contains(&tag) => {
                self.0.push(tag);
                true
            },
            _ => false,
        }
    }

    /// Remove a tag. Returns `true` when it was present.
    pub fn remove(&mut self, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        let before = self.0.len();
        self.0.retain(|t| *t != tag);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, raw: &str) -> bool {
        normalize_tag(raw).is_some_and(|tag| self.0.contains(&tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.0
    }
}

/// Palette a tag badge is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Pink,
    Indigo,
}

impl TagColor {
    /// Palette order. Changing it recolors every existing tag.
    pub const PALETTE: [Self; 7] =
        [Self::Red, Self::Green, Self::Blue, Self::Yellow, Self::Purple, Self::Pink, Self::Indigo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
        }
    }
}

/// Map a tag to its badge color.
///
/// Rolling hash over UTF-16 code units: `hash = unit + (hash << 5) - hash`,
/// where the shift operates on the 32-bit truncation of the running value and
/// the subtraction does not wrap. This reproduces the colors of the existing
/// web client bit for bit. Distinct tags may share a color.
#[must_use]
pub fn tag_color(tag: &str) -> TagColor {
    let hash = tag.encode_utf16().fold(0_i64, |acc, unit| {
        #[allow(clippy::cast_possible_truncation, reason = "ToInt32 semantics")]
        let shifted = i64::from((acc as i32).wrapping_shl(5));
        i64::from(unit) + shifted - acc
    });
    let palette_len = TagColor::PALETTE.len() as u64;
    #[allow(clippy::cast_possible_truncation, reason = "remainder is below palette length")]
    let index = (hash.unsigned_abs() % palette_len) as usize;
    TagColor::PALETTE[index]
}
