//! Generation settings and their defaults.

use std::ops::RangeInclusive;

use skrifa::Tag;

/// Gamma applied to coverage before quantizing; brightens thin anti-aliased edges.
pub const DEFAULT_GAMMA: f64 = 1.8;

/// Weight used for variable fonts when none is requested (Regular).
pub const DEFAULT_WEIGHT: f32 = 400.0;

/// Printable ASCII.
pub const DEFAULT_CHARSET: RangeInclusive<char> = ' '..='~';

/// Design axis tag holding the font weight.
pub const WEIGHT_AXIS: Tag = Tag::new(b"wght");

/// An ordered, duplicate-free set of characters to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self { chars }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for CharSet {
    fn default() -> Self {
        Self::new(DEFAULT_CHARSET)
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        Self::new(s.chars())
    }
}

/// Options for converting one font.
///
/// # Example
///
/// ```
/// use gray4_generator::{CharSet, GenerateOptions};
///
/// let options = GenerateOptions::new(18).weight(700.0).charset(CharSet::from("0123456789"));
/// assert_eq!(options.pixel_size, 18);
/// ```
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Pixels per em; horizontal scale follows proportionally.
    pub pixel_size: u32,
    /// Requested weight, only meaningful for variable fonts.
    pub weight: f32,
    pub gamma: f64,
    pub charset: CharSet,
}

impl GenerateOptions {
    pub fn new(pixel_size: u32) -> Self {
        Self {
            pixel_size,
            weight: DEFAULT_WEIGHT,
            gamma: DEFAULT_GAMMA,
            charset: CharSet::default(),
        }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn charset(mut self, charset: CharSet) -> Self {
        self.charset = charset;
        self
    }
}
