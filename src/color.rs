//! Colors and color combinations
//!
//! The color universe is closed: six atomic colors (the five pigments plus
//! colorless-as-a-color) and the 64 subsets of them. A [`ColorSet`] is a
//! `Copy` wrapper over the 6-bit mask, so every combination is its own
//! canonical value and set algebra is plain bit arithmetic.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Mana colors
///
/// `Colorless` is the specific colorless-source color (as produced by a
/// color indicator), distinct from generic/uncolored cost.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// The fixed color wheel, used everywhere a tie-break needs a canonical
    /// color order
    pub const WHEEL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    /// Position on the wheel (W=0 .. C=5)
    pub fn wheel_index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Blue => 1,
            Color::Black => 2,
            Color::Red => 3,
            Color::Green => 4,
            Color::Colorless => 5,
        }
    }

    /// The bit this color occupies in a combination mask
    pub fn mask(self) -> u8 {
        1 << self.wheel_index()
    }

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Colorless => 'C',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        match c {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'C' => Some(Color::Colorless),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// How two color combinations relate as sets.
///
/// This is a classification, not a signed ordering; it must never be used
/// where a linear comparator is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetRelation {
    Equal,
    /// The left set strictly contains the right
    Contains,
    /// The left set is strictly contained in the right
    ContainedIn,
    /// The sets overlap but neither contains the other
    Intersects,
    Disjoint,
}

/// A combination of colors, identified by its 6-bit mask.
///
/// The universe is exactly the 64 masks; equality is mask equality, so each
/// combination is a canonical singleton by value semantics. `plus`/`minus`
/// are closed over the universe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
pub struct ColorSet(u8);

/// Primary name and aliases for each of the 64 masks, indexed by mask.
///
/// Subsets of the five pigments carry their canonical nicknames (guilds,
/// shards, wedges, the four-color names); combinations that mix `C` into a
/// pigment set have no nicknames and use their letter strings.
const COMBINATIONS: [(&str, &[&str]); 64] = [
    ("Empty", &[]),
    ("White", &["Mono-White", "W"]),
    ("Blue", &["Mono-Blue", "U"]),
    ("Azorius", &["White-Blue", "WU"]),
    ("Black", &["Mono-Black", "B"]),
    ("Orzhov", &["White-Black", "WB"]),
    ("Dimir", &["Blue-Black", "UB"]),
    ("Esper", &["WUB"]),
    ("Red", &["Mono-Red", "R"]),
    ("Boros", &["Red-White", "RW"]),
    ("Izzet", &["Blue-Red", "UR"]),
    ("Jeskai", &["Raugrin", "URW"]),
    ("Rakdos", &["Black-Red", "BR"]),
    ("Mardu", &["Savai", "RWB"]),
    ("Grixis", &["UBR"]),
    ("Yore-Tiller", &["Sans-Green", "Artifice", "WUBR"]),
    ("Green", &["Mono-Green", "G"]),
    ("Selesnya", &["Green-White", "GW"]),
    ("Simic", &["Green-Blue", "GU"]),
    ("Bant", &["GWU"]),
    ("Golgari", &["Black-Green", "BG"]),
    ("Abzan", &["Indatha", "WBG"]),
    ("Sultai", &["Zagoth", "BGU"]),
    ("Witch-Maw", &["Sans-Red", "Growth", "GWUB"]),
    ("Gruul", &["Red-Green", "RG"]),
    ("Naya", &["RGW"]),
    ("Temur", &["Ketria", "GUR"]),
    ("Ink-Treader", &["Sans-Black", "Altruism", "RGWU"]),
    ("Jund", &["BRG"]),
    ("Dune-Brood", &["Sans-Blue", "Aggression", "BRGW"]),
    ("Glint-Eye", &["Sans-White", "Chaos", "UBRG"]),
    ("Five-Color", &["Rainbow", "WUBRG"]),
    ("Colorless", &["C"]),
    ("WC", &[]),
    ("UC", &[]),
    ("WUC", &[]),
    ("BC", &[]),
    ("WBC", &[]),
    ("UBC", &[]),
    ("WUBC", &[]),
    ("RC", &[]),
    ("WRC", &[]),
    ("URC", &[]),
    ("WURC", &[]),
    ("BRC", &[]),
    ("WBRC", &[]),
    ("UBRC", &[]),
    ("WUBRC", &[]),
    ("GC", &[]),
    ("WGC", &[]),
    ("UGC", &[]),
    ("WUGC", &[]),
    ("BGC", &[]),
    ("WBGC", &[]),
    ("UBGC", &[]),
    ("WUBGC", &[]),
    ("RGC", &[]),
    ("WRGC", &[]),
    ("URGC", &[]),
    ("WURGC", &[]),
    ("BRGC", &[]),
    ("WBRGC", &[]),
    ("UBRGC", &[]),
    ("WUBRGC", &[]),
];

impl ColorSet {
    pub const EMPTY: ColorSet = ColorSet(0);
    pub const ALL: ColorSet = ColorSet(0b11_1111);

    /// Number of combinations in the universe
    pub const COUNT: usize = 64;

    /// Look up a combination by mask.
    ///
    /// Panics if `mask` is outside `[0, 64)`; masks come from this module,
    /// so an out-of-range mask is a programming error.
    pub fn by_mask(mask: u8) -> ColorSet {
        assert!(
            (mask as usize) < Self::COUNT,
            "color mask out of range: {mask}"
        );
        ColorSet(mask)
    }

    pub fn of(color: Color) -> ColorSet {
        ColorSet(color.mask())
    }

    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> ColorSet {
        colors
            .into_iter()
            .fold(ColorSet::EMPTY, |set, c| set.plus(c))
    }

    pub fn mask(self) -> u8 {
        self.0
    }

    pub fn plus(self, other: impl Into<ColorSet>) -> ColorSet {
        ColorSet(self.0 | other.into().0)
    }

    pub fn minus(self, other: impl Into<ColorSet>) -> ColorSet {
        ColorSet(self.0 & !other.into().0)
    }

    pub fn contains(self, color: Color) -> bool {
        self.0 & color.mask() != 0
    }

    pub fn contains_all(self, other: ColorSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: ColorSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Colors present, in wheel order
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::WHEEL.into_iter().filter(move |c| self.contains(*c))
    }

    /// First color present in wheel order
    pub fn first(self) -> Option<Color> {
        self.colors().next()
    }

    pub fn name(self) -> &'static str {
        COMBINATIONS[self.0 as usize].0
    }

    pub fn aliases(self) -> &'static [&'static str] {
        COMBINATIONS[self.0 as usize].1
    }

    /// Classify how `self` relates to `other` as a set
    pub fn relation(self, other: ColorSet) -> SetRelation {
        let common = self.0 & other.0;
        if self.0 == other.0 {
            SetRelation::Equal
        } else if common == other.0 {
            SetRelation::Contains
        } else if common == self.0 {
            SetRelation::ContainedIn
        } else if common == 0 {
            SetRelation::Disjoint
        } else {
            SetRelation::Intersects
        }
    }

    /// Canonical order of colors within a rendered cost or hybrid option
    /// set.
    ///
    /// Combinations of different size sort by size, except the literal
    /// special case of a 1-color against a 2-color set (sizes summing to
    /// 3): those compare by first color and then size, which places a
    /// two-color hybrid between its component colors (`{W}` < `{W/U}` <
    /// `{U}`).
    pub fn symbol_order(a: ColorSet, b: ColorSet) -> Ordering {
        let (la, lb) = (a.len(), b.len());
        let hybrid_adjacent = la + lb == 3 && la.min(lb) == 1;
        if la != lb && !hybrid_adjacent {
            return la.cmp(&lb);
        }
        match (a.first(), b.first()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x
                .wheel_index()
                .cmp(&y.wheel_index())
                .then(la.cmp(&lb)),
        }
    }

    /// Order by set size then mask, with the empty set first
    pub fn empty_first_order(a: ColorSet, b: ColorSet) -> Ordering {
        a.len().cmp(&b.len()).then(a.0.cmp(&b.0))
    }

    /// Order by set size then mask, with the empty set pinned last
    pub fn empty_last_order(a: ColorSet, b: ColorSet) -> Ordering {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.len().cmp(&b.len()).then(a.0.cmp(&b.0)),
        }
    }
}

impl From<Color> for ColorSet {
    fn from(color: Color) -> ColorSet {
        ColorSet::of(color)
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.colors() {
            write!(f, "{}", color)?;
        }
        Ok(())
    }
}
