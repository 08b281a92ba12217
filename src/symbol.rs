//! Mana symbols
//!
//! The atomic unit of a cost. Pure symbols (atoms, half atoms, generic
//! numbers, variables, the legacy tap/untap markers) are one closed sum
//! type; a hybrid symbol is an ordered set of two or more pure options,
//! payable by any one of them.

use crate::amount::Amount;
use crate::color::{Color, ColorSet};
use crate::error::{ManaError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Fixed-value atomic symbols.
///
/// The five pigments and `Colorless` contribute their color; Snow and
/// Phyrexian-generic are worth one mana but contribute no color at all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Atom {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
    Snow,
    Phyrexian,
}

impl Atom {
    pub const ALL: [Atom; 8] = [
        Atom::White,
        Atom::Blue,
        Atom::Black,
        Atom::Red,
        Atom::Green,
        Atom::Colorless,
        Atom::Snow,
        Atom::Phyrexian,
    ];

    pub fn color(self) -> ColorSet {
        match self {
            Atom::White => ColorSet::of(Color::White),
            Atom::Blue => ColorSet::of(Color::Blue),
            Atom::Black => ColorSet::of(Color::Black),
            Atom::Red => ColorSet::of(Color::Red),
            Atom::Green => ColorSet::of(Color::Green),
            Atom::Colorless => ColorSet::of(Color::Colorless),
            Atom::Snow | Atom::Phyrexian => ColorSet::EMPTY,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Atom::White => 'W',
            Atom::Blue => 'U',
            Atom::Black => 'B',
            Atom::Red => 'R',
            Atom::Green => 'G',
            Atom::Colorless => 'C',
            Atom::Snow => 'S',
            Atom::Phyrexian => 'P',
        }
    }

    /// The half-value sibling of this atom.
    ///
    /// The whole↔half pairing is a fixed bijection over the six colors;
    /// Snow and Phyrexian have no half sibling.
    pub fn half(self) -> Option<PureSymbol> {
        match self {
            Atom::Snow | Atom::Phyrexian => None,
            atom => Some(PureSymbol::Half(atom)),
        }
    }
}

/// Variable cost symbols; always worth 0 toward the converted value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Variable {
    X,
    Y,
    Z,
}

/// Legacy tap/untap cost markers (`{T}`, `{Q}`); accepted in costs but
/// contribute nothing to value or color
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Marker {
    Tap,
    Untap,
}

/// A non-hybrid mana symbol.
///
/// `Half` only ever wraps one of the six colors; construct halves through
/// [`Atom::half`] or parsing, which enforce the pairing.
///
/// The derived `Ord` is an arbitrary but stable identity order used as the
/// final tie-break in the canonical comparators; it is not the display
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PureSymbol {
    Atom(Atom),
    Half(Atom),
    Generic(Amount),
    Variable(Variable),
    Marker(Marker),
}

impl PureSymbol {
    // The canonical generic singletons
    pub const ZERO: PureSymbol = PureSymbol::Generic(Amount::ZERO);
    pub const HALF: PureSymbol = PureSymbol::Generic(Amount::HALF);
    pub const ONE: PureSymbol = PureSymbol::Generic(Amount::ONE);
    pub const TWO: PureSymbol = PureSymbol::Generic(Amount::TWO);
    pub const INFINITY: PureSymbol = PureSymbol::Generic(Amount::Infinite);

    /// A whole-valued generic symbol; negative amounts are always rejected
    pub fn generic(n: i64) -> Result<PureSymbol> {
        if n < 0 {
            return Err(ManaError::NegativeGenericValue(n));
        }
        let n = u32::try_from(n).unwrap_or(u32::MAX);
        Ok(PureSymbol::Generic(Amount::whole(n)))
    }

    pub fn value(self) -> Amount {
        match self {
            PureSymbol::Atom(_) => Amount::ONE,
            PureSymbol::Half(_) => Amount::HALF,
            PureSymbol::Generic(amount) => amount,
            PureSymbol::Variable(_) | PureSymbol::Marker(_) => Amount::ZERO,
        }
    }

    pub fn color(self) -> ColorSet {
        match self {
            PureSymbol::Atom(atom) | PureSymbol::Half(atom) => atom.color(),
            _ => ColorSet::EMPTY,
        }
    }

    pub fn is_generic(self) -> bool {
        matches!(self, PureSymbol::Generic(_))
    }

    /// Parse one unbraced pure token, trying the fixed symbol table, then
    /// variables, then generic numbers
    pub fn parse(token: &str) -> Result<PureSymbol> {
        Self::parse_fixed(token)
            .or_else(|| Self::parse_variable(token))
            .or_else(|| parse_amount(token).map(PureSymbol::Generic))
            .ok_or_else(|| ManaError::MalformedSymbol(token.to_string()))
    }

    fn parse_fixed(token: &str) -> Option<PureSymbol> {
        Some(match token {
            "W" => PureSymbol::Atom(Atom::White),
            "U" => PureSymbol::Atom(Atom::Blue),
            "B" => PureSymbol::Atom(Atom::Black),
            "R" => PureSymbol::Atom(Atom::Red),
            "G" => PureSymbol::Atom(Atom::Green),
            "C" => PureSymbol::Atom(Atom::Colorless),
            "S" => PureSymbol::Atom(Atom::Snow),
            "P" => PureSymbol::Atom(Atom::Phyrexian),
            "HW" => PureSymbol::Half(Atom::White),
            "HU" => PureSymbol::Half(Atom::Blue),
            "HB" => PureSymbol::Half(Atom::Black),
            "HR" => PureSymbol::Half(Atom::Red),
            "HG" => PureSymbol::Half(Atom::Green),
            "HC" => PureSymbol::Half(Atom::Colorless),
            "T" => PureSymbol::Marker(Marker::Tap),
            "Q" => PureSymbol::Marker(Marker::Untap),
            _ => return None,
        })
    }

    fn parse_variable(token: &str) -> Option<PureSymbol> {
        Some(match token {
            "X" => PureSymbol::Variable(Variable::X),
            "Y" => PureSymbol::Variable(Variable::Y),
            "Z" => PureSymbol::Variable(Variable::Z),
            _ => return None,
        })
    }
}

/// Parse a generic amount: digits, digits + `½`, bare `½`, or `∞`
fn parse_amount(token: &str) -> Option<Amount> {
    if token == "∞" {
        return Some(Amount::Infinite);
    }
    if let Some(prefix) = token.strip_suffix('½') {
        if prefix.is_empty() {
            return Some(Amount::HALF);
        }
        return prefix.parse::<u32>().ok().map(Amount::and_a_half);
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().map(Amount::whole)
}

impl fmt::Display for PureSymbol {
    /// The unbraced token body (`W`, `HW`, `2½`, `X`, `T`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PureSymbol::Atom(atom) => write!(f, "{}", atom.letter()),
            PureSymbol::Half(atom) => write!(f, "H{}", atom.letter()),
            PureSymbol::Generic(amount) => write!(f, "{}", amount),
            PureSymbol::Variable(Variable::X) => write!(f, "X"),
            PureSymbol::Variable(Variable::Y) => write!(f, "Y"),
            PureSymbol::Variable(Variable::Z) => write!(f, "Z"),
            PureSymbol::Marker(Marker::Tap) => write!(f, "T"),
            PureSymbol::Marker(Marker::Untap) => write!(f, "Q"),
        }
    }
}

/// A mana symbol: either one pure symbol or a hybrid of 2+ pure options
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaSymbol {
    Pure(PureSymbol),
    /// Distinct pure options in canonical option order; pay any one
    Hybrid(SmallVec<[PureSymbol; 2]>),
}

impl ManaSymbol {
    pub fn pure(symbol: PureSymbol) -> ManaSymbol {
        ManaSymbol::Pure(symbol)
    }

    /// Build a hybrid symbol from its options.
    ///
    /// Options are sorted into canonical order and de-duplicated; fewer
    /// than two distinct options is not a hybrid.
    pub fn hybrid(options: impl IntoIterator<Item = PureSymbol>) -> Result<ManaSymbol> {
        let mut opts: SmallVec<[PureSymbol; 2]> = options.into_iter().collect();
        opts.sort_by(option_order);
        opts.dedup();
        if opts.len() < 2 {
            let body: Vec<String> = opts.iter().map(|o| o.to_string()).collect();
            return Err(ManaError::MalformedSymbol(body.join("/")));
        }
        // a pair of pigment colors orders by circular wheel distance, which
        // is what the ten printed two-color hybrids use ({G/W}, not {W/G})
        let needs_swap = match opts.as_slice() {
            [a, b] if option_rank(a) == 2 && option_rank(b) == 2 => {
                match (a.color().first(), b.color().first()) {
                    (Some(x), Some(y)) => wheel_pair_order(x, y) == Ordering::Greater,
                    _ => false,
                }
            }
            _ => false,
        };
        if needs_swap {
            opts.swap(0, 1);
        }
        Ok(ManaSymbol::Hybrid(opts))
    }

    /// Parse a symbol token, with or without its surrounding braces
    pub fn parse(token: &str) -> Result<ManaSymbol> {
        let bare = token
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(token);
        let malformed = || ManaError::MalformedSymbol(token.to_string());

        if bare.contains('/') && bare.chars().count() > 2 {
            let options: Vec<PureSymbol> = bare
                .split('/')
                .map(PureSymbol::parse)
                .collect::<Result<_>>()
                .map_err(|_| malformed())?;
            Self::hybrid(options).map_err(|_| malformed())
        } else {
            PureSymbol::parse(bare)
                .map(ManaSymbol::Pure)
                .map_err(|_| malformed())
        }
    }

    pub fn is_pure(&self) -> bool {
        matches!(self, ManaSymbol::Pure(_))
    }

    pub fn as_pure(&self) -> Option<PureSymbol> {
        match self {
            ManaSymbol::Pure(p) => Some(*p),
            ManaSymbol::Hybrid(_) => None,
        }
    }

    /// The generic amount, for pure generic symbols only
    pub fn as_generic(&self) -> Option<Amount> {
        match self {
            ManaSymbol::Pure(PureSymbol::Generic(amount)) => Some(*amount),
            _ => None,
        }
    }

    /// Numeric value: a hybrid is worth the most expensive of its options
    pub fn value(&self) -> Amount {
        match self {
            ManaSymbol::Pure(p) => p.value(),
            ManaSymbol::Hybrid(opts) => opts
                .iter()
                .map(|o| o.value())
                .max()
                .unwrap_or(Amount::ZERO),
        }
    }

    /// Color contribution: a hybrid contributes the union of its options
    pub fn color(&self) -> ColorSet {
        match self {
            ManaSymbol::Pure(p) => p.color(),
            ManaSymbol::Hybrid(opts) => opts
                .iter()
                .fold(ColorSet::EMPTY, |set, o| set.plus(o.color())),
        }
    }

    /// Devotion contribution toward one color: one count per option slot
    /// whose color set includes it
    pub fn devotion_to(&self, color: Color) -> u32 {
        match self {
            ManaSymbol::Pure(p) => u32::from(p.color().contains(color)),
            ManaSymbol::Hybrid(opts) => {
                opts.iter().filter(|o| o.color().contains(color)).count() as u32
            }
        }
    }
}

impl fmt::Display for ManaSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        match self {
            ManaSymbol::Pure(p) => write!(f, "{}", p)?,
            ManaSymbol::Hybrid(opts) => {
                for (i, opt) in opts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "/")?;
                    }
                    write!(f, "{}", opt)?;
                }
            }
        }
        write!(f, "}}")
    }
}

fn option_rank(symbol: &PureSymbol) -> u8 {
    match symbol {
        PureSymbol::Generic(_) | PureSymbol::Variable(_) | PureSymbol::Marker(_) => 0,
        PureSymbol::Atom(Atom::Colorless) | PureSymbol::Half(Atom::Colorless) => 1,
        PureSymbol::Atom(Atom::Snow) => 3,
        PureSymbol::Atom(Atom::Phyrexian) => 4,
        PureSymbol::Atom(_) | PureSymbol::Half(_) => 2,
    }
}

/// Circular wheel order for one pair of pigment colors: a color precedes
/// another when the clockwise W→U→B→R→G distance to it is at most two.
///
/// Not transitive over three or more colors, so it is only ever applied to
/// a pair, as a presentation swap after the consistent sort.
fn wheel_pair_order(a: Color, b: Color) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let d = (5 + b.wheel_index() - a.wheel_index()) % 5;
    if d <= 2 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Canonical order of options inside a hybrid symbol: generic parts first,
/// then Colorless, then pigment colors, with Snow and Phyrexian last
pub(crate) fn option_order(a: &PureSymbol, b: &PureSymbol) -> Ordering {
    option_rank(a)
        .cmp(&option_rank(b))
        .then_with(|| a.cmp(b))
}

/// Lexicographic comparison of per-color devotion in fixed W,U,B,R,G order
pub fn devotion_order(a: &ManaSymbol, b: &ManaSymbol) -> Ordering {
    for color in [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ] {
        let ord = a.devotion_to(color).cmp(&b.devotion_to(color));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Pure symbols before hybrids, then by devotion
pub fn symbol_order(a: &ManaSymbol, b: &ManaSymbol) -> Ordering {
    b.is_pure()
        .cmp(&a.is_pure())
        .then_with(|| devotion_order(a, b))
}

fn kind_rank(symbol: &ManaSymbol) -> u8 {
    match symbol {
        ManaSymbol::Pure(PureSymbol::Variable(_)) => 0,
        ManaSymbol::Pure(PureSymbol::Generic(_)) => 1,
        ManaSymbol::Pure(PureSymbol::Half(_)) => 2,
        ManaSymbol::Pure(PureSymbol::Atom(_)) => 3,
        ManaSymbol::Hybrid(_) => 4,
        ManaSymbol::Pure(PureSymbol::Marker(_)) => 5,
    }
}

impl Ord for ManaSymbol {
    /// Canonical display order: color (via the symbol order, which nests a
    /// hybrid between its component colors and puts uncolored symbols
    /// first), then value, then symbol kind, then devotion
    fn cmp(&self, other: &Self) -> Ordering {
        ColorSet::symbol_order(self.color(), other.color())
            .then_with(|| self.value().cmp(&other.value()))
            .then_with(|| kind_rank(self).cmp(&kind_rank(other)))
            .then_with(|| devotion_order(self, other))
            .then_with(|| match (self, other) {
                (ManaSymbol::Pure(a), ManaSymbol::Pure(b)) => a.cmp(b),
                (ManaSymbol::Hybrid(a), ManaSymbol::Hybrid(b)) => a.cmp(b),
                // distinct kinds were already separated by kind_rank
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for ManaSymbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<PureSymbol> for ManaSymbol {
    fn from(symbol: PureSymbol) -> ManaSymbol {
        ManaSymbol::Pure(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> ManaSymbol {
        ManaSymbol::parse(s).unwrap()
    }

    #[test]
    fn test_parse_atoms() {
        assert_eq!(sym("{W}"), ManaSymbol::Pure(PureSymbol::Atom(Atom::White)));
        assert_eq!(sym("C"), ManaSymbol::Pure(PureSymbol::Atom(Atom::Colorless)));
        assert_eq!(sym("{S}"), ManaSymbol::Pure(PureSymbol::Atom(Atom::Snow)));
        assert_eq!(sym("{P}"), ManaSymbol::Pure(PureSymbol::Atom(Atom::Phyrexian)));
        assert_eq!(sym("{HG}"), ManaSymbol::Pure(PureSymbol::Half(Atom::Green)));
    }

    #[test]
    fn test_parse_generic() {
        assert_eq!(sym("{0}"), ManaSymbol::Pure(PureSymbol::ZERO));
        assert_eq!(sym("{15}"), ManaSymbol::Pure(PureSymbol::Generic(Amount::whole(15))));
        assert_eq!(sym("{½}"), ManaSymbol::Pure(PureSymbol::HALF));
        assert_eq!(
            sym("{3½}"),
            ManaSymbol::Pure(PureSymbol::Generic(Amount::and_a_half(3)))
        );
        assert_eq!(sym("{∞}"), ManaSymbol::Pure(PureSymbol::INFINITY));
    }

    #[test]
    fn test_parse_variables_and_markers() {
        assert_eq!(sym("{X}"), ManaSymbol::Pure(PureSymbol::Variable(Variable::X)));
        assert_eq!(sym("{T}"), ManaSymbol::Pure(PureSymbol::Marker(Marker::Tap)));
        assert_eq!(sym("{Q}"), ManaSymbol::Pure(PureSymbol::Marker(Marker::Untap)));
        assert_eq!(sym("{T}").value(), Amount::ZERO);
        assert_eq!(sym("{X}").value(), Amount::ZERO);
        assert!(sym("{Q}").color().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        for bad in ["{}", "{A}", "{1.0}", "{-1}", "{WW}", "{H}", "{HS}", "{/}", "{W//U}"] {
            let err = ManaSymbol::parse(bad).unwrap_err();
            assert_eq!(err, ManaError::MalformedSymbol(bad.to_string()), "{bad}");
        }
    }

    #[test]
    fn test_negative_generic_rejected() {
        assert_eq!(
            PureSymbol::generic(-3),
            Err(ManaError::NegativeGenericValue(-3))
        );
        assert_eq!(PureSymbol::generic(2), Ok(PureSymbol::TWO));
    }

    #[test]
    fn test_half_bijection() {
        assert_eq!(Atom::White.half(), Some(PureSymbol::Half(Atom::White)));
        assert_eq!(Atom::Snow.half(), None);
        assert_eq!(Atom::Phyrexian.half(), None);
        assert_eq!(PureSymbol::Half(Atom::Red).value(), Amount::HALF);
        assert_eq!(
            PureSymbol::Half(Atom::Red).color(),
            ColorSet::of(Color::Red)
        );
    }

    #[test]
    fn test_hybrid_value_is_max_and_color_is_union() {
        let twobrid = sym("{2/W}");
        assert_eq!(twobrid.value(), Amount::TWO);
        assert_eq!(twobrid.color(), ColorSet::of(Color::White));

        let wu = sym("{W/U}");
        assert_eq!(wu.value(), Amount::ONE);
        assert_eq!(
            wu.color(),
            ColorSet::from_colors([Color::White, Color::Blue])
        );
    }

    #[test]
    fn test_hybrid_option_order_is_input_independent() {
        let a = ManaSymbol::hybrid([
            PureSymbol::Atom(Atom::White),
            PureSymbol::TWO,
        ])
        .unwrap();
        let b = ManaSymbol::hybrid([
            PureSymbol::TWO,
            PureSymbol::Atom(Atom::White),
        ])
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "{2/W}");
    }

    #[test]
    fn test_hybrid_needs_two_distinct_options() {
        assert!(ManaSymbol::hybrid([PureSymbol::Atom(Atom::White)]).is_err());
        assert!(ManaSymbol::hybrid([
            PureSymbol::Atom(Atom::White),
            PureSymbol::Atom(Atom::White)
        ])
        .is_err());
    }

    #[test]
    fn test_canonical_hybrid_renderings() {
        // The ten two-color pairs, twobrids, and Phyrexian hybrids all
        // round-trip through parse → render
        for token in [
            "{W/U}", "{W/B}", "{U/B}", "{U/R}", "{B/R}", "{B/G}", "{R/G}", "{R/W}",
            "{G/W}", "{G/U}", "{2/W}", "{2/G}", "{W/P}", "{G/P}", "{C/W}",
        ] {
            assert_eq!(sym(token).to_string(), token);
        }
    }

    #[test]
    fn test_pure_token_roundtrip() {
        for token in [
            "{W}", "{U}", "{B}", "{R}", "{G}", "{C}", "{S}", "{P}", "{HW}", "{HC}",
            "{X}", "{Y}", "{Z}", "{T}", "{Q}", "{0}", "{7}", "{½}", "{2½}", "{∞}",
        ] {
            assert_eq!(sym(token).to_string(), token);
        }
    }

    #[test]
    fn test_devotion() {
        assert_eq!(sym("{W}").devotion_to(Color::White), 1);
        assert_eq!(sym("{W}").devotion_to(Color::Blue), 0);
        assert_eq!(sym("{W/U}").devotion_to(Color::White), 1);
        assert_eq!(sym("{W/U}").devotion_to(Color::Blue), 1);
        assert_eq!(sym("{2}").devotion_to(Color::White), 0);
    }

    #[test]
    fn test_display_order() {
        // X before generic before halves/wholes; hybrids nest between
        // their component colors
        let mut symbols = vec![sym("{U}"), sym("{W/U}"), sym("{2}"), sym("{W}"), sym("{X}")];
        symbols.sort();
        let rendered: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, ["{X}", "{2}", "{W}", "{W/U}", "{U}"]);
    }

    #[test]
    fn test_symbol_order_pure_before_hybrid() {
        let pure = sym("{W}");
        let hybrid = sym("{W/U}");
        assert_eq!(symbol_order(&pure, &hybrid), Ordering::Less);
        assert_eq!(symbol_order(&hybrid, &pure), Ordering::Greater);
        assert_eq!(devotion_order(&sym("{U}"), &sym("{W}")), Ordering::Less);
    }
}
