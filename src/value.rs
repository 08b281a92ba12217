//! Complete mana costs
//!
//! A [`ManaValue`] is a multiset of symbols kept in polished form: generic
//! symbols merged into at most one, pairs of half symbols merged into
//! wholes, entries in canonical display order. Operations never mutate in
//! place; `add`, `substitute` and `reduce` return fresh values, so shared
//! costs (including the canonical singletons) can never be corrupted by a
//! caller.

use crate::amount::Amount;
use crate::color::{Color, ColorSet};
use crate::error::{ManaError, Result};
use crate::symbol::{symbol_order, Atom, ManaSymbol, PureSymbol};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

/// Result of reducing one cost by another.
///
/// `CannotPay` is an expected, common-path outcome of the payment check,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome<V = ManaValue> {
    /// The cost was covered; carries the remainder
    Paid(V),
    /// The cost cannot be covered (only produced under `fail_on_excess`)
    CannotPay,
}

impl<V> PaymentOutcome<V> {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentOutcome::Paid(_))
    }

    pub fn paid(self) -> Option<V> {
        match self {
            PaymentOutcome::Paid(v) => Some(v),
            PaymentOutcome::CannotPay => None,
        }
    }
}

/// A complete mana cost: a polished multiset of symbols.
///
/// The empty value means "no cost at all" and is distinct from `{0}`,
/// which is a real, castable cost of zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ManaValue {
    /// Sorted `(symbol, count)` entries; counts are positive, at most one
    /// entry is generic, and half symbols appear at most once each
    entries: SmallVec<[(ManaSymbol, u32); 4]>,
}

impl ManaValue {
    pub fn new() -> ManaValue {
        ManaValue {
            entries: SmallVec::new(),
        }
    }

    pub fn from_symbols(symbols: impl IntoIterator<Item = ManaSymbol>) -> ManaValue {
        Self::polished(symbols.into_iter().map(|s| (s, 1)))
    }

    /// Parse a cost string: zero or more complete `{...}` groups with
    /// nothing between them (surrounding whitespace is tolerated)
    pub fn parse(text: &str) -> Result<ManaValue> {
        let mut symbols = Vec::new();
        let mut rest = text.trim();
        while !rest.is_empty() {
            let after = rest
                .strip_prefix('{')
                .ok_or_else(|| ManaError::MalformedCost(text.to_string()))?;
            let end = after
                .find('}')
                .ok_or_else(|| ManaError::MalformedCost(text.to_string()))?;
            symbols.push(ManaSymbol::parse(&after[..end])?);
            rest = &after[end + 1..];
        }
        Ok(Self::from_symbols(symbols))
    }

    /// Rebuild a polished value from raw `(symbol, count)` pairs.
    ///
    /// Polishing merges all generic symbols into at most one, converts
    /// pairs of equal half symbols into wholes, and sorts the entries into
    /// canonical display order. A merged generic of zero is dropped unless
    /// it is the only thing the value contains. Idempotent.
    fn polished(raw: impl IntoIterator<Item = (ManaSymbol, u32)>) -> ManaValue {
        let mut counts: FxHashMap<ManaSymbol, u32> = FxHashMap::default();
        let mut generic = Amount::ZERO;
        let mut saw_generic = false;

        for (symbol, n) in raw {
            if n == 0 {
                continue;
            }
            if let Some(amount) = symbol.as_generic() {
                saw_generic = true;
                generic = generic + amount.saturating_mul(n);
            } else {
                *counts.entry(symbol).or_insert(0) += n;
            }
        }

        // 2×{HW} → {W}; an odd leftover half stays
        for atom in Atom::ALL {
            let Some(half) = atom.half() else { continue };
            let half_key = ManaSymbol::Pure(half);
            let Some(&halves) = counts.get(&half_key) else {
                continue;
            };
            if halves < 2 {
                continue;
            }
            if halves % 2 == 0 {
                counts.remove(&half_key);
            } else {
                counts.insert(half_key, 1);
            }
            *counts
                .entry(ManaSymbol::Pure(PureSymbol::Atom(atom)))
                .or_insert(0) += halves / 2;
        }

        if !generic.is_zero() || (saw_generic && counts.is_empty()) {
            counts.insert(ManaSymbol::Pure(PureSymbol::Generic(generic)), 1);
        }

        let mut entries: SmallVec<[(ManaSymbol, u32); 4]> = counts.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        ManaValue { entries }
    }

    /// Unique symbols with their counts, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&ManaSymbol, u32)> {
        self.entries.iter().map(|(s, n)| (s, *n))
    }

    /// Every symbol copy, in canonical order
    pub fn symbols(&self) -> impl Iterator<Item = ManaSymbol> + '_ {
        self.entries
            .iter()
            .flat_map(|(s, n)| std::iter::repeat(s.clone()).take(*n as usize))
    }

    /// Total number of symbol copies
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, n)| *n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, symbol: &ManaSymbol) -> u32 {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// The merged generic amount carried by this value (zero when none)
    pub fn generic_amount(&self) -> Amount {
        self.entries
            .iter()
            .filter_map(|(s, n)| s.as_generic().map(|a| a.saturating_mul(*n)))
            .sum()
    }

    /// Total converted value; variables and markers contribute zero
    pub fn converted(&self) -> Amount {
        self.entries
            .iter()
            .map(|(s, n)| s.value().saturating_mul(*n))
            .sum()
    }

    pub fn value_f64(&self) -> f64 {
        self.converted().to_f64()
    }

    /// Union of all symbol colors
    pub fn color(&self) -> ColorSet {
        self.entries
            .iter()
            .fold(ColorSet::EMPTY, |set, (s, _)| set.plus(s.color()))
    }

    /// Count of symbol copies contributing the given color, counting each
    /// hybrid option slot that includes it
    pub fn devotion(&self, color: Color) -> u32 {
        self.entries
            .iter()
            .map(|(s, n)| s.devotion_to(color) * n)
            .sum()
    }

    /// A new value with one more copy of `symbol`
    pub fn add(&self, symbol: impl Into<ManaSymbol>) -> ManaValue {
        let extra = std::iter::once((symbol.into(), 1));
        Self::polished(self.cloned_entries().chain(extra))
    }

    /// A new value holding the combined symbols of both costs
    pub fn plus(&self, other: &ManaValue) -> ManaValue {
        Self::polished(self.cloned_entries().chain(other.cloned_entries()))
    }

    /// A new value with every copy of `old` replaced by `new`
    pub fn substitute(&self, old: &ManaSymbol, new: &ManaSymbol) -> ManaValue {
        Self::polished(self.cloned_entries().map(|(s, n)| {
            if s == *old {
                (new.clone(), n)
            } else {
                (s, n)
            }
        }))
    }

    fn cloned_entries(&self) -> impl Iterator<Item = (ManaSymbol, u32)> + '_ {
        self.entries.iter().cloned()
    }

    /// Compute whether this cost can pay for `other`, and the remainder
    /// left over.
    ///
    /// Generic capacity in `self` covers `other`'s generic requirement.
    /// With `color_pays_generic`, any shortfall of a non-generic symbol is
    /// also charged against that generic capacity; otherwise the shortfall
    /// is either ignored or, under `fail_on_excess`, the whole operation
    /// aborts as `CannotPay`. `fail_on_excess` likewise aborts as soon as
    /// the accumulated requirement exceeds the generic capacity. A fully
    /// reduced cost is `{0}`, never the empty value.
    pub fn reduce(
        &self,
        other: &ManaValue,
        color_pays_generic: bool,
        fail_on_excess: bool,
    ) -> PaymentOutcome {
        let our_generic = self.generic_amount();
        let mut their_generic = Amount::ZERO;

        for (symbol, needed) in other.iter() {
            if let Some(amount) = symbol.as_generic() {
                their_generic = their_generic + amount.saturating_mul(needed);
            } else {
                let have = self.count(symbol);
                if needed > have {
                    let short = needed - have;
                    if color_pays_generic {
                        their_generic =
                            their_generic + symbol.value().saturating_mul(short);
                    } else if fail_on_excess {
                        return PaymentOutcome::CannotPay;
                    }
                }
            }
            if fail_on_excess && their_generic > our_generic {
                return PaymentOutcome::CannotPay;
            }
        }

        let mut rest: Vec<(ManaSymbol, u32)> = Vec::with_capacity(self.entries.len() + 1);
        for (symbol, n) in self.iter() {
            if symbol.as_generic().is_some() {
                // replaced below by the residual capacity
                if our_generic.is_zero() {
                    rest.push((symbol.clone(), n));
                }
                continue;
            }
            let kept = n - n.min(other.count(symbol));
            if kept > 0 {
                rest.push((symbol.clone(), kept));
            }
        }
        if !our_generic.is_zero() {
            let residual = our_generic.saturating_sub(their_generic);
            if !residual.is_zero() {
                rest.push((ManaSymbol::Pure(PureSymbol::Generic(residual)), 1));
            }
        }

        let mut remainder = Self::polished(rest);
        if remainder.is_empty() {
            remainder = Self::polished([(ManaSymbol::Pure(PureSymbol::ZERO), 1)]);
        }
        PaymentOutcome::Paid(remainder)
    }

    /// Partition two costs into (a-only, shared, b-only).
    ///
    /// Generic amounts split first, with the overlap in the shared part;
    /// non-generic symbols match by identity with shared counts in the
    /// middle. Unlike `reduce`, the outputs may be genuinely empty.
    pub fn venn(a: &ManaValue, b: &ManaValue) -> (ManaValue, ManaValue, ManaValue) {
        let (a_generic, b_generic) = (a.generic_amount(), b.generic_amount());
        let shared_generic = a_generic.min(b_generic);

        let generic_entry =
            |amount: Amount| (ManaSymbol::Pure(PureSymbol::Generic(amount)), 1);
        let mut a_only: Vec<(ManaSymbol, u32)> = Vec::new();
        let mut both: Vec<(ManaSymbol, u32)> = Vec::new();
        let mut b_only: Vec<(ManaSymbol, u32)> = Vec::new();

        if !shared_generic.is_zero() {
            both.push(generic_entry(shared_generic));
        }
        let a_rest = a_generic.saturating_sub(shared_generic);
        if !a_rest.is_zero() {
            a_only.push(generic_entry(a_rest));
        }
        let b_rest = b_generic.saturating_sub(shared_generic);
        if !b_rest.is_zero() {
            b_only.push(generic_entry(b_rest));
        }

        for (symbol, na) in a.iter() {
            if symbol.as_generic().is_some() {
                continue;
            }
            let shared = na.min(b.count(symbol));
            if shared > 0 {
                both.push((symbol.clone(), shared));
            }
            if na > shared {
                a_only.push((symbol.clone(), na - shared));
            }
        }
        for (symbol, nb) in b.iter() {
            if symbol.as_generic().is_some() {
                continue;
            }
            let shared = nb.min(a.count(symbol));
            if nb > shared {
                b_only.push((symbol.clone(), nb - shared));
            }
        }

        (
            Self::polished(a_only),
            Self::polished(both),
            Self::polished(b_only),
        )
    }

    /// Containment-as-less-than: a cost fully covered by another sorts
    /// before it. Incomparable pairs fall back to the complete order so
    /// the result is usable in sorted search structures.
    pub fn search_order(a: &ManaValue, b: &ManaValue) -> Ordering {
        let (a_only, _both, b_only) = Self::venn(a, b);
        match (a_only.is_empty(), b_only.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.cmp(b),
        }
    }
}

impl Ord for ManaValue {
    /// The complete order for whole costs: color (empty last), then
    /// converted value, then symbol-by-symbol comparison
    fn cmp(&self, other: &Self) -> Ordering {
        ColorSet::empty_last_order(self.color(), other.color())
            .then_with(|| self.converted().cmp(&other.converted()))
            .then_with(|| {
                for ((sa, na), (sb, nb)) in self.entries.iter().zip(&other.entries) {
                    let ord = symbol_order(sa, sb)
                        .then_with(|| sa.cmp(sb))
                        .then_with(|| na.cmp(nb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                self.entries.len().cmp(&other.entries.len())
            })
    }
}

impl PartialOrd for ManaValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ManaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, n) in self.iter() {
            for _ in 0..n {
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

impl FromIterator<ManaSymbol> for ManaValue {
    fn from_iter<I: IntoIterator<Item = ManaSymbol>>(iter: I) -> ManaValue {
        ManaValue::from_symbols(iter)
    }
}

/// A cost composed entirely of pure (non-hybrid) symbols
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct PureValue(ManaValue);

impl PureValue {
    pub fn new() -> PureValue {
        PureValue(ManaValue::new())
    }

    pub fn from_symbols(symbols: impl IntoIterator<Item = PureSymbol>) -> PureValue {
        PureValue(ManaValue::from_symbols(
            symbols.into_iter().map(ManaSymbol::Pure),
        ))
    }

    /// Parse a cost string that must not contain hybrid symbols
    pub fn parse(text: &str) -> Result<PureValue> {
        PureValue::try_from(ManaValue::parse(text)?)
    }

    pub fn as_value(&self) -> &ManaValue {
        &self.0
    }

    pub fn into_value(self) -> ManaValue {
        self.0
    }

    pub fn add(&self, symbol: PureSymbol) -> PureValue {
        PureValue(self.0.add(symbol))
    }

    /// [`ManaValue::reduce`], staying within pure values
    pub fn reduce(
        &self,
        other: &PureValue,
        color_pays_generic: bool,
        fail_on_excess: bool,
    ) -> PaymentOutcome<PureValue> {
        // reducing only removes symbols or inserts a generic, so the
        // remainder of pure inputs is pure
        match self.0.reduce(&other.0, color_pays_generic, fail_on_excess) {
            PaymentOutcome::Paid(rest) => PaymentOutcome::Paid(PureValue(rest)),
            PaymentOutcome::CannotPay => PaymentOutcome::CannotPay,
        }
    }
}

impl Deref for PureValue {
    type Target = ManaValue;

    fn deref(&self) -> &ManaValue {
        &self.0
    }
}

impl TryFrom<ManaValue> for PureValue {
    type Error = ManaError;

    fn try_from(value: ManaValue) -> Result<PureValue> {
        if value.iter().all(|(s, _)| s.is_pure()) {
            Ok(PureValue(value))
        } else {
            Err(ManaError::MalformedCost(value.to_string()))
        }
    }
}

impl From<PureValue> for ManaValue {
    fn from(value: PureValue) -> ManaValue {
        value.0
    }
}

impl fmt::Display for PureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A set of alternative pure costs ("reduces to one of these"), kept in
/// the complete order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PureFamily {
    alternatives: BTreeSet<PureValue>,
}

impl PureFamily {
    pub fn new() -> PureFamily {
        PureFamily {
            alternatives: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, value: PureValue) -> bool {
        self.alternatives.insert(value)
    }

    pub fn contains(&self, value: &PureValue) -> bool {
        self.alternatives.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PureValue> {
        self.alternatives.iter()
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Cheapest alternative in the complete order
    pub fn best(&self) -> Option<&PureValue> {
        self.alternatives.iter().next()
    }

    /// Closed-form factoring of the family into a single cost.
    ///
    /// The semantics of factoring an alternative-cost family are an open
    /// question inherited from the source system; this is intentionally
    /// left unimplemented rather than guessed at.
    pub fn factor(&self) -> PureValue {
        unimplemented!("factoring an alternative-cost family")
    }
}

impl FromIterator<PureValue> for PureFamily {
    fn from_iter<I: IntoIterator<Item = PureValue>>(iter: I) -> PureFamily {
        PureFamily {
            alternatives: iter.into_iter().collect(),
        }
    }
}
