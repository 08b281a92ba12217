//! mana-algebra - a symbolic algebra for trading card mana costs
//!
//! Models the resource-cost language of a trading card game as a small
//! algebra: a closed universe of colors and color combinations, a grammar
//! of cost symbols, a normalized multiset representation of a complete
//! cost, and arithmetic/comparison operations over it (addition, payment
//! reduction, devotion counting, set-relationship comparison).
//!
//! Everything here is a plain in-memory value type: parsing is pure,
//! operations return new values instead of mutating shared state, and the
//! lookup tables are static data, so the whole API is safe to use from
//! concurrent callers without coordination.

pub mod amount;
pub mod color;
pub mod error;
pub mod scan;
pub mod symbol;
pub mod value;

pub use amount::Amount;
pub use color::{Color, ColorSet, SetRelation};
pub use error::{ManaError, Result};
pub use scan::{symbols_in, SymbolScan};
pub use symbol::{Atom, ManaSymbol, Marker, PureSymbol, Variable};
pub use value::{ManaValue, PaymentOutcome, PureFamily, PureValue};
