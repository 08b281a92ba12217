//! Scanning rules text for embedded mana symbols
//!
//! Rules text mentions symbols inline (`"Flashback {2}{R}"`), but it also
//! contains parenthesized reminder text that must be skipped verbatim and
//! the occasional braced span that is not a mana symbol at all. The scan
//! therefore never errors: junk spans are silently treated as ordinary
//! text.

use crate::symbol::ManaSymbol;

/// Scan `text` for embedded `{...}` mana symbols, strictly left to right.
///
/// The returned iterator is `Clone`; iterating a clone (or calling
/// `symbols_in` again) yields the same sequence, so the scan is
/// restartable rather than single-use.
pub fn symbols_in(text: &str) -> SymbolScan<'_> {
    SymbolScan { rest: text }
}

/// Lazy symbol scanner over a borrowed text slice
#[derive(Debug, Clone)]
pub struct SymbolScan<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SymbolScan<'a> {
    type Item = ManaSymbol;

    fn next(&mut self) -> Option<ManaSymbol> {
        loop {
            // find the next brace outside parenthesized reminder text
            let mut depth = 0usize;
            let mut open = None;
            for (i, c) in self.rest.char_indices() {
                match c {
                    '(' => depth += 1,
                    ')' => depth = depth.saturating_sub(1),
                    '{' if depth == 0 => {
                        open = Some(i);
                        break;
                    }
                    _ => {}
                }
            }
            let Some(start) = open else {
                self.rest = "";
                return None;
            };

            let after = &self.rest[start + 1..];
            let Some(end) = after.find('}') else {
                // unterminated brace: nothing further to report
                self.rest = "";
                return None;
            };
            let token = &after[..end];
            self.rest = &after[end + 1..];

            if let Ok(symbol) = ManaSymbol::parse(token) {
                return Some(symbol);
            }
            // not a mana symbol; skip the span and keep scanning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned(text: &str) -> Vec<String> {
        symbols_in(text).map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scan_plain_text() {
        assert_eq!(scanned("Flashback {2}{R}"), ["{2}", "{R}"]);
        assert_eq!(scanned("no symbols here"), Vec::<String>::new());
        assert_eq!(scanned(""), Vec::<String>::new());
    }

    #[test]
    fn test_scan_skips_reminder_text() {
        let text = "Extort (Whenever you cast a spell, you may pay {W/B}.)";
        assert_eq!(scanned(text), Vec::<String>::new());

        let mixed = "{T}: Add {G}. (Reminder about {G}.) Then {1}.";
        assert_eq!(scanned(mixed), ["{T}", "{G}", "{1}"]);
    }

    #[test]
    fn test_scan_nested_parens() {
        let text = "(outer (inner {R}) more {U}) {B}";
        assert_eq!(scanned(text), ["{B}"]);
    }

    #[test]
    fn test_scan_tolerates_junk_braces() {
        assert_eq!(scanned("pay {oops} then {W}"), ["{W}"]);
        assert_eq!(scanned("{W} dangling {brace"), ["{W}"]);
        assert_eq!(scanned("empty {} braces {U}"), ["{U}"]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let scan = symbols_in("{1}{G} (ignore {W}) {G/U}");
        let first: Vec<_> = scan.clone().collect();
        let second: Vec<_> = scan.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_scan_left_to_right() {
        let symbols: Vec<_> = symbols_in("Kicker {R} and {2}{U}").collect();
        assert_eq!(
            symbols,
            [
                ManaSymbol::parse("{R}").unwrap(),
                ManaSymbol::parse("{2}").unwrap(),
                ManaSymbol::parse("{U}").unwrap(),
            ]
        );
    }
}
