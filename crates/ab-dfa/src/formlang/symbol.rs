//! Symbol types for automata transitions.

use crate::formlang::error::DfaError;
use std::fmt;

/// One of the two abstract input symbols.
///
/// The concrete characters that spell a symbol in an input string are chosen
/// by the [`Alphabet`] of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    A,
    B,
}

impl Symbol {
    /// Both symbols, in slot order.
    pub const ALL: [Symbol; 2] = [Symbol::A, Symbol::B];

    /// Index of the transition slot this symbol selects.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Symbol::A => 0,
            Symbol::B => 1,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::A => f.write_str("A"),
            Symbol::B => f.write_str("B"),
        }
    }
}

/// The two characters an automaton reads, mapped onto [`Symbol::A`] and
/// [`Symbol::B`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    chars: [char; 2],
}

impl Alphabet {
    /// Create an alphabet from two distinct characters.
    pub fn new(on_a: char, on_b: char) -> Result<Self, DfaError> {
        if on_a == on_b {
            return Err(DfaError::DegenerateAlphabet { symbol: on_a });
        }
        Ok(Self {
            chars: [on_a, on_b],
        })
    }

    /// The character that spells `symbol`.
    pub fn char_of(&self, symbol: Symbol) -> char {
        self.chars[symbol.slot()]
    }

    /// The symbol spelled by `ch`, if it belongs to the alphabet.
    pub fn symbol_of(&self, ch: char) -> Option<Symbol> {
        Symbol::ALL.into_iter().find(|&s| self.char_of(s) == ch)
    }

    pub fn chars(&self) -> [char; 2] {
        self.chars
    }

    /// Translate a whole input string.
    ///
    /// Every character is checked before anything is returned, so a string
    /// with a foreign character never yields a partial symbol sequence.
    pub fn parse(&self, input: &str) -> Result<Vec<Symbol>, DfaError> {
        input
            .chars()
            .enumerate()
            .map(|(position, found)| {
                self.symbol_of(found).ok_or(DfaError::InvalidSymbol {
                    found,
                    position,
                    alphabet: *self,
                })
            })
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self { chars: ['a', 'b'] }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.chars[0], self.chars[1])
    }
}
