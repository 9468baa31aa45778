// Shelf Core - Audiobook library views
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Natural string ordering
//!
//! Orders strings the way a reader expects a bookshelf to be ordered:
//! letters compare without regard to case or accents, and runs of ASCII
//! digits compare by numeric value, so "Book 2" comes before "Book 10".
//!
//! Both strings are folded first: NFD decomposition, lowercase, combining
//! marks dropped.
//!
//! Characters are ranked by class before value: whitespace, then punctuation
//! and symbols, then digits, then letters. Strings that only differ in case,
//! accents or leading zeros compare `Equal`, which keeps stable sorts stable.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::CharIndices;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two strings in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut left = Tokens::new(&a);
    let mut right = Tokens::new(&b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = l.cmp_token(&r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Natural order for optional keys; missing keys sort after present ones
pub fn natural_cmp_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => natural_cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable ascending natural sort of plain strings
pub fn natural_sort<S: AsRef<str>>(values: &mut [S]) {
    values.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Symbol,
    Digit,
    Letter,
}

#[derive(Debug)]
enum Token<'a> {
    Char(CharClass, char),
    /// Digit run with leading zeros stripped
    Number(&'a str),
}

impl Token<'_> {
    fn class(&self) -> CharClass {
        match self {
            Token::Char(class, _) => *class,
            Token::Number(_) => CharClass::Digit,
        }
    }

    fn cmp_token(&self, other: &Token<'_>) -> Ordering {
        match (self, other) {
            (Token::Number(a), Token::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Token::Char(ca, a), Token::Char(cb, b)) => ca.cmp(cb).then_with(|| a.cmp(b)),
            _ => self.class().cmp(&other.class()),
        }
    }
}

struct Tokens<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, c) = self.chars.next()?;

        if !c.is_ascii_digit() {
            return Some(Token::Char(classify(c), c));
        }

        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = self.chars.peek() {
            if !next.is_ascii_digit() {
                break;
            }
            end = idx + next.len_utf8();
            self.chars.next();
        }

        let source = self.source;
        let digits = source[start..end].trim_start_matches('0');
        Some(Token::Number(digits))
    }
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else if c.is_numeric() {
        CharClass::Digit
    } else {
        CharClass::Symbol
    }
}

/// Case and accent folded form of a string
fn fold(s: &str) -> String {
    s.nfd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .map(fold_overlay)
        .collect()
}

/// Letters with a stroke or bar have no decomposition
fn fold_overlay(c: char) -> char {
    match c {
        'ł' => 'l',
        'ø' => 'o',
        'đ' => 'd',
        'ħ' => 'h',
        'ŧ' => 't',
        'ı' => 'i',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs() {
        assert_eq!(natural_cmp("track 9", "track 10"), Ordering::Less);
        assert_eq!(natural_cmp("Book 10", "Book 2"), Ordering::Greater);
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
    }

    #[test]
    fn test_case_and_accents_ignored() {
        assert_eq!(natural_cmp("apple", "Apple"), Ordering::Equal);
        assert_eq!(natural_cmp("Émile", "emile"), Ordering::Equal);
        assert_eq!(natural_cmp("banana", "Apple"), Ordering::Greater);
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        assert_eq!(natural_cmp("Łukasz", "Mark"), Ordering::Less);
        assert_eq!(natural_cmp("Ősz", "Pál"), Ordering::Less);
        assert_eq!(natural_cmp("Ștefan", "Tudor"), Ordering::Less);
        assert_eq!(natural_cmp("Bjørn", "Bjorn"), Ordering::Equal);

        let mut names = vec!["Łukasz", "Mark", "Lars", "Zoe"];
        natural_sort(&mut names);
        assert_eq!(names, vec!["Lars", "Łukasz", "Mark", "Zoe"]);
    }

    #[test]
    fn test_prefix_and_classes() {
        assert_eq!(natural_cmp("Book", "Book 1"), Ordering::Less);
        assert_eq!(natural_cmp("Book 2", "Book A"), Ordering::Less);
        assert_eq!(natural_cmp("Book!", "Book2"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_decimal_volumes() {
        let mut volumes = vec!["10", "2.5", "1", "2", "Book 3"];
        natural_sort(&mut volumes);
        assert_eq!(volumes, vec!["1", "2", "2.5", "10", "Book 3"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut names = vec!["Zed", "alpha", "ALPHA", "Alpha"];
        natural_sort(&mut names);
        assert_eq!(names, vec!["alpha", "ALPHA", "Alpha", "Zed"]);
    }

    #[test]
    fn test_optional_keys_sort_last() {
        assert_eq!(natural_cmp_opt(Some("1"), None), Ordering::Less);
        assert_eq!(natural_cmp_opt(None, Some("1")), Ordering::Greater);
        assert_eq!(natural_cmp_opt(None, None), Ordering::Equal);
    }
}
