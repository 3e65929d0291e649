//! This module defines the `Tape`, the machine's lazily materialized, two-way unbounded storage.
//! Only visited cells exist; stepping past either end grows the tape by one blank cell.

use crate::types::Direction;
use std::collections::VecDeque;

/// A single tape with its read/write head.
///
/// The head is signed because a left move from cell 0 leaves it at `-1` until the next
/// call to [`Tape::expand`] materializes a new cell in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: isize,
    blank: char,
}

impl Tape {
    /// Creates a tape from raw input text.
    ///
    /// Leading and trailing whitespace (including the ASCII file, group, record and unit
    /// separators) is removed and every remaining character becomes one cell. Empty input
    /// yields a tape holding a single blank cell.
    pub fn new(input: &str, blank: char) -> Self {
        let mut cells: VecDeque<char> = input.trim_matches(is_input_space).chars().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }

        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Makes sure the head sits on an existing cell and returns its index.
    ///
    /// Growing at the front shifts every existing index right by one.
    pub fn expand(&mut self) -> usize {
        let index = expand(&mut self.cells, self.head, self.blank);
        self.head = index as isize;
        index
    }

    /// Returns the symbol at `index`, or the blank symbol for cells that do not exist yet.
    pub fn symbol_at(&self, index: usize) -> char {
        self.cells.get(index).copied().unwrap_or(self.blank)
    }

    /// Overwrites the cell under the head, materializing it first if needed.
    pub fn write(&mut self, symbol: char) {
        let index = self.expand();
        self.cells[index] = symbol;
    }

    /// Moves the head one cell in `direction` without growing the tape.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.head -= 1,
            Direction::Right => self.head += 1,
        }
    }

    /// Returns the current head position.
    pub fn head(&self) -> isize {
        self.head
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn cells(&self) -> &VecDeque<char> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the tape content with blank padding removed from both ends.
    pub fn trimmed(&self) -> String {
        trim(&self.cells, self.blank)
    }
}

impl std::fmt::Display for Tape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.cells.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

fn is_input_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Brings `head` onto a valid index of `cells`, growing the tape by one blank cell when
/// the head has stepped off either end. Returns the (possibly rebased) head index.
///
/// | _ | a | b |     head -1 -> index 0, one blank pushed at the front
/// | a | b | _ |     head  2 -> index 2, one blank pushed at the back
pub fn expand(cells: &mut VecDeque<char>, head: isize, blank: char) -> usize {
    if head < 0 {
        cells.push_front(blank);
        return 0;
    }

    let index = head as usize;
    if index >= cells.len() {
        cells.push_back(blank);
    }

    index
}

/// Strips blank cells from both ends of `cells`.
///
/// A tape that holds nothing but blanks trims to exactly one blank symbol, never to an
/// empty string.
pub fn trim(cells: &VecDeque<char>, blank: char) -> String {
    let start = cells.iter().position(|&c| c != blank);
    let end = cells.iter().rposition(|&c| c != blank);

    match (start, end) {
        (Some(start), Some(end)) => cells.range(start..=end).collect(),
        _ => blank.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(s: &str) -> VecDeque<char> {
        s.chars().collect()
    }

    #[test]
    fn test_new_trims_input_whitespace() {
        let tape = Tape::new("  aabb \n", '_');

        assert_eq!(tape.cells(), &cells("aabb"));
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_new_strips_separator_controls() {
        let tape = Tape::new("\u{1c}\u{1d}ab\u{1e}\u{1f}\u{85}", '_');
        assert_eq!(tape.cells(), &cells("ab"));

        let tape = Tape::new("\u{1f}\u{1c}", '_');
        assert_eq!(tape.cells(), &cells("_"));

        // other control characters are input symbols
        let tape = Tape::new("\u{1}ab\u{1b}", '_');
        assert_eq!(tape.len(), 4);
    }

    #[test]
    fn test_new_with_empty_input_has_single_blank() {
        let tape = Tape::new(" \t\r\n", '_');

        assert_eq!(tape.cells(), &cells("_"));
        assert_eq!(tape.len(), 1);
    }

    #[test]
    fn test_expand_negative_head_pushes_front() {
        let mut tape = cells("ab");
        let index = expand(&mut tape, -1, '_');

        assert_eq!(index, 0);
        assert_eq!(tape, cells("_ab"));
    }

    #[test]
    fn test_expand_past_end_pushes_back() {
        let mut tape = cells("ab");
        let index = expand(&mut tape, 2, '_');

        assert_eq!(index, 2);
        assert_eq!(tape, cells("ab_"));
    }

    #[test]
    fn test_expand_inside_is_noop() {
        let mut tape = cells("ab");
        let index = expand(&mut tape, 1, '_');

        assert_eq!(index, 1);
        assert_eq!(tape, cells("ab"));
    }

    #[test]
    fn test_shift_then_expand_left() {
        let mut tape = Tape::new("ab", '_');
        tape.shift(Direction::Left);
        assert_eq!(tape.head(), -1);

        assert_eq!(tape.expand(), 0);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.to_string(), "_ab");
    }

    #[test]
    fn test_write_replaces_symbol_under_head() {
        let mut tape = Tape::new("ab", '_');
        tape.shift(Direction::Right);
        tape.write('X');
        tape.shift(Direction::Right);
        tape.write('Y');

        assert_eq!(tape.to_string(), "aXY");
        assert_eq!(tape.symbol_at(2), 'Y');
        assert_eq!(tape.symbol_at(10), '_');
    }

    #[test]
    fn test_trim_strips_both_ends() {
        assert_eq!(trim(&cells("__ab_c__"), '_'), "ab_c");
        assert_eq!(trim(&cells("abc"), '_'), "abc");
        assert_eq!(trim(&cells("_x"), '_'), "x");
    }

    #[test]
    fn test_trim_all_blank_yields_single_blank() {
        assert_eq!(trim(&cells("____"), '_'), "_");
        assert_eq!(trim(&cells("_"), '_'), "_");
        assert_eq!(trim(&VecDeque::new(), '#'), "#");
    }

    #[test]
    fn test_trim_is_idempotent() {
        let once = trim(&cells("_ _a b_ _"), '_');
        let twice = trim(&cells(&once), '_');

        assert_eq!(once, " _a b_ ");
        assert_eq!(once, twice);
    }
}
