//! Cell-level helpers shared by the listing and detail extractors.
//!
//! The results site renders every table row with a whitespace text node
//! between consecutive `<td>` elements, so the cell "next to" a labelled cell
//! sits two nodes away in the tree. All positional lookups go through
//! [`sibling_cell`] so a template change is a one-place fix.

use crate::utils::error::{Result, ScrapeError};
use scraper::ElementRef;

/// Node distance between two neighbouring cells of one row.
pub const CELL_STRIDE: usize = 2;

/// Thousands separator used in numeric cells (U+00A0).
pub const GROUPING_SEPARATOR: char = '\u{a0}';

/// Text the site puts into padding rows.
const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Walks `stride` raw sibling nodes from `cell` and returns the node there if it
/// is a `<td>` element.
pub fn sibling_cell<'a>(
    cell: ElementRef<'a>,
    direction: Direction,
    stride: usize,
) -> Option<ElementRef<'a>> {
    let mut node = *cell;
    for _ in 0..stride {
        node = match direction {
            Direction::Next => node.next_sibling()?,
            Direction::Previous => node.prev_sibling()?,
        };
    }
    ElementRef::wrap(node).filter(|el| el.value().name() == "td")
}

/// The neighbouring cell one column over, or a layout error.
pub fn adjacent_cell<'a>(
    cell: ElementRef<'a>,
    direction: Direction,
    page: &str,
) -> Result<ElementRef<'a>> {
    sibling_cell(cell, direction, CELL_STRIDE).ok_or_else(|| {
        ScrapeError::layout(
            page,
            format!(
                "no <td> {} nodes {} cell '{}'",
                CELL_STRIDE,
                match direction {
                    Direction::Next => "after",
                    Direction::Previous => "before",
                },
                cell_text(cell)
            ),
        )
    })
}

pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Padding rows carry `-` and no link.
pub fn is_placeholder(cell: ElementRef<'_>) -> bool {
    cell_text(cell) == PLACEHOLDER
}

/// Parses a vote count such as `"13\u{a0}104"`.
pub fn parse_count(text: &str) -> Result<u64> {
    let digits: String = text
        .chars()
        .filter(|c| *c != GROUPING_SEPARATOR)
        .collect();
    digits
        .trim()
        .parse::<u64>()
        .map_err(|_| ScrapeError::InvalidNumber {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    const ROW: &str = "<table><tr>\n<td class=\"a\">first</td>\n<td class=\"b\">second</td>\n<td class=\"c\">third</td>\n</tr></table>";

    fn find<'a>(html: &'a Html, css: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_parse_count_strips_grouping_separator() {
        assert_eq!(parse_count("1\u{a0}234").unwrap(), 1234);
        assert_eq!(parse_count("13\u{a0}104").unwrap(), 13104);
        assert_eq!(parse_count(" 42 ").unwrap(), 42);
        assert_eq!(parse_count("1\u{a0}000\u{a0}000").unwrap(), 1_000_000);
    }

    #[test]
    fn test_parse_count_rejects_non_numeric_text() {
        for text in ["", "-", "12,39", "1 234x"] {
            let err = parse_count(text).unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidNumber { .. }), "{}", text);
        }
    }

    #[test]
    fn test_sibling_cell_skips_whitespace_node() {
        let html = Html::parse_fragment(ROW);
        let middle = find(&html, "td.b");

        let next = sibling_cell(middle, Direction::Next, CELL_STRIDE).unwrap();
        let prev = sibling_cell(middle, Direction::Previous, CELL_STRIDE).unwrap();
        assert_eq!(cell_text(next), "third");
        assert_eq!(cell_text(prev), "first");
    }

    #[test]
    fn test_sibling_cell_stride_one_lands_on_text_node() {
        let html = Html::parse_fragment(ROW);
        let middle = find(&html, "td.b");
        assert!(sibling_cell(middle, Direction::Next, 1).is_none());
    }

    #[test]
    fn test_adjacent_cell_at_row_edge_is_layout_error() {
        let html = Html::parse_fragment(ROW);
        let last = find(&html, "td.c");
        let err = adjacent_cell(last, Direction::Next, "ps32").unwrap_err();
        assert!(matches!(err, ScrapeError::Layout { .. }));
    }

    #[test]
    fn test_placeholder_detection() {
        let html = Html::parse_fragment("<table><tr><td> - </td><td>Benešov</td></tr></table>");
        let cells: Vec<_> = html.select(&Selector::parse("td").unwrap()).collect();
        assert!(is_placeholder(cells[0]));
        assert!(!is_placeholder(cells[1]));
    }
}
