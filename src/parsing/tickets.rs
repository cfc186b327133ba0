//! Ticket file parsing and validation.
//!
//! Input arrives as plain text (one ticket per line) or as CSV/TSV with
//! tickets in a designated column. Every cell must hold exactly
//! `pick_size` comma-separated integers within the number pool, with no
//! duplicates. Validation is fail-fast: the first bad row aborts the parse
//! with an error naming that row, so the user can fix rows one at a time
//! with a stable diagnostic.

use crate::core::combo::Combination;
use crate::core::ticket::TicketBook;
use crate::core::types::GameRules;
use crate::utils::validation::{ticket_limit_reached, MAX_TICKETS};
use std::path::Path;
use thiserror::Error;

/// Errors from reading and validating ticket input.
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row}: expected {expected} numbers per ticket, found {found}: '{raw}'")]
    MalformedTicket {
        row: usize,
        expected: u8,
        found: usize,
        raw: String,
    },

    #[error("Row {row}: '{fragment}' is not a whole number: '{raw}'")]
    NonIntegerValue {
        row: usize,
        fragment: String,
        raw: String,
    },

    #[error("Row {row}: {value} is outside the pool 1..={pool}: '{raw}'")]
    OutOfRange {
        row: usize,
        value: i64,
        pool: u8,
        raw: String,
    },

    #[error("Row {row}: number {value} appears more than once: '{raw}'")]
    DuplicateValue { row: usize, value: u8, raw: String },

    #[error("Row {row}: row has no column {column}")]
    MissingColumn { row: usize, column: usize },

    #[error("Too many tickets: maximum allowed is {0}")]
    TooManyTickets(usize),
}

/// Validate one ticket cell. `row` is the 1-based input row, used only for
/// error reporting.
///
/// The checks run in a fixed order and the first failure wins: fragment
/// count, integer parse, pool range, then duplicates.
///
/// # Errors
///
/// Returns the corresponding `TicketError` variant for the first rule the
/// cell breaks.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // values are range-checked before the cast
pub fn parse_ticket(cell: &str, row: usize, rules: &GameRules) -> Result<Combination, TicketError> {
    let raw = cell.trim();

    // Split on commas; whitespace around fragments is ignored and empty
    // fragments from trailing or doubled commas are discarded
    let fragments: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    if fragments.len() != usize::from(rules.pick_size) {
        return Err(TicketError::MalformedTicket {
            row,
            expected: rules.pick_size,
            found: fragments.len(),
            raw: raw.to_string(),
        });
    }

    let mut numbers = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let value: i64 = fragment.parse().map_err(|_| TicketError::NonIntegerValue {
            row,
            fragment: fragment.to_string(),
            raw: raw.to_string(),
        })?;
        if value < 1 || value > i64::from(rules.pool_size) {
            return Err(TicketError::OutOfRange {
                row,
                value,
                pool: rules.pool_size,
                raw: raw.to_string(),
            });
        }
        numbers.push(value as u8);
    }

    let mut seen = 0u64;
    for &n in &numbers {
        let bit = 1u64 << (n - 1);
        if seen & bit != 0 {
            return Err(TicketError::DuplicateValue {
                row,
                value: n,
                raw: raw.to_string(),
            });
        }
        seen |= bit;
    }

    Ok(Combination::new(numbers))
}

/// Pick the cell delimiter from a file name. `.csv` splits on commas,
/// `.tsv` on tabs; anything else is plain one-ticket-per-line text.
#[must_use]
pub fn delimiter_for(filename: &str) -> Option<char> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".csv") {
        Some(',')
    } else if lower.ends_with(".tsv") {
        Some('\t')
    } else {
        None
    }
}

/// Parse a ticket book from a file, inferring the delimiter from the
/// extension. `column` is the 1-based column holding the ticket cells and
/// is ignored for plain text input.
///
/// # Errors
///
/// Returns `TicketError::Io` if the file cannot be read, or the validation
/// error for the first bad row.
pub fn parse_tickets_file(
    path: &Path,
    rules: &GameRules,
    column: usize,
) -> Result<TicketBook, TicketError> {
    let content = std::fs::read_to_string(path)?;
    let delimiter = delimiter_for(&path.to_string_lossy());
    parse_tickets_text(&content, rules, delimiter, column)
}

/// Parse a ticket book from raw text.
///
/// With a delimiter, each row is split into cells and the 1-based `column`
/// selects the ticket cell; without one, the whole line is the cell. Blank
/// lines are skipped. A first row whose designated cell contains no digits
/// is treated as a column header and skipped.
///
/// # Errors
///
/// Returns the validation error for the first bad row, `MissingColumn` if
/// a row is too short, or `TooManyTickets` past the input limit.
pub fn parse_tickets_text(
    text: &str,
    rules: &GameRules,
    delimiter: Option<char>,
    column: usize,
) -> Result<TicketBook, TicketError> {
    let mut tickets = Vec::new();
    let mut first_data_row = true;

    for (i, line) in text.lines().enumerate() {
        // Row numbers in errors are 1-based physical lines, so they point
        // at the right line in an editor or spreadsheet
        let row = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let cell = match delimiter {
            Some(delim) => match split_row(line, delim).get(column - 1) {
                Some(c) => c.trim().to_string(),
                None => return Err(TicketError::MissingColumn { row, column }),
            },
            None => line.trim().to_string(),
        };

        // A ticket cell always contains digits, so a digit-free first row
        // is taken as a column header
        if first_data_row && !cell.bytes().any(|b| b.is_ascii_digit()) {
            tracing::debug!("Skipping header row {row}: '{cell}'");
            first_data_row = false;
            continue;
        }
        first_data_row = false;

        if ticket_limit_reached(tickets.len()) {
            return Err(TicketError::TooManyTickets(MAX_TICKETS));
        }
        tickets.push(parse_ticket(&cell, row, rules)?);
    }

    tracing::debug!("Parsed {} tickets", tickets.len());
    Ok(TicketBook::new(tickets))
}

/// Split one row into cells, honoring double-quoted cells so quoted
/// delimiters stay inside their cell. A doubled quote inside a quoted cell
/// unescapes to a single quote.
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> GameRules {
        GameRules::default()
    }

    #[test]
    fn test_parse_ticket_basic() {
        let combo = parse_ticket("1,2,3,4,5,6", 1, &rules()).unwrap();
        assert_eq!(combo.numbers(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_parse_ticket_tolerates_whitespace_and_trailing_comma() {
        let combo = parse_ticket("  24, 2 ,9,18 , 7,21,  ", 1, &rules()).unwrap();
        assert_eq!(combo.numbers(), &[2, 7, 9, 18, 21, 24]);
    }

    #[test]
    fn test_parse_ticket_wrong_count() {
        let err = parse_ticket("1,2,3,4,5", 3, &rules()).unwrap_err();
        assert!(matches!(
            err,
            TicketError::MalformedTicket {
                row: 3,
                expected: 6,
                found: 5,
                ..
            }
        ));

        let err = parse_ticket("1,2,3,4,5,6,7", 1, &rules()).unwrap_err();
        assert!(matches!(
            err,
            TicketError::MalformedTicket { found: 7, .. }
        ));
    }

    #[test]
    fn test_parse_ticket_non_integer() {
        let err = parse_ticket("1,2,x,4,5,6", 2, &rules()).unwrap_err();
        match err {
            TicketError::NonIntegerValue { row, fragment, .. } => {
                assert_eq!(row, 2);
                assert_eq!(fragment, "x");
            }
            other => panic!("expected NonIntegerValue, got {other:?}"),
        }

        // Decimals are not whole numbers
        let err = parse_ticket("1,2,3.5,4,5,6", 1, &rules()).unwrap_err();
        assert!(matches!(err, TicketError::NonIntegerValue { .. }));
    }

    #[test]
    fn test_parse_ticket_out_of_range() {
        let err = parse_ticket("0,2,3,4,5,6", 1, &rules()).unwrap_err();
        assert!(matches!(err, TicketError::OutOfRange { value: 0, .. }));

        let err = parse_ticket("1,2,3,4,5,26", 1, &rules()).unwrap_err();
        assert!(matches!(err, TicketError::OutOfRange { value: 26, .. }));

        // Negative numbers parse as integers first, then fail the range check
        let err = parse_ticket("-3,2,3,4,5,6", 1, &rules()).unwrap_err();
        assert!(matches!(err, TicketError::OutOfRange { value: -3, .. }));
    }

    #[test]
    fn test_parse_ticket_duplicates() {
        let err = parse_ticket("1,2,2,4,5,6", 1, &rules()).unwrap_err();
        assert!(matches!(err, TicketError::DuplicateValue { value: 2, .. }));
    }

    #[test]
    fn test_order_of_checks_count_before_parse() {
        // Five fragments, one of them junk: the count check fires first
        let err = parse_ticket("1,2,x,4,5", 1, &rules()).unwrap_err();
        assert!(matches!(err, TicketError::MalformedTicket { .. }));
    }

    #[test]
    fn test_parse_text_plain_lines() {
        let text = "1,2,3,4,5,6\n\n2,7,9,18,21,24\n";
        let book = parse_tickets_text(text, &rules(), None, 1).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.tickets()[1].numbers(), &[2, 7, 9, 18, 21, 24]);
    }

    #[test]
    fn test_parse_text_reports_physical_row() {
        // Row 1 good, row 2 blank, row 3 bad
        let text = "1,2,3,4,5,6\n\n1,2,3,4,5\n";
        let err = parse_tickets_text(text, &rules(), None, 1).unwrap_err();
        assert!(matches!(err, TicketError::MalformedTicket { row: 3, .. }));
    }

    #[test]
    fn test_parse_csv_with_header_and_quotes() {
        let text = "week,tickets,holder\n37,\"1,2,3,4,5,6\",alice\n37,\"2,7,9,18,21,24\",bob\n";
        let book = parse_tickets_text(text, &rules(), Some(','), 2).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.tickets()[0].numbers(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_parse_csv_error_row_counts_header() {
        let text = "tickets\n\"1,2,3,4,5,6\"\n\"1,2,3,4,5\"\n";
        let err = parse_tickets_text(text, &rules(), Some(','), 1).unwrap_err();
        // The bad ticket sits on physical line 3
        assert!(matches!(err, TicketError::MalformedTicket { row: 3, .. }));
    }

    #[test]
    fn test_parse_tsv_second_column() {
        let text = "id\ttickets\n7\t1,2,3,4,5,6\n";
        let book = parse_tickets_text(text, &rules(), Some('\t'), 2).unwrap();
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let text = "only-one-cell\n";
        let err = parse_tickets_text(text, &rules(), Some('\t'), 3).unwrap_err();
        assert!(matches!(
            err,
            TicketError::MissingColumn { row: 1, column: 3 }
        ));
    }

    #[test]
    fn test_first_row_with_digits_is_not_a_header() {
        // Looks header-ish but contains digits, so it must validate as a
        // ticket and fail loudly instead of being silently dropped
        let text = "ticket 1\n";
        let err = parse_tickets_text(text, &rules(), None, 1).unwrap_err();
        assert!(matches!(
            err,
            TicketError::MalformedTicket { row: 1, found: 1, .. }
        ));
    }

    #[test]
    fn test_empty_input_gives_empty_book() {
        let book = parse_tickets_text("", &rules(), None, 1).unwrap();
        assert!(book.is_empty());

        let book = parse_tickets_text("tickets\n", &rules(), Some(','), 1).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn test_ticket_limit_enforced() {
        let mut text = String::new();
        for _ in 0..=MAX_TICKETS {
            text.push_str("1,2,3,4,5,6\n");
        }
        let err = parse_tickets_text(&text, &rules(), None, 1).unwrap_err();
        assert!(matches!(err, TicketError::TooManyTickets(_)));
    }

    #[test]
    fn test_split_row_quoting() {
        assert_eq!(
            split_row("a,\"1,2,3\",c", ','),
            vec!["a".to_string(), "1,2,3".to_string(), "c".to_string()]
        );
        assert_eq!(
            split_row("\"he said \"\"hi\"\"\",x", ','),
            vec!["he said \"hi\"".to_string(), "x".to_string()]
        );
        assert_eq!(split_row("plain", ','), vec!["plain".to_string()]);
        assert_eq!(
            split_row("a\t\tb", '\t'),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn test_delimiter_for() {
        assert_eq!(delimiter_for("tickets.csv"), Some(','));
        assert_eq!(delimiter_for("TICKETS.CSV"), Some(','));
        assert_eq!(delimiter_for("book.tsv"), Some('\t'));
        assert_eq!(delimiter_for("tickets.txt"), None);
        assert_eq!(delimiter_for("tickets"), None);
    }
}
