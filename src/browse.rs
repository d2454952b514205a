//! Paginated selection over the record sequence.

use std::io;

use crate::catalog::DtcRecord;
use crate::prompt::{is_cancel, PromptSource};

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Number of pages for a catalog; never below 1, even when empty.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if total == 0 {
        1
    } else {
        (total + page_size - 1) / page_size
    }
}

/// Half-open `[start, end)` bounds of a page within the catalog.
pub fn page_bounds(total: usize, page_size: usize, page: usize) -> (usize, usize) {
    let start = page * page_size;
    let end = (start + page_size).min(total);
    (start.min(total), end)
}

#[derive(Debug, PartialEq, Eq)]
pub enum PageChoice {
    Next,
    Prev,
    Cancel,
    Pick(usize),
    Invalid,
}

/// Classify one line of navigation input. `Pick` carries the 1-based
/// in-page position as typed; range checking happens against the page.
pub fn parse_page_choice(input: &str) -> PageChoice {
    let t = input.trim();
    if is_cancel(t) {
        return PageChoice::Cancel;
    }
    match t.to_ascii_uppercase().as_str() {
        "N" => PageChoice::Next,
        "P" => PageChoice::Prev,
        _ => match t.parse::<usize>() {
            Ok(n) => PageChoice::Pick(n),
            Err(_) => PageChoice::Invalid,
        },
    }
}

/// Let the user pick a record from fixed-size pages. Returns the global
/// catalog index of the selection, or `None` on cancel. Out-of-range
/// picks and unusable navigation re-prompt; they never error.
pub fn select_paginated(
    records: &[DtcRecord],
    page_size: usize,
    prompt: &mut dyn PromptSource,
) -> io::Result<Option<usize>> {
    let total_pages = page_count(records.len(), page_size);
    let mut page = 0usize;

    loop {
        let (start, end) = page_bounds(records.len(), page_size, page);
        println!("=== Select DTC (Page {}/{}) ===", page + 1, total_pages);
        println!();
        for (i, dtc) in records[start..end].iter().enumerate() {
            let title = if dtc.title.is_empty() {
                "Untitled"
            } else {
                dtc.title.as_str()
            };
            println!("{}. {} - {}", i + 1, dtc.code, title);
        }
        let mut nav = Vec::new();
        if page > 0 {
            nav.push("P = Previous page");
        }
        if page + 1 < total_pages {
            nav.push("N = Next page");
        }
        nav.push("C = Cancel");
        println!();
        println!("{}", nav.join("   "));

        let line = prompt.prompt_line("\nSelect DTC by number: ")?;
        match parse_page_choice(&line) {
            PageChoice::Cancel => return Ok(None),
            PageChoice::Next if page + 1 < total_pages => page += 1,
            PageChoice::Prev if page > 0 => page -= 1,
            PageChoice::Pick(n) if n >= 1 && n <= end - start => {
                return Ok(Some(start + n - 1));
            }
            _ => println!("Invalid selection. Try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;

    fn records(n: usize) -> Vec<DtcRecord> {
        (0..n)
            .map(|i| DtcRecord {
                code: format!("U40{:02}", i),
                header: "Network".to_string(),
                category: "Communication Systems".to_string(),
                title: format!("record {i}"),
                description: String::new(),
                possible_fixes: Vec::new(),
                pinpoint_test: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_page_count_minimum_one_page() {
        assert_eq!(page_count(0, 25), 1);
        assert_eq!(page_count(1, 25), 1);
        assert_eq!(page_count(25, 25), 1);
        assert_eq!(page_count(26, 25), 2);
    }

    #[test]
    fn test_page_bounds_last_page_may_be_short() {
        assert_eq!(page_bounds(26, 25, 0), (0, 25));
        assert_eq!(page_bounds(26, 25, 1), (25, 26));
        assert_eq!(page_bounds(0, 25, 0), (0, 0));
    }

    #[test]
    fn test_parse_page_choice() {
        assert_eq!(parse_page_choice("n"), PageChoice::Next);
        assert_eq!(parse_page_choice(" P "), PageChoice::Prev);
        assert_eq!(parse_page_choice("c"), PageChoice::Cancel);
        assert_eq!(parse_page_choice("12"), PageChoice::Pick(12));
        assert_eq!(parse_page_choice("x"), PageChoice::Invalid);
        assert_eq!(parse_page_choice(""), PageChoice::Invalid);
    }

    #[test]
    fn test_select_picks_global_index_on_second_page() {
        let recs = records(26);
        let mut prompt = ScriptedPrompt::new(&["N", "1"]);
        let got = select_paginated(&recs, 25, &mut prompt).expect("select");
        assert_eq!(got, Some(25));
    }

    #[test]
    fn test_select_out_of_range_reprompts_then_accepts() {
        let recs = records(3);
        let mut prompt = ScriptedPrompt::new(&["9", "2"]);
        let got = select_paginated(&recs, 25, &mut prompt).expect("select");
        assert_eq!(got, Some(1));
    }

    #[test]
    fn test_select_next_on_last_page_reprompts() {
        let recs = records(3);
        let mut prompt = ScriptedPrompt::new(&["N", "C"]);
        let got = select_paginated(&recs, 25, &mut prompt).expect("select");
        assert_eq!(got, None);
    }

    #[test]
    fn test_select_cancel_returns_none() {
        let recs = records(5);
        let mut prompt = ScriptedPrompt::new(&["C"]);
        assert_eq!(select_paginated(&recs, 25, &mut prompt).expect("select"), None);
    }
}
