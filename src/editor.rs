//! In-memory mutation of a single record: interactive creation and the
//! all-or-nothing edit session.
//!
//! Edits accumulate in a draft clone of the record; the caller replaces
//! the original and persists only on `Committed`. The cancel token aborts
//! the whole session, so a half-finished edit never reaches the catalog.

use std::io;

use crate::catalog::{
    assign_code, category_key_for_display, code_suffix, header_key_for_display, pad_suffix,
    CATEGORIES, HEADERS,
};
use crate::catalog::DtcRecord;
use crate::prompt::{is_cancel, PromptSource};

#[derive(Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Committed(DtcRecord),
    Cancelled,
}

/// Remove a fix by its 1-based displayed position. `None` (and no change)
/// when the position is out of range.
pub fn remove_fix(fixes: &mut Vec<String>, position: usize) -> Option<String> {
    if position >= 1 && position <= fixes.len() {
        Some(fixes.remove(position - 1))
    } else {
        None
    }
}

fn print_header_menu() {
    for (i, (letter, desc)) in HEADERS.iter().enumerate() {
        println!("{}. {} - {}", i + 1, letter, desc);
    }
}

fn print_category_menu() {
    for (i, (prefix, desc)) in CATEGORIES.iter().enumerate() {
        println!("{}. {} - {}", i + 1, prefix, desc);
    }
}

/// Parse a 1-based menu selection; `None` for non-numeric or out-of-range.
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}

/// Re-prompt until a valid 1-based selection arrives; invalid input never
/// escapes this loop.
fn select_required(
    prompt: &mut dyn PromptSource,
    label: &str,
    len: usize,
) -> io::Result<usize> {
    loop {
        let line = prompt.prompt_line(label)?;
        let t = line.trim();
        if t.parse::<usize>().is_err() {
            println!("Please enter a valid number.");
            continue;
        }
        match parse_selection(t, len) {
            Some(i) => return Ok(i),
            None => println!("Invalid selection. Try again."),
        }
    }
}

/// Interactive creation: collects every field and builds the record via
/// the code assigner. The caller appends it to the catalog and persists.
pub fn collect_new_record(prompt: &mut dyn PromptSource) -> io::Result<DtcRecord> {
    println!("=== Create New DTC ===");
    println!();
    println!("Select a header type:");
    print_header_menu();
    let hi = select_required(prompt, "\nEnter header number: ", HEADERS.len())?;
    let (header_letter, header_desc) = HEADERS[hi];

    println!();
    println!("=== {} - {} ===", header_letter, header_desc);
    println!("Select a category:");
    print_category_menu();
    let ci = select_required(prompt, "\nEnter category number: ", CATEGORIES.len())?;
    let (prefix, category_desc) = CATEGORIES[ci];

    let suffix = prompt.prompt_line(&format!(
        "Enter 2-digit code for {} (e.g., 01 for {}01): ",
        prefix,
        &prefix[..3]
    ))?;
    let code = assign_code(header_letter, prefix, &suffix);

    println!();
    println!("Creating DTC {} ({})", code, category_desc);
    println!();
    let title = prompt.prompt_line("Enter DTC title: ")?;
    let description = prompt.prompt_line("Enter DTC description: ")?;

    println!();
    println!("Enter possible fixes (blank line to finish):");
    let mut possible_fixes = Vec::new();
    loop {
        let fix = prompt.prompt_line(" - ")?;
        if fix.trim().is_empty() {
            break;
        }
        possible_fixes.push(fix);
    }

    let pinpoint_test = prompt.prompt_line("\nEnter pinpoint test code (e.g., PP-001): ")?;

    Ok(DtcRecord {
        code,
        header: header_desc.to_string(),
        category: category_desc.to_string(),
        title,
        description,
        possible_fixes,
        pinpoint_test,
    })
}

/// One edit session over a draft copy of `current`. Every field prompt
/// accepts the cancel token; blank input keeps the current value. The
/// header/category enumeration keys are recovered by reverse lookup when
/// no new selection is given, so a suffix edit recomputes the code
/// consistently with whatever header/category the record ends up with.
pub fn edit_record(
    current: &DtcRecord,
    prompt: &mut dyn PromptSource,
) -> io::Result<EditOutcome> {
    let mut draft = current.clone();
    println!("Editing {} - {}", draft.code, draft.title);
    println!();

    // Header
    println!("Select new header (leave blank to keep current, 'C' to cancel):");
    print_header_menu();
    let line = prompt.prompt_line(&format!("Current: {} > ", draft.header))?;
    if is_cancel(&line) {
        return Ok(EditOutcome::Cancelled);
    }
    let header_key = match parse_selection(&line, HEADERS.len()) {
        Some(i) => {
            draft.header = HEADERS[i].1.to_string();
            HEADERS[i].0
        }
        None => header_key_for_display(&draft.header).unwrap_or("U"),
    };

    // Category
    println!();
    println!("Select new category (leave blank to keep current, 'C' to cancel):");
    print_category_menu();
    let line = prompt.prompt_line(&format!("Current: {} > ", draft.category))?;
    if is_cancel(&line) {
        return Ok(EditOutcome::Cancelled);
    }
    let category_key = match parse_selection(&line, CATEGORIES.len()) {
        Some(i) => {
            draft.category = CATEGORIES[i].1.to_string();
            CATEGORIES[i].0
        }
        None => category_key_for_display(&draft.category).unwrap_or("x40xx"),
    };

    // Code suffix
    let line = prompt.prompt_line(&format!(
        "\nEnter 2-digit code for this DTC (Current: {}, 'C' to cancel) > ",
        code_suffix(&draft.code)
    ))?;
    if is_cancel(&line) {
        return Ok(EditOutcome::Cancelled);
    }
    let suffix = if line.trim().is_empty() {
        code_suffix(&draft.code)
    } else {
        pad_suffix(line.trim())
    };
    draft.code = assign_code(header_key, category_key, &suffix);

    // Title / description / pinpoint test
    let line = prompt.prompt_line(&format!("\nTitle [{}] (C to cancel): ", draft.title))?;
    if is_cancel(&line) {
        return Ok(EditOutcome::Cancelled);
    }
    if !line.trim().is_empty() {
        draft.title = line.trim().to_string();
    }

    let line = prompt.prompt_line(&format!("Description [{}] (C to cancel): ", draft.description))?;
    if is_cancel(&line) {
        return Ok(EditOutcome::Cancelled);
    }
    if !line.trim().is_empty() {
        draft.description = line.trim().to_string();
    }

    let line = prompt.prompt_line(&format!(
        "Pinpoint Test [{}] (C to cancel): ",
        draft.pinpoint_test
    ))?;
    if is_cancel(&line) {
        return Ok(EditOutcome::Cancelled);
    }
    if !line.trim().is_empty() {
        draft.pinpoint_test = line.trim().to_string();
    }

    // Possible fixes
    println!();
    println!("Possible Fixes:");
    for (i, fix) in draft.possible_fixes.iter().enumerate() {
        println!(" {}. {}", i + 1, fix);
    }
    println!();
    println!("[A] Add Fix   [R] Remove Fix   [Enter] Skip   [C] Cancel");
    let action = prompt.prompt_line("Select action: ")?;
    if is_cancel(&action) {
        return Ok(EditOutcome::Cancelled);
    }
    match action.trim().to_ascii_uppercase().as_str() {
        "A" => loop {
            let line = prompt.prompt_line(" - New fix (blank to stop, 'C' to cancel): ")?;
            if is_cancel(&line) {
                return Ok(EditOutcome::Cancelled);
            }
            let fix = line.trim();
            if fix.is_empty() {
                break;
            }
            draft.possible_fixes.push(fix.to_string());
        },
        "R" => loop {
            let line =
                prompt.prompt_line("Enter fix number to remove (blank to stop, 'C' to cancel): ")?;
            if is_cancel(&line) {
                return Ok(EditOutcome::Cancelled);
            }
            let t = line.trim();
            if t.is_empty() {
                break;
            }
            match t.parse::<usize>() {
                Ok(n) => match remove_fix(&mut draft.possible_fixes, n) {
                    Some(removed) => println!("Removed: {}", removed),
                    None => println!("Invalid fix number."),
                },
                Err(_) => println!("Invalid input."),
            }
        },
        _ => {}
    }

    Ok(EditOutcome::Committed(draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;

    fn base_record() -> DtcRecord {
        DtcRecord {
            code: "U4001".to_string(),
            header: "Network".to_string(),
            category: "Communication Systems".to_string(),
            title: "CAN bus offline".to_string(),
            description: "No traffic on the custom segment".to_string(),
            possible_fixes: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            pinpoint_test: "PP-001".to_string(),
        }
    }

    #[test]
    fn test_remove_fix_by_position() {
        let mut fixes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(remove_fix(&mut fixes, 2), Some("b".to_string()));
        assert_eq!(fixes, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_remove_fix_out_of_range_leaves_list_unchanged() {
        let mut fixes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(remove_fix(&mut fixes, 5), None);
        assert_eq!(remove_fix(&mut fixes, 0), None);
        assert_eq!(fixes.len(), 3);
    }

    #[test]
    fn test_collect_new_record_builds_code_and_fields() {
        // header 4 (U/Network), category 1 (x40xx), suffix "1", two fixes
        let mut prompt = ScriptedPrompt::new(&[
            "4",
            "1",
            "1",
            "CAN bus offline",
            "No traffic seen",
            "Check termination",
            "Reseat connector",
            "",
            "PP-014",
        ]);
        let rec = collect_new_record(&mut prompt).expect("create");
        assert_eq!(rec.code, "U4001");
        assert_eq!(rec.header, "Network");
        assert_eq!(rec.category, "Communication Systems");
        assert_eq!(rec.title, "CAN bus offline");
        assert_eq!(
            rec.possible_fixes,
            vec!["Check termination".to_string(), "Reseat connector".to_string()]
        );
        assert_eq!(rec.pinpoint_test, "PP-014");
    }

    #[test]
    fn test_collect_new_record_reprompts_on_bad_selection() {
        let mut prompt = ScriptedPrompt::new(&[
            "nine", "9", "4", // header: non-numeric, out of range, then valid
            "1", "07", "t", "d", "", "",
        ]);
        let rec = collect_new_record(&mut prompt).expect("create");
        assert_eq!(rec.code, "U4007");
    }

    #[test]
    fn test_edit_blank_everywhere_keeps_record() {
        let rec = base_record();
        let mut prompt = ScriptedPrompt::new(&["", "", "", "", "", "", ""]);
        match edit_record(&rec, &mut prompt).expect("edit") {
            EditOutcome::Committed(draft) => assert_eq!(draft, rec),
            EditOutcome::Cancelled => panic!("should commit"),
        }
    }

    #[test]
    fn test_edit_cancel_mid_session_discards_earlier_changes() {
        let rec = base_record();
        // keep header/category/code, change title, cancel at description
        let mut prompt = ScriptedPrompt::new(&["", "", "", "New title", "C"]);
        assert_eq!(
            edit_record(&rec, &mut prompt).expect("edit"),
            EditOutcome::Cancelled
        );
    }

    #[test]
    fn test_edit_new_header_recomputes_code_with_kept_category() {
        let rec = base_record();
        // header -> 1 (P/Powertrain); category kept via reverse lookup (x40xx);
        // suffix "9" zero-pads
        let mut prompt = ScriptedPrompt::new(&["1", "", "9", "", "", "", ""]);
        match edit_record(&rec, &mut prompt).expect("edit") {
            EditOutcome::Committed(draft) => {
                assert_eq!(draft.header, "Powertrain");
                assert_eq!(draft.code, "P4009");
                assert_eq!(draft.category, "Communication Systems");
            }
            EditOutcome::Cancelled => panic!("should commit"),
        }
    }

    #[test]
    fn test_edit_unknown_header_display_falls_back_to_network() {
        let mut rec = base_record();
        rec.header = "Gearbox".to_string(); // not in the table
        let mut prompt = ScriptedPrompt::new(&["", "", "42", "", "", "", ""]);
        match edit_record(&rec, &mut prompt).expect("edit") {
            EditOutcome::Committed(draft) => assert_eq!(draft.code, "U4042"),
            EditOutcome::Cancelled => panic!("should commit"),
        }
    }

    #[test]
    fn test_edit_fix_removal_flow() {
        let rec = base_record();
        // remove position 2, then out-of-range 5 (message + re-prompt), then stop
        let mut prompt = ScriptedPrompt::new(&["", "", "", "", "", "", "R", "2", "5", ""]);
        match edit_record(&rec, &mut prompt).expect("edit") {
            EditOutcome::Committed(draft) => {
                assert_eq!(
                    draft.possible_fixes,
                    vec!["a".to_string(), "c".to_string()]
                );
            }
            EditOutcome::Cancelled => panic!("should commit"),
        }
    }

    #[test]
    fn test_edit_fix_append_until_blank() {
        let rec = base_record();
        let mut prompt = ScriptedPrompt::new(&["", "", "", "", "", "", "A", "d", "e", ""]);
        match edit_record(&rec, &mut prompt).expect("edit") {
            EditOutcome::Committed(draft) => {
                assert_eq!(draft.possible_fixes.len(), 5);
                assert_eq!(draft.possible_fixes[4], "e");
            }
            EditOutcome::Cancelled => panic!("should commit"),
        }
    }

    #[test]
    fn test_edit_cancel_inside_fix_subflow() {
        let rec = base_record();
        let mut prompt = ScriptedPrompt::new(&["", "", "", "", "", "", "R", "C"]);
        assert_eq!(
            edit_record(&rec, &mut prompt).expect("edit"),
            EditOutcome::Cancelled
        );
    }
}
