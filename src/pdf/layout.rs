//! Text measurement and word wrapping for table cells.
//!
//! Widths are an approximation of Helvetica metrics (units per 1000 em),
//! biased slightly wide so wrapped lines never overflow their column.
//! Good enough for layout; the viewer does the actual glyph rendering.

fn glyph_width(c: char) -> u32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '!' | ',' | '.' | ':' | ';' | '|' => 230,
        ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '{' | '}' | '/' | '\\' | '-' => 290,
        'm' | 'w' => 800,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 510,
        'I' => 290,
        'J' => 510,
        'M' | 'W' => 920,
        'A'..='Z' => 722,
        '0'..='9' => 556,
        _ => 560,
    }
}

/// Approximate rendered width of `s` at `size` points.
pub(crate) fn text_width(s: &str, size: f32) -> f32 {
    let units: u32 = s.chars().map(glyph_width).sum();
    units as f32 * size / 1000.0
}

/// Hard-break a single word that is wider than `max_width`.
fn break_word(word: &str, size: f32, max_width: f32, out: &mut Vec<String>) {
    let mut line = String::new();
    for c in word.chars() {
        let mut candidate = line.clone();
        candidate.push(c);
        if !line.is_empty() && text_width(&candidate, size) > max_width {
            out.push(line.clone());
            line.clear();
            line.push(c);
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
}

/// Greedy word wrap. Always yields at least one (possibly empty) line so
/// every cell occupies one row of height.
pub(crate) fn wrap_text(s: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split_whitespace() {
        if text_width(word, size) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            break_word(word, size, max_width, &mut lines);
            // continue filling from the last fragment
            if let Some(last) = lines.pop() {
                current = last;
            }
            continue;
        }
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && text_width(&candidate, size) > max_width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for a WinAnsi-encoded Type1 font. ASCII passes through,
/// the common typographic extras map to their WinAnsi bytes, anything
/// else degrades to `'?'`.
pub(crate) fn encode_winansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 => c as u8,
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_grows_with_content() {
        assert_eq!(text_width("", 8.0), 0.0);
        assert!(text_width("wide words", 8.0) > text_width("ii", 8.0));
        assert!(text_width("abc", 10.0) > text_width("abc", 8.0));
    }

    #[test]
    fn test_wrap_empty_yields_one_empty_line() {
        assert_eq!(wrap_text("", 8.0, 100.0), vec![String::new()]);
        assert_eq!(wrap_text("   ", 8.0, 100.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_short_text_stays_on_one_line() {
        assert_eq!(wrap_text("U4001", 8.0, 100.0), vec!["U4001".to_string()]);
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries_within_width() {
        let lines = wrap_text("check the termination resistors on both ends", 8.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 8.0) <= 60.0, "overflowing line: {line}");
        }
    }

    #[test]
    fn test_wrap_hard_breaks_oversized_words() {
        let lines = wrap_text("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", 8.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 8.0) <= 40.0, "overflowing line: {line}");
        }
    }

    #[test]
    fn test_encode_winansi_maps_bullet_and_dashes() {
        assert_eq!(encode_winansi("a"), vec![b'a']);
        assert_eq!(encode_winansi("\u{2022}"), vec![0x95]);
        assert_eq!(encode_winansi("\u{2013}"), vec![0x96]);
        assert_eq!(encode_winansi("\u{4e2d}"), vec![b'?']);
    }
}
