//! Prompt plumbing for the interactive flows.
//!
//! The editor and browser take a `PromptSource` so their session logic can
//! be driven by scripted input in tests; the binary hands them
//! `StdinPrompt`. EOF is reported as `UnexpectedEof` and callers treat it
//! like a cancel.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Reserved token that aborts a whole edit session, checked after every
/// field prompt (case insensitive).
pub const CANCEL_TOKEN: &str = "C";

pub fn is_cancel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(CANCEL_TOKEN)
}

pub trait PromptSource {
    /// Show `prompt` and return one line of input without its newline.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Interactive prompts on stdout/stdin.
pub struct StdinPrompt;

impl PromptSource for StdinPrompt {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// Canned replies for tests; exhausting the script reads as EOF.
pub struct ScriptedPrompt {
    replies: VecDeque<String>,
    pub prompts_seen: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(replies: &[&str]) -> Self {
        ScriptedPrompt {
            replies: replies.iter().map(|s| s.to_string()).collect(),
            prompts_seen: Vec::new(),
        }
    }
}

impl PromptSource for ScriptedPrompt {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts_seen.push(prompt.to_string());
        self.replies
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cancel_matches_token_case_insensitively() {
        assert!(is_cancel("C"));
        assert!(is_cancel(" c "));
        assert!(!is_cancel(""));
        assert!(!is_cancel("cancel"));
    }

    #[test]
    fn test_scripted_prompt_replays_then_eofs() {
        let mut p = ScriptedPrompt::new(&["one", "two"]);
        assert_eq!(p.prompt_line("a: ").expect("one"), "one");
        assert_eq!(p.prompt_line("b: ").expect("two"), "two");
        assert!(p.prompt_line("c: ").is_err());
        assert_eq!(p.prompts_seen.len(), 3);
    }
}
