// Line-oriented terminal prompter.
//
// Owns the re-prompt loops: `confirm` only returns on Y/N, `choose` only on
// a number in range. End of input surfaces as `MatchError::InputClosed`.

use std::io::{BufRead, Write};

use prodnorm_matcher::{MatchError, Prompter};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Print `prompt` (no newline) and read one line, without its line ending.
    pub fn ask(&mut self, prompt: &str) -> Result<String, MatchError> {
        write!(self.output, "{prompt}").map_err(|e| MatchError::Prompt(e.to_string()))?;
        self.output.flush().map_err(|e| MatchError::Prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| MatchError::Prompt(e.to_string()))?;
        if read == 0 {
            return Err(MatchError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Print one line.
    pub fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool, MatchError> {
        loop {
            let answer = self.ask(&format!("{question} (Y/N): "))?;
            match answer.trim().to_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                _ => self.say("Please enter Y or N"),
            }
        }
    }

    fn choose(&mut self, question: &str, max: usize) -> Result<usize, MatchError> {
        loop {
            let answer = self.ask(&format!("{question} (0-{max}): "))?;
            match answer.trim().parse::<usize>() {
                Ok(n) if n <= max => return Ok(n),
                _ => self.say(&format!("Please enter a number between 0 and {max}")),
            }
        }
    }

    fn note(&mut self, message: &str) {
        self.say(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(t: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(t.output().clone()).unwrap()
    }

    #[test]
    fn ask_strips_line_ending_only() {
        let mut t = terminal("  name.xlsx \r\n");
        assert_eq!(t.ask("File: ").unwrap(), "  name.xlsx ");
        assert_eq!(printed(&t), "File: ");
    }

    #[test]
    fn eof_is_input_closed() {
        let mut t = terminal("");
        assert_eq!(t.ask("File: "), Err(MatchError::InputClosed));
    }

    #[test]
    fn confirm_reprompts_until_y_or_n() {
        let mut t = terminal("maybe\nyes\n y \n");
        assert!(t.confirm("Accept this change?").unwrap());
        let out = printed(&t);
        assert_eq!(out.matches("Please enter Y or N").count(), 2);
        assert_eq!(out.matches("Accept this change? (Y/N): ").count(), 3);
    }

    #[test]
    fn confirm_is_case_insensitive() {
        let mut t = terminal("n\n");
        assert!(!t.confirm("Add?").unwrap());
    }

    #[test]
    fn choose_rejects_out_of_range_and_text() {
        let mut t = terminal("abc\n7\n-1\n2\n");
        assert_eq!(t.choose("Pick", 3).unwrap(), 2);
        assert_eq!(printed(&t).matches("Please enter a number between 0 and 3").count(), 3);
    }

    #[test]
    fn choose_accepts_zero() {
        let mut t = terminal("0\n");
        assert_eq!(t.choose("Pick", 5).unwrap(), 0);
    }

    #[test]
    fn eof_while_reprompting() {
        let mut t = terminal("x\n");
        assert_eq!(t.confirm("Add?"), Err(MatchError::InputClosed));
    }
}
