use crate::error::{ProcessingError, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Answer to the save confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    Save,
    Declined,
}

/// Line-oriented questions on a reader/writer pair (stdin/stdout in the binary).
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label: ` and return the trimmed answer.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        self.read_answer()
    }

    /// Like [`ask`](Self::ask), but an empty answer picks `default`.
    pub fn ask_with_default(&mut self, label: &str, default: &str) -> Result<String> {
        write!(self.output, "{} [{}]: ", label, default)?;
        self.output.flush()?;
        let answer = self.read_answer()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Ask until the answer is yes or no.
    pub fn confirm_save(&mut self, path: &Path) -> Result<SaveDecision> {
        loop {
            let answer = self
                .ask(&format!(
                    "Are you sure you want to save {}? Please enter 'y' to continue or 'n' to cancel and exit program",
                    path.display()
                ))?
                .to_lowercase();

            match answer.as_str() {
                "y" | "yes" => return Ok(SaveDecision::Save),
                "n" | "no" => return Ok(SaveDecision::Declined),
                _ => self.say("Invalid input.")?,
            }
        }
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ProcessingError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }
        Ok(line.trim().to_string())
    }
}
