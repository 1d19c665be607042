//! Human-in-the-loop input
//!
//! Steps never read the terminal directly; they ask an [`InputSource`]. The choice
//! helpers re-prompt on invalid answers with no retry cap.

use crate::error::{Result, SkillGapError};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

pub trait InputSource: Send + Sync {
    /// Show `prompt` and return one raw line of input. End of input is `InputClosed`.
    fn read_line(&self, prompt: &str) -> Result<String>;

    /// Show an informational message.
    fn say(&self, message: &str);
}

/// Reads answers from stdin.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn read_line(&self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(SkillGapError::InputClosed);
        }
        Ok(line)
    }

    fn say(&self, message: &str) {
        println!("{}", message);
    }
}

/// Replays a fixed list of answers. Records every prompt and message it was shown.
#[derive(Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn transcript(&self) -> Vec<String> {
        self.transcript.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or(0)
    }

    fn record(&self, line: &str) {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push(line.to_string());
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        let mut answers = self
            .answers
            .lock()
            .map_err(|_| SkillGapError::InvalidInput("scripted input poisoned".to_string()))?;
        answers.pop_front().ok_or(SkillGapError::InputClosed)
    }

    fn say(&self, message: &str) {
        self.record(message);
    }
}

/// Ask until the trimmed answer is exactly one of `valid`.
pub fn choose_option(input: &dyn InputSource, prompt: &str, valid: &[&str]) -> Result<String> {
    loop {
        let answer = input.read_line(prompt)?;
        let answer = answer.trim();
        if valid.contains(&answer) {
            return Ok(answer.to_string());
        }
        input.say(&format!("   ⚠️ Invalid input. Enter {}.", valid.join(" or ")));
    }
}

/// Ask until the answer is a number in `1..=count`; returns the zero-based index.
pub fn choose_index(input: &dyn InputSource, prompt: &str, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(SkillGapError::InvalidInput("nothing to choose from".to_string()));
    }

    loop {
        let answer = input.read_line(prompt)?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
            Ok(_) => input.say("❌ Invalid number. Try again."),
            Err(_) => input.say("❌ Please enter a number."),
        }
    }
}
