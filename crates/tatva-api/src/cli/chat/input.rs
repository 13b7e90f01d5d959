//! Async readline input for the chat loop.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line (already trimmed).
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Prompt text: `You >` plus the active result when there is one.
pub fn prompt_for(active: Option<usize>, total: usize) -> String {
    match active {
        Some(index) => format!(
            "  {} {} ",
            style(format!("[{}/{}]", index + 1, total)).dim(),
            style("You >").green().bold()
        ),
        None => format!("  {} ", style("You >").green().bold()),
    }
}

pub struct ChatInput {
    rl: Readline,
    prompt: String,
}

impl ChatInput {
    /// Returns the handler and a `SharedWriter` for printing around the prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt.clone())?;
        Ok((Self { rl, prompt }, stdout))
    }

    /// Swap the prompt, skipping the terminal write when nothing changed.
    pub fn set_prompt(&mut self, prompt: String) {
        if prompt != self.prompt {
            let _ = self.rl.update_prompt(&prompt);
            self.prompt = prompt;
        }
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Message(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Restore the terminal before the process prints its last lines.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}
