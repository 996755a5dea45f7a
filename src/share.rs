use std::io::{self, Write};

use base64::{engine::general_purpose, Engine as _};
use crossterm::{queue, style::Print};

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("nothing to copy")]
    Empty,
    #[error("terminal write failed: {0}")]
    Write(#[from] io::Error),
}

/// Text placed on the clipboard. Finished runs brag about the score.
pub fn share_message(share_url: &str, result: Option<(&str, f64)>) -> String {
    let mut text = match result {
        Some((name, score)) => {
            format!("{} scored {:.0} in Rhythmon! Can you beat it?", name, score)
        }
        None => "Play Rhythmon, a rhythm quiz with a boss battle!".to_string(),
    };
    let url = share_url.trim();
    if !url.is_empty() {
        text.push(' ');
        text.push_str(url);
    }
    text
}

/// OSC 52 clipboard request. Terminals without support ignore it.
pub fn osc52_sequence(text: &str) -> String {
    let payload = general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

pub fn copy_to_clipboard(out: &mut impl Write, text: &str) -> Result<(), ShareError> {
    if text.trim().is_empty() {
        return Err(ShareError::Empty);
    }
    queue!(out, Print(osc52_sequence(text)))?;
    out.flush()?;
    Ok(())
}
