use std::io::{IsTerminal, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Largest base64 payload most terminals accept in one OSC 52 sequence.
pub const MAX_OSC52_PAYLOAD: usize = 74_994;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard not available: {reason}")]
    NotAvailable { reason: String },

    #[error("clipboard payload too large ({len} bytes, limit {limit})")]
    TooLarge { len: usize, limit: usize },

    #[error("clipboard write failed: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

pub fn osc52_sequence(text: &str) -> Result<String, ClipboardError> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > MAX_OSC52_PAYLOAD {
        return Err(ClipboardError::TooLarge {
            len: encoded.len(),
            limit: MAX_OSC52_PAYLOAD,
        });
    }
    Ok(format!("\x1b]52;c;{encoded}\x07"))
}

/// Sets the system clipboard through the terminal with an OSC 52 escape.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    enabled: bool,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        let out = std::io::stdout();
        let enabled = out.is_terminal();
        Self { out, enabled }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out, enabled: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.enabled {
            return Err(ClipboardError::NotAvailable {
                reason: "stdout is not a terminal".to_string(),
            });
        }
        let seq = osc52_sequence(text)?;
        self.out
            .write_all(seq.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|source| ClipboardError::Write { source })
    }
}
