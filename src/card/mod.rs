use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tracing::error;

use crate::clipboard::Clipboard;
use crate::record::CheatRecord;

pub const COPY_CONFIRMATION: Duration = Duration::from_millis(2000);

pub const DEFAULT_IMAGES: [&str; 4] = [
    "./assets/img1.png",
    "./assets/img2.png",
    "./assets/img3.png",
    "./assets/img4.jpg",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePool {
    images: Vec<String>,
}

impl Default for ImagePool {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ImagePool {
    /// Falls back to the default pool when `images` is empty.
    pub fn new(images: Vec<String>) -> Self {
        let images: Vec<String> = images
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if images.is_empty() {
            return Self::default();
        }
        Self { images }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn pick(&self) -> &str {
        let idx = rand::rng().random_range(0..self.images.len());
        &self.images[idx]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyIcon {
    Copy,
    Confirmed,
}

impl CopyIcon {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Copy => "content_copy",
            Self::Confirmed => "check_circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CodeHidden,
    Failed,
}

/// A rendered cheat with its own reveal and copy state.
#[derive(Clone, Debug)]
pub struct Card {
    pub image: String,
    pub title: String,
    pub body: String,
    code: String,
    revealed: bool,
    confirm_until: Option<Instant>,
}

impl Card {
    pub fn new(record: &CheatRecord, pool: &ImagePool) -> Self {
        Self {
            image: pool.pick().to_string(),
            title: record.reward().to_string(),
            body: record.description().to_string(),
            code: record.code().to_string(),
            revealed: false,
            confirm_until: None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The code, once the card has been revealed.
    pub fn code(&self) -> Option<&str> {
        self.revealed.then_some(self.code.as_str())
    }

    /// The code whether or not it has been revealed.
    pub fn stored_code(&self) -> &str {
        &self.code
    }

    /// One-way: there is no way to hide the code again.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> CopyOutcome {
        if !self.revealed {
            return CopyOutcome::CodeHidden;
        }
        match clipboard.write_text(&self.code) {
            Ok(()) => {
                self.confirm_until = Some(now + COPY_CONFIRMATION);
                CopyOutcome::Copied
            }
            Err(e) => {
                error!("Failed to copy: {e}");
                CopyOutcome::Failed
            }
        }
    }

    pub fn copy_icon(&self, now: Instant) -> CopyIcon {
        match self.confirm_until {
            Some(deadline) if now < deadline => CopyIcon::Confirmed,
            _ => CopyIcon::Copy,
        }
    }

    /// Pending confirmation deadline, if the icon still has to revert.
    pub fn revert_at(&self, now: Instant) -> Option<Instant> {
        self.confirm_until.filter(|d| *d > now)
    }
}
