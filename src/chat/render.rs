//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation uses ANSI
//! escape codes to tell the visitor's turns, the persona's replies and
//! portfolio content apart.

use std::io::{self, Stdout, Write};

use crate::portfolio::{AssetResolver, Profile, Resolved, Section, resolve_or_placeholder};
use crate::types::{Role, Turn};

/// ANSI escape code for bold text (used for headings).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for captions and placeholders).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the persona's label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the visitor's label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for notices).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Anything else that can show a chat log and static content
pub trait Renderer: Send {
    /// Print one visible turn.  `persona` labels assistant turns.
    fn print_turn(&mut self, persona: &str, turn: &Turn);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a notice the visitor should act on, like a missing API key.
    fn print_notice(&mut self, notice: &str);

    /// Print the profile header: name, headline, contacts, intro, avatar.
    fn print_profile(&mut self, profile: &Profile, assets: &dyn AssetResolver);

    /// Print one portfolio section.
    fn print_section(&mut self, section: &Section, assets: &dyn AssetResolver);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            out: io::stdout(),
            use_color,
        }
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer that writes to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, code: &'static str) -> &'static str {
        if self.use_color { code } else { "" }
    }

    fn reset(&self) -> &'static str {
        self.style(ANSI_RESET)
    }

    // Output errors are ignored: there is nowhere better to report them.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn image(&mut self, key: &str, caption: Option<&str>, assets: &dyn AssetResolver) {
        let dim = self.style(ANSI_DIM);
        let reset = self.reset();
        let shown = match resolve_or_placeholder(assets, key) {
            Resolved::Asset(asset) => format!("[image: {}]", asset.location),
            Resolved::Placeholder(text) => text,
        };
        match caption {
            Some(caption) => self.line(&format!("{dim}{shown} {caption}{reset}")),
            None => self.line(&format!("{dim}{shown}{reset}")),
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_turn(&mut self, persona: &str, turn: &Turn) {
        let reset = self.reset();
        let label = match turn.role {
            Role::User => format!("{}You:{reset}", self.style(ANSI_GREEN)),
            Role::Assistant => format!("{}{persona}:{reset}", self.style(ANSI_CYAN)),
            Role::System => return,
        };
        self.line(&label);
        self.line(&turn.content);
        self.line("");
    }

    fn print_error(&mut self, error: &str) {
        let red = self.style(ANSI_RED);
        let reset = self.reset();
        self.line(&format!("{red}Error: {error}{reset}"));
    }

    fn print_info(&mut self, info: &str) {
        self.line(info);
    }

    fn print_notice(&mut self, notice: &str) {
        let yellow = self.style(ANSI_YELLOW);
        let reset = self.reset();
        self.line(&format!("{yellow}! {notice}{reset}"));
    }

    fn print_profile(&mut self, profile: &Profile, assets: &dyn AssetResolver) {
        let bold = self.style(ANSI_BOLD);
        let reset = self.reset();
        if let Some(avatar) = &profile.avatar {
            self.image(avatar, None, assets);
        }
        self.line(&format!("{bold}{}{reset}", profile.name));
        if !profile.headline.is_empty() {
            self.line(&profile.headline);
        }
        for contact in &profile.contacts {
            self.line(&format!("  {contact}"));
        }
        if !profile.intro.is_empty() {
            self.line("");
            self.line(&profile.intro);
        }
        self.line("");
    }

    fn print_section(&mut self, section: &Section, assets: &dyn AssetResolver) {
        let bold = self.style(ANSI_BOLD);
        let reset = self.reset();
        self.line(&format!("{bold}== {} =={reset}", section.title));
        for block in &section.blocks {
            self.line("");
            if let Some(heading) = &block.heading {
                self.line(&format!("{bold}{heading}{reset}"));
            }
            if let Some(image) = &block.image {
                self.image(image, block.caption.as_deref(), assets);
            }
            if !block.body.is_empty() {
                self.line(&block.body);
            }
        }
        self.line("");
    }
}
