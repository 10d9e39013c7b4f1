//! Terminal rendering for the jwt-gate CLI.
//!
//! Everything goes to stdout except errors. With `--no-color` the same
//! lines are printed with plain `[OK]`/`[WARN]`/`[ERROR]` tags.

use crate::auth::claims::{CLAIM_EXP, CLAIM_IAT, Claims, RESERVED_CLAIMS};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Ok,
    Warn,
    Error,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Ok => "[OK]",
            Tone::Warn => "[WARN]",
            Tone::Error => "[ERROR]",
        }
    }
}

/// Output style configuration
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// RFC 3339 rendering of unix seconds, or the raw number if out of range.
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn status(&self, tone: Tone, message: &str) -> String {
        if !self.colored {
            return format!("  {} {}", tone.tag(), message);
        }
        match tone {
            Tone::Ok => format!("  {} {}", "✓".green().bold(), message.green()),
            Tone::Warn => format!("  {} {}", "⚠".yellow().bold(), message.yellow()),
            Tone::Error => format!("  {} {}", "✗".red().bold(), message.red()),
        }
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.status(Tone::Ok, message));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.status(Tone::Warn, message));
    }

    /// Errors go to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.status(Tone::Error, message));
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Whether a secret is available, without ever printing it.
    pub fn secret(&self, key: &str, present: bool) {
        let value = if present { "<set>" } else { "<missing>" };
        match (self.colored, present) {
            (false, _) => println!("    {}: {}", key, value),
            (true, true) => println!("    {}: {}", key.dimmed(), value.green()),
            (true, false) => println!("    {}: {}", key.dimmed(), value.red()),
        }
    }

    /// One line per claim, reserved claims first. `iat` and `exp` also
    /// show their calendar time.
    pub fn claims(&self, claims: &Claims) {
        let reserved = RESERVED_CLAIMS
            .iter()
            .filter_map(|name| claims.get(name).map(|value| (*name, value)));
        let custom = claims
            .iter()
            .filter(|(name, _)| !RESERVED_CLAIMS.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value));

        for (name, value) in reserved.chain(custom) {
            self.kv(name, &render_claim(name, value));
        }
    }

    pub fn newline(&self) {
        println!();
    }
}

fn render_claim(name: &str, value: &Value) -> String {
    match (name, value.as_i64()) {
        (CLAIM_IAT | CLAIM_EXP, Some(secs)) => format!("{} ({})", secs, format_timestamp(secs)),
        _ => value.to_string(),
    }
}
