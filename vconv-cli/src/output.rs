//! Console output helpers.
//!
//! Human-readable messages go to stdout. When JSON events own stdout, the
//! same messages go to stderr instead.

use console::style;
use std::fmt::Display;
use vconv_core::{Codec, Notice, ProresProfile};

/// Where human-readable output is written.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    to_stderr: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { to_stderr: json }
    }

    fn line(&self, text: impl Display) {
        if self.to_stderr {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    /// Print a heading with styling and clear separation
    pub fn heading(&self, text: &str) {
        self.line(style(format!("----- {} -----", text.to_uppercase())).cyan().bold());
    }

    /// Print an info line with label and value
    pub fn info<T: Display>(&self, label: &str, value: T) {
        self.line(format!("{}: {}", style(label).cyan(), value));
    }

    pub fn notice(&self, notice: &Notice) {
        match notice {
            Notice::Blocking { message } => {
                // Blocking problems always reach stderr
                eprintln!("{} {}", style("✗ Error:").red().bold(), message);
            }
            Notice::FileFailed { filename, message } => {
                self.line(format!(
                    "{} {}",
                    style("✗").red().bold(),
                    style(format!("{filename} failed")).red()
                ));
                for detail in message.lines().skip(1) {
                    self.line(format!("    {}", style(detail).dim()));
                }
            }
            Notice::Summary {
                message, log_path, ..
            } => {
                if log_path.is_some() {
                    self.line(format!("{} {}", style("⚠").yellow().bold(), style(message).yellow()));
                } else {
                    self.line(format!("{} {}", style("✓").green().bold(), message));
                }
            }
        }
    }
}

/// Rows of the `codecs` listing.
pub fn codec_rows() -> Vec<String> {
    Codec::ALL
        .into_iter()
        .map(|codec| {
            if codec.supports_profile() {
                format!("{:<12} (accepts --profile)", codec.as_str())
            } else {
                codec.as_str().to_string()
            }
        })
        .collect()
}

pub fn profile_rows() -> Vec<String> {
    ProresProfile::ALL
        .into_iter()
        .map(|profile| format!("{}  {}", profile.as_arg(), profile.label()))
        .collect()
}
