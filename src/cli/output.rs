//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::{style, StyledObject};

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D: Display>(value: D, f: impl FnOnce(StyledObject<D>) -> StyledObject<D>) -> String {
    if colors_enabled() {
        f(style(value)).to_string()
    } else {
        value.to_string()
    }
}

/// `✓ logged in`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// `✗ configuration file not found` (stderr)
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// `⚠ wrong passphrase` (stderr, so piped stdout stays clean)
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// `→ run: credbroker init` (stderr)
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Label dimmed, value bold.
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(format!("{:<9}", label), |s| s.dim()),
        paint(value.to_string(), |s| s.bold())
    );
}

/// Secondary information.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dim()));
}

/// Bold title followed by a rule.
pub fn section(title: &str) {
    println!();
    println!("{}", paint(title, |s| s.bold()));
    println!("{}", paint("─".repeat(RULE_WIDTH), |s| s.dim()));
}

/// A path, colored for inline use.
pub fn path(p: impl Display) -> String {
    paint(p.to_string(), |s| s.cyan())
}
