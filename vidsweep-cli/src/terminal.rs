// ============================================================================
// vidsweep-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Section headers, key-value status lines, and result messages, all printed
// through `log::info!` so that they share the logger's destination. Colors
// are dropped when NO_COLOR is set.
//
// KEY COMPONENTS:
// - print_section / print_status / print_success / print_warning / print_error
// - ScanSpinner: live count of checked files while a run is in progress

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Width labels are padded to in status lines.
const LABEL_WIDTH: usize = 15;

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header for a major phase of the run
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let padding = LABEL_WIDTH.saturating_sub(label.chars().count()).max(1);
    if should_use_color() && highlight {
        info!("  {label}:{} {}", " ".repeat(padding), style(value).bold());
    } else {
        info!("  {label}:{} {value}", " ".repeat(padding));
    }
}

/// Print a plain indented line
pub fn print_item(text: &str) {
    info!("  {text}");
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if should_use_color() {
        info!("  ⚠ {}", message.yellow());
    } else {
        info!("  ⚠ {message}");
    }
}

/// Print a fatal error to stderr, with an optional hint.
///
/// Goes straight to stderr so it is visible even when logging is filtered.
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    if should_use_color() {
        eprintln!("✗ {}", title.red().bold());
    } else {
        eprintln!("✗ {title}");
    }
    eprintln!("  Message:    {message}");
    if let Some(suggestion_text) = suggestion {
        eprintln!("  Suggestion: {suggestion_text}");
    }
}

/// Spinner counting files as the engine reports them.
///
/// Hidden when stderr is not a terminal, so piped output stays clean.
pub struct ScanSpinner {
    bar: ProgressBar,
    checked: u64,
}

impl ScanSpinner {
    pub fn new() -> Self {
        let target = if Term::stderr().is_term() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(None, target);
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
            bar.set_style(spinner_style);
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar, checked: 0 }
    }

    /// Counts one more file and shows its name.
    pub fn tick(&mut self, current: &str) {
        self.checked += 1;
        self.bar.set_message(format!(
            "{} file{} checked, last: {current}",
            self.checked,
            vidsweep_core::utils::plural_suffix(self.checked)
        ));
    }

    /// Runs `f` with the spinner cleared so printed lines are not overdrawn.
    pub fn suspend<F: FnOnce()>(&self, f: F) {
        self.bar.suspend(f);
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ScanSpinner {
    fn default() -> Self {
        Self::new()
    }
}
