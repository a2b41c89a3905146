//! Step output for the generate, check and config commands
//!
//! In an interactive terminal these render through cliclack. Otherwise each
//! call prints one line with a fixed-width status column, which keeps CI logs
//! aligned:
//!
//! ```text
//! uidl generate
//!   ....  Reading schema from schema...
//!   done  Parsed 3 schema file(s) (4ms)
//!   info  Schema unchanged, nothing to generate
//! ```

use super::context::UiContext;
use console::{style, StyledObject};

/// Width of the key column in [`key_value`]
const KEY_WIDTH: usize = 8;

fn status_line(status: StyledObject<&str>, message: &str) {
    println!("  {}  {}", status, message);
}

/// Title of the command run
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).magenta().bold()).ok();
    } else {
        println!("{}", style(title).magenta().bold());
    }
}

/// Closing line of a successful run
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green().bold()).ok();
    } else {
        status_line(style("done").green(), message);
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        status_line(style("ok  ").green(), message);
    }
}

/// Success with a dimmed detail such as the file that was written
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(format!("{} ({})", message, style(detail).dim())).ok();
    } else {
        status_line(style("ok  ").green(), &format!("{} ({})", message, detail));
    }
}

/// Warning plus what to do about it
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(format!("{} - {}", message, style(hint).dim())).ok();
    } else {
        status_line(style("warn").yellow(), &format!("{} - {}", message, hint));
    }
}

pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        status_line(style("info").cyan(), message);
    }
}

/// Secondary note under the previous step
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("        {}", style(message).dim());
    }
}

/// Report field, e.g. the generated package and its directory
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = format!("{:<width$}", key, width = KEY_WIDTH);
    if ctx.use_fancy_output() {
        println!("  {} {}", style(key).dim(), value);
    } else {
        println!("  {} {}", key, value);
    }
}
