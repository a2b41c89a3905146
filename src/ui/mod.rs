//! Terminal output
//!
//! Uses `cliclack` for styled output in interactive terminals, with
//! automatic fallback to plain lines in CI and when piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use uidl::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "uidl generate");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Reading schema...");
//! spinner.stop("Parsed 12 schema files");
//!
//! ui::key_value(&ctx, "Package", "org.example.dto");
//! ui::outro_success(&ctx, "Done");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, remark, step_info, step_ok, step_ok_detail, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use theme::{init_theme, UidlTheme};
