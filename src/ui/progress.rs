//! Timed step spinner for the generator phases

use super::context::UiContext;
use console::style;
use std::time::{Duration, Instant};

/// One long-running phase (reading the schema, writing the package).
///
/// Interactive terminals get a cliclack spinner; elsewhere the phase is
/// logged as a start line and an end line carrying the elapsed time.
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
    started: Option<Instant>,
}

impl TaskSpinner {
    /// Nothing is shown until [`start`](Self::start)
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
            started: None,
        }
    }

    /// Begin a phase; a phase still running is replaced
    pub fn start(&mut self, phase: &str) {
        self.started = Some(Instant::now());
        if self.interactive {
            if let Some(spinner) = &self.spinner {
                spinner.start(phase);
            } else {
                let spinner = cliclack::spinner();
                spinner.start(phase);
                self.spinner = Some(spinner);
            }
        } else {
            println!("  {}  {}", style("....").dim(), phase);
        }
    }

    /// End the phase successfully
    pub fn stop(&mut self, summary: &str) {
        let line = self.with_elapsed(summary);
        match self.spinner.take() {
            Some(spinner) => spinner.stop(line),
            None => println!("  {}  {}", style("done").green(), line),
        }
    }

    /// End the phase with a failure; the error itself is printed by `main`
    pub fn stop_error(&mut self, summary: &str) {
        let line = self.with_elapsed(summary);
        match self.spinner.take() {
            Some(spinner) => spinner.error(line),
            None => println!("  {}  {}", style("fail").red(), line),
        }
    }

    fn with_elapsed(&mut self, summary: &str) -> String {
        match self.started.take() {
            Some(started) => format!("{} {}", summary, style(format_elapsed(started.elapsed())).dim()),
            None => summary.to_string(),
        }
    }
}

/// `850µs`, `12ms`, `1.4s`
fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_millis(1) {
        format!("({}µs)", elapsed.as_micros())
    } else if elapsed < Duration::from_secs(1) {
        format!("({}ms)", elapsed.as_millis())
    } else {
        format!("({:.1}s)", elapsed.as_secs_f64())
    }
}
