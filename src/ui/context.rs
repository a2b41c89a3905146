//! Whether output goes to a person or to a log

use std::io::IsTerminal;

/// Environment variables set by common CI runners
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// Chooses between cliclack rendering and plain status lines.
///
/// `uidl generate` is often run from build scripts and CI jobs where the
/// output is captured, so fancy output needs both streams on a terminal.
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
}

impl UiContext {
    pub fn detect() -> Self {
        let terminals = std::io::stdout().is_terminal() && std::io::stderr().is_terminal();
        Self {
            interactive: terminals && !Self::plain_requested(|var| std::env::var_os(var)),
        }
    }

    /// Plain output regardless of the environment
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Spinners and cliclack log blocks
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }

    /// CI runners and `TERM=dumb` get plain lines
    fn plain_requested<F>(lookup: F) -> bool
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        lookup("TERM").is_some_and(|term| term == "dumb")
            || CI_VARS.iter().any(|var| lookup(var).is_some())
    }
}
