//! Completions command - print a shell completion script

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::UidlResult;
use clap::CommandFactory;
use std::io::Write;

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> UidlResult<()> {
    let mut stdout = std::io::stdout();
    write_completions(args, &mut stdout);
    stdout
        .flush()
        .map_err(|e| crate::error::UidlError::io("writing completions", e))
}

fn write_completions(args: CompletionsArgs, out: &mut dyn Write) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, out);
}
