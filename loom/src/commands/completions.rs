use std::io::{self, Write};

use clap::{Args, CommandFactory};
use eyre::Result;

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        self.write(&mut io::stdout())
    }

    fn write(&self, out: &mut impl Write) -> Result<()> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "loom", out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_lists_subcommands() {
        let cmd = CompletionsCommand {
            shell: clap_complete::Shell::Bash,
        };
        let mut out = Vec::new();
        cmd.write(&mut out).unwrap();

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("_loom()"));
        assert!(script.contains("generate"));
        assert!(script.contains("check"));
    }
}
