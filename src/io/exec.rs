//! Running an assembled command as an external program.
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::core::command::CommandLine;
use crate::error::{Error, Result};
use crate::io::paths::file_only;

/// What happened when a command was handed to [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The command carried the dry-run marker and was not run.
    DryRun { command: String },
    /// The program ran and exited successfully.
    Completed { stdout_file: Option<String> },
}

/// Run `command` synchronously.
///
/// Commands carrying the dry-run marker are only reported. When
/// `stdout_file` names a file (its last component has an extension) the
/// program's standard output is written there. A non-zero exit status is an
/// error.
pub fn execute(command: &CommandLine, stdout_file: Option<&Path>) -> Result<ExecOutcome> {
    let rendered = command.to_string();
    if command.is_dryrun() {
        info!("DRYRUN - nothing submitted: {}", rendered);
        return Ok(ExecOutcome::DryRun { command: rendered });
    }

    let tokens = command.tokens();
    let Some((program, args)) = tokens.split_first() else {
        return Err(Error::InvalidArgument {
            arg: "command",
            value: rendered,
        });
    };

    let redirect = stdout_file.filter(|p| file_only(&p.to_string_lossy()).contains('.'));

    info!("Running: {}", rendered);
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(path) = redirect {
        cmd.stdout(Stdio::from(File::create(path)?));
    }
    let status = cmd.status()?;

    if !status.success() {
        return Err(Error::ProgramFailed {
            command: rendered,
            code: status.code(),
        });
    }
    Ok(ExecOutcome::Completed {
        stdout_file: redirect.map(|p| p.to_string_lossy().into_owned()),
    })
}
