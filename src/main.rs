use clap::{Parser, Subcommand};
use ssh_resource::app::{App, ResourceCommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Pipeline resource that runs a script on a remote host over SSH.
#[derive(Parser, Debug)]
#[command(name = "ssh-resource", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report versions (always none).
    Check,
    /// Fetch a version (echoes it back).
    In {
        /// Directory the resource would be fetched into.
        destination: Option<PathBuf>,
    },
    /// Run `params.script` on `source.host`.
    Out {
        /// Build's source directory.
        sources: Option<PathBuf>,
    },
}

impl From<Command> for ResourceCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Check => ResourceCommand::Check,
            Command::In { destination } => ResourceCommand::In { destination },
            Command::Out { sources } => ResourceCommand::Out { sources },
        }
    }
}

/// `/opt/resource/{check,in,out}` symlinks pick the subcommand by name.
fn resolve_args(args: Vec<OsString>) -> Vec<OsString> {
    let invoked_as = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string);
    match invoked_as.as_deref() {
        Some(name @ ("check" | "in" | "out")) => {
            let mut resolved = vec![OsString::from("ssh-resource"), OsString::from(name)];
            resolved.extend(args.into_iter().skip(1));
            resolved
        }
        _ => args,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_from(resolve_args(std::env::args_os().collect()));
    let app = App::initialize();
    if let Err(err) = app.run(cli.command.into()).await {
        eprintln!("ssh-resource: {}", err.describe());
        std::process::exit(1);
    }
}
