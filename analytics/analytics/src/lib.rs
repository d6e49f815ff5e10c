use std::process::ExitCode;

mod client_id;
mod hit;

pub use client_id::ClientIdCommand;
pub use hit::{HitArgs, IdentityArgs, Track, Validate};

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    Track(Track),
    Validate(Validate),
    ClientId(ClientIdCommand),
}

impl Command {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Self::Track(run) => run.run().await,
            Self::Validate(run) => run.run().await,
            Self::ClientId(run) => run.run(),
        }
    }
}
