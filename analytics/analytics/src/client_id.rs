use analytics_client::ClientId;
use std::process::ExitCode;

#[derive(clap::Args, Debug)]
#[command(about = "Print a client id, random or derived from a name")]
pub struct ClientIdCommand {
    /// Derive the id from this name instead of generating a random one.
    #[arg(long)]
    pub name: Option<String>,

    /// Derive the id with the bit masks of earlier releases, to look up stored ids.
    #[arg(long, requires = "name")]
    pub legacy: bool,
}

impl ClientIdCommand {
    pub fn client_id(&self) -> ClientId {
        match (&self.name, self.legacy) {
            (Some(name), false) => ClientId::from_name(name),
            (Some(name), true) => ClientId::from_legacy_name(name),
            (None, _) => ClientId::new_random(),
        }
    }

    pub fn run(self) -> anyhow::Result<ExitCode> {
        println!("{}", self.client_id());
        Ok(ExitCode::SUCCESS)
    }
}
