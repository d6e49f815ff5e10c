use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{ExitCode, Termination};

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Send events to Universal Analytics",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: analytics::Command,
}

impl Cli {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                eprintln!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        eprintln!("Caused by:");
                    }
                    eprintln!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<ExitCode> {
        self.command.run().await
    }
}

#[tokio::main]
async fn main() -> impl Termination {
    load_xdg_config();
    init_logging();
    Cli::parse().run().await
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    if let Err(e) = env_logger::Builder::from_env(env).format_timestamp_millis().try_init() {
        eprintln!("Error initializing logging: {:?}", e);
    }
}

fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        Some(Path::new(&xdg_config_home).join("uatrack"))
    } else if let Ok(home) = std::env::var("HOME") {
        Some(Path::new(&home).join(".config").join("uatrack"))
    } else {
        None
    }
}

/// Every file in the configuration directory sets the environment variable of the same name,
/// for example `UNIVERSAL_ANALYTICS_TRACKING_ID`.
fn load_xdg_config() {
    let Some(config_dir) = config_dir() else {
        return;
    };

    if !config_dir.is_dir() {
        return;
    }

    match config_dir.read_dir() {
        Ok(dir) => {
            for entry in dir.flatten() {
                let Some(var_name) = entry.file_name().to_str().map(ToString::to_string) else {
                    continue;
                };
                if std::env::var_os(&var_name).is_some() {
                    continue;
                }
                if let Ok(mut file) = File::open(entry.path()) {
                    let mut var_value = String::new();
                    if file.read_to_string(&mut var_value).is_ok() {
                        std::env::set_var(var_name, var_value.trim());
                    }
                }
            }
        }
        Err(err) => eprintln!("Warning: unable to read configuration directory {config_dir:?}: {err}"),
    }
}
