//! Settings file management.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use sortscope_config::{Settings, settings_path};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings as TOML
    Show {
        /// Settings file to read instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a settings file filled with defaults
    Init {
        /// Where to write; defaults to the user settings path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the default settings file location
    Path,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show { config } => {
            let settings = match config {
                Some(path) => {
                    let settings = Settings::load(&path)?;
                    settings.validate()?;
                    settings
                }
                None => Settings::load_or_default()?,
            };
            print!("{}", settings.to_toml()?);
        }
        ConfigAction::Init { config, force } => {
            let path = config.unwrap_or_else(settings_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Settings::default().save(&path)?;
            println!("Wrote default settings to {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", settings_path().display());
        }
    }
    Ok(())
}
