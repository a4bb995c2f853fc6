//! mmake - make with remote includes
//!
//! Usage:
//!   mmake url github.com/tj/mmake/help.mk     # Show the raw content URL
//!   mmake get github.com/tj/mmake/help.mk     # Print an include
//!   mmake install                             # Install remote includes
//!   mmake update                              # Re-fetch remote includes
//!   mmake run [MAKE ARGS...]                  # Install, then run make

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mmake_core::config::{ConfigStore, MmakeConfig};
use mmake_core::include::{IncludeInstaller, InstallStatus, Installed};
use mmake_core::resolver::{GithubResolver, Resolver, ResolverChain};

#[derive(Parser)]
#[command(name = "mmake")]
#[command(about = "Make with remote includes", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/mmake/mmake.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw content URL for a GitHub include reference
    Url {
        /// Reference such as github.com/user/repo/file.mk@v1
        reference: String,
    },

    /// Resolve an include and print its content
    Get {
        reference: String,
        /// Fetch directly, without reading or writing the fetch cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Install the remote includes of a Makefile
    Install(InstallArgs),

    /// Re-fetch the remote includes of a Makefile
    Update {
        #[arg(short, long, default_value = "Makefile")]
        file: PathBuf,
    },

    /// Install remote includes, then run make with the include directory
    Run {
        #[arg(short, long, default_value = "Makefile")]
        file: PathBuf,

        /// Arguments passed through to make
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the config file location and effective settings
    Config,
}

#[derive(Args)]
struct InstallArgs {
    /// Makefile to scan for includes
    #[arg(short, long, default_value = "Makefile")]
    file: PathBuf,

    /// Re-fetch includes that are already installed
    #[arg(short, long)]
    update: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mmake=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::global()?,
    };

    run_cli(cli.command, &store)
}

fn run_cli(command: Commands, store: &ConfigStore) -> Result<ExitCode> {
    match command {
        Commands::Url { reference } => {
            let config = store.load()?;
            run_url(&config, &reference)?;
        }
        Commands::Get {
            reference,
            no_cache,
        } => {
            let config = store.load()?;
            run_get(&config, &reference, no_cache)?;
        }
        Commands::Install(args) => {
            let config = store.load()?;
            run_install(&config, &args.file, args.update)?;
        }
        Commands::Update { file } => {
            let config = store.load()?;
            run_install(&config, &file, true)?;
        }
        Commands::Run { file, args } => {
            let config = store.load()?;
            return run_make(&config, &file, &args);
        }
        Commands::Config => {
            run_config(store)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_url(config: &MmakeConfig, reference: &str) -> Result<()> {
    println!("{}", raw_url(config, reference)?);
    Ok(())
}

/// Rewrite a GitHub reference without fetching; the empty chain is never
/// consulted.
fn raw_url(config: &MmakeConfig, reference: &str) -> Result<String> {
    let mut github = GithubResolver::new(ResolverChain::new());
    if let Some(version) = &config.github.default_version {
        github = github.with_default_version(version);
    }

    github
        .raw_url(reference)
        .with_context(|| format!("Cannot rewrite {}", reference))
}

fn run_get(config: &MmakeConfig, reference: &str, no_cache: bool) -> Result<()> {
    let resolver = if no_cache {
        config.uncached_resolver()?
    } else {
        config.resolver(false)?
    };
    let mut content = resolver
        .get(reference)
        .with_context(|| format!("Failed to resolve {}", reference))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    io::copy(&mut content, &mut out).context("Failed to write include to stdout")?;
    out.flush()?;
    Ok(())
}

fn install(config: &MmakeConfig, file: &Path, update: bool) -> Result<Vec<Installed>> {
    let resolver = config.resolver(update)?;
    IncludeInstaller::new(resolver, &config.include_dir)
        .update(update)
        .install_file(file)
}

fn run_install(config: &MmakeConfig, file: &Path, update: bool) -> Result<()> {
    let results = install(config, file, update)?;

    let remote: Vec<_> = results
        .iter()
        .filter(|r| r.status != InstallStatus::Skipped)
        .collect();
    if remote.is_empty() {
        println!("No remote includes in {}", file.display());
        return Ok(());
    }

    for result in remote {
        let label = match result.status {
            InstallStatus::Installed => "installed",
            InstallStatus::AlreadyPresent => "present",
            InstallStatus::Missing => "missing",
            InstallStatus::Skipped => continue,
        };
        println!("{:>9}  {}", label, result.reference);
    }
    Ok(())
}

fn run_make(config: &MmakeConfig, file: &Path, args: &[String]) -> Result<ExitCode> {
    // make reports a missing Makefile itself.
    if file.exists() {
        install(config, file, false)?;
    }

    let mut command = Command::new("make");
    command.arg("-I").arg(&config.include_dir);
    if file != Path::new("Makefile") {
        command.arg("-f").arg(file);
    }
    command.args(args);

    tracing::debug!(?command, "running make");
    let status = command.status().context("Failed to run make")?;

    Ok(match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    })
}

fn run_config(store: &ConfigStore) -> Result<()> {
    let config = store.load()?;
    println!("# {}", store.config_path().display());
    print!("{}", mmake_core::config::parser::to_toml(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_url_uses_configured_default_version() {
        let mut config = MmakeConfig::default();
        assert_eq!(
            raw_url(&config, "github.com/tj/mmake/help.mk").unwrap(),
            "https://raw.githubusercontent.com/tj/mmake/master/help.mk"
        );

        config.github.default_version = Some("main".to_string());
        assert_eq!(
            raw_url(&config, "github.com/tj/mmake/help.mk").unwrap(),
            "https://raw.githubusercontent.com/tj/mmake/main/help.mk"
        );
    }

    #[test]
    fn raw_url_reports_unsupported_reference() {
        let err = raw_url(&MmakeConfig::default(), "gitlab.com/a/b").unwrap_err();
        assert!(format!("{:#}", err).contains("Cannot rewrite gitlab.com/a/b"));
    }
}
