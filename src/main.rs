use anyhow::Result;
use clap::Parser;
use setup_py::{
    actions::WorkflowCommands,
    cache::EnvCacheProbe,
    commands,
    config::{API_URL_ENV, Config, SERVER_URL_ENV},
    github::GRAALPY_REPO,
    runtime::RealRuntime,
};
use std::path::PathBuf;

/// setup-py - version resolution helpers for setting up Python in CI
///
/// Reads version files, validates version inputs, lists releases and checks
/// whether the Actions cache service can be used.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for
/// authentication against the GitHub API.
///
/// Examples:
///   setup-py version-file .python-version
///   setup-py releases --version 24.x
#[derive(Parser, Debug)]
#[command(author, version = env!("SETUP_PY_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub server URL (defaults to https://github.com)
    #[arg(long = "server-url", env = SERVER_URL_ENV, value_name = "URL", global = true)]
    pub server_url: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", env = API_URL_ENV, value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the version specifiers found in a version file
    VersionFile(VersionFileArgs),

    /// Check that a version input is well formed
    Validate(ValidateArgs),

    /// Print whether the Actions cache can be used on this runner
    CacheStatus,

    /// List releases of a repository, or resolve a version against them
    Releases(ReleasesArgs),
}

#[derive(clap::Args, Debug)]
pub struct VersionFileArgs {
    /// Path to .python-version, pyproject.toml, Pipfile or .tool-versions
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print the specifiers as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// The version to check
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Check the Python part of a PyPy spec, which must be 'major.minor'
    #[arg(long)]
    pub pypy: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReleasesArgs {
    /// The GitHub repository in the format "owner/repo"
    #[arg(value_name = "OWNER/REPO", default_value = GRAALPY_REPO)]
    pub repo: String,

    /// Resolve this version spec (e.g. "24.x", "24.1.0", "latest")
    #[arg(long, value_name = "SPEC")]
    pub version: Option<String>,

    /// Include pre-releases
    #[arg(long)]
    pub prerelease: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;
    let config = Config::from_runtime(&runtime).with_overrides(cli.server_url, cli.api_url);
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::VersionFile(args) => {
            commands::version_file(&runtime, &args.path, args.json, &mut stdout)?
        }
        Commands::Validate(args) => commands::validate(&args.version, args.pypy, &mut stdout)?,
        Commands::CacheStatus => {
            let probe = EnvCacheProbe::new(RealRuntime);
            commands::cache_status(&probe, &config, &WorkflowCommands, &mut stdout)?
        }
        Commands::Releases(args) => {
            let github = config.github()?;
            commands::releases(
                &github,
                &args.repo,
                args.version.as_deref(),
                args.prerelease,
                &mut stdout,
            )
            .await?
        }
    }
    Ok(())
}
