use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use ghops::commands::*;
use ghops::{GitHubClient, config::Config, constants};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghops")]
#[command(about = "Work with GitHub users, references, pull requests and reviews")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Users and profiles
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Git references addressed by tag or branch
    Ref {
        #[command(flatten)]
        repository: RepositoryArgs,

        #[command(subcommand)]
        action: ReferenceAction,
    },

    /// Branches
    Branch {
        #[command(flatten)]
        repository: RepositoryArgs,

        #[command(subcommand)]
        action: BranchAction,
    },

    /// Pull requests
    Pr {
        #[command(flatten)]
        repository: RepositoryArgs,

        #[command(subcommand)]
        action: PullRequestAction,
    },

    /// Pull request reviews
    Review {
        #[command(flatten)]
        repository: RepositoryArgs,

        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Pull request review requests
    ReviewRequest {
        #[command(flatten)]
        repository: RepositoryArgs,

        #[command(subcommand)]
        action: ReviewRequestAction,
    },

    /// Service meta information
    Meta {
        #[command(subcommand)]
        action: MetaAction,
    },
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "debug"
    } else {
        "warn,ghops=info,ghops_rest=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("Error: {e:#}").red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    let context = CommandContext {
        client: GitHubClient::new(config)?,
    };

    match cli.command {
        Commands::User { action } => UserCommand { action }.execute(&context).await,
        Commands::Ref { repository, action } => {
            ReferenceCommand { repository, action }
                .execute(&context)
                .await
        }
        Commands::Branch { repository, action } => {
            BranchCommand { repository, action }
                .execute(&context)
                .await
        }
        Commands::Pr { repository, action } => {
            PullRequestCommand { repository, action }
                .execute(&context)
                .await
        }
        Commands::Review { repository, action } => {
            ReviewCommand { repository, action }
                .execute(&context)
                .await
        }
        Commands::ReviewRequest { repository, action } => {
            ReviewRequestCommand { repository, action }
                .execute(&context)
                .await
        }
        Commands::Meta { action } => MetaCommand { action }.execute(&context).await,
    }
}
