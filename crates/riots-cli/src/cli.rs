use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<std::path::PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Credentials and destinations shared by every command that touches the bucket.
#[derive(ClapArgs, Clone)]
pub struct Destination {
    /// AWS access key id
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub aws_access_key_id: String,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub aws_secret_access_key: String,

    /// Destination bucket
    #[arg(long, env = "RIOTS_BUCKET")]
    pub aws_bucket: String,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the index and/or upload missing releases, then invalidate the CDN
    Sync {
        #[command(flatten)]
        destination: Destination,

        /// CloudFront distribution serving the bucket
        #[arg(long, env = "RIOTS_CF_DISTRIBUTION_ID")]
        cf_distribution_id: String,

        /// Render and upload the index page
        #[arg(long)]
        index: bool,

        /// Upload releases missing from the bucket
        #[arg(long)]
        upload: bool,
    },

    /// Run both phases with settings from the environment and print the event response
    Event {
        #[command(flatten)]
        destination: Destination,

        /// CloudFront distribution serving the bucket
        #[arg(long, env = "RIOTS_CF_DISTRIBUTION_ID")]
        cf_distribution_id: String,
    },

    /// List upstream releases and whether each one is published
    #[clap(name = "list", visible_alias = "ls")]
    List {
        #[command(flatten)]
        destination: Destination,
    },

    /// Write the default configuration file
    #[clap(name = "defconfig")]
    DefConfig,
}
