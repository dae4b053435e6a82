use {
    clap::{Args, Parser, Subcommand},
    hive_activity::{
        config::{
            HistoryConfig, HiveConfig, PrivateKey, DEFAULT_ACCOUNT, DEFAULT_NOTIFICATION_ACCOUNT,
            DEFAULT_SYMBOL,
        },
        error::{ActivityError, ActivityResult},
        hive::{
            normalize_account, plan_undelegation, HiveApi, HiveRpcClient, MAX_NOTIFICATIONS,
        },
        history::{normalize_all, HistoryFetcher, HiveEngineHistoryClient},
        notification::classify_all,
        output::{format_summaries, history_file_name, write_csv, OutputFormat},
    },
    std::{env, path::PathBuf, process::ExitCode},
};

/// Hive account activity tools.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch Hive Engine account history and save it to CSV
    History(HistoryArgs),
    /// Show notifications for an account
    Notifications(NotificationArgs),
    /// List outgoing vesting delegations and the operations that would drop them to 0
    Delegations(DelegationArgs),
}

#[derive(Args)]
struct HistoryArgs {
    /// The account to fetch history for
    #[arg(long, default_value = DEFAULT_ACCOUNT)]
    account: String,

    /// The token symbol
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Output file (default: history_<account>_<symbol>.csv)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct NotificationArgs {
    /// Account to show (default: $HIVE_ACCOUNT, then thecrazygm)
    #[arg(long)]
    account: Option<String>,

    /// Include already-read notifications
    #[arg(long)]
    all: bool,

    /// Maximum number of notifications (at most 100)
    #[arg(long, default_value_t = MAX_NOTIFICATIONS)]
    limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
struct DelegationArgs {
    /// Delegating account (default: $HIVE_ACCOUNT)
    #[arg(long)]
    account: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::History(args) => run_history(args).await,
        Commands::Notifications(args) => run_notifications(args).await,
        Commands::Delegations(args) => run_delegations(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_history(args: HistoryArgs) -> ActivityResult<()> {
    let config = HistoryConfig::from_env();
    log::debug!("History config: {config:?}");

    let client = HiveEngineHistoryClient::new(&config)?;
    let fetcher = HistoryFetcher::new(client, config.page_limit);

    let records = normalize_all(fetcher.fetch_all(&args.account, &args.symbol).await);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(history_file_name(&args.account, &args.symbol)));
    write_csv(&records, &output)?;
    Ok(())
}

async fn run_notifications(args: NotificationArgs) -> ActivityResult<()> {
    let key = PrivateKey::from_env("POSTING_WIF")?;
    let account = args
        .account
        .or_else(|| env::var("HIVE_ACCOUNT").ok().filter(|a| !a.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_NOTIFICATION_ACCOUNT.to_string());
    let account = normalize_account(&account).to_string();
    let format = args.format;

    if key.is_some() {
        log::info!("POSTING_WIF set: authenticated mode for @{account}");
    } else {
        log::info!("No POSTING_WIF: public mode for @{account}");
    }

    let api = HiveApi::new(HiveRpcClient::new(&HiveConfig::from_env())?);
    api.ensure_account_exists(&account).await?;

    let notifications = api
        .get_notifications(&account, !args.all, args.limit)
        .await?;

    if notifications.is_empty() {
        println!("No notifications found for @{account}.");
        return Ok(());
    }

    let rows = classify_all(&notifications);
    if format == OutputFormat::Table {
        println!(
            "Notifications for @{account} (up to {}):\n",
            args.limit.min(MAX_NOTIFICATIONS)
        );
    }
    println!("{}", format_summaries(&rows, format)?);
    Ok(())
}

async fn run_delegations(args: DelegationArgs) -> ActivityResult<()> {
    // a malformed key is still reported even though nothing gets signed
    let _active_key = PrivateKey::from_env("ACTIVE_WIF")?;

    let Some(account) = args
        .account
        .or_else(|| env::var("HIVE_ACCOUNT").ok().filter(|a| !a.trim().is_empty()))
    else {
        return Err(ActivityError::MissingAccount);
    };
    let account = normalize_account(&account).to_string();

    let api = HiveApi::new(HiveRpcClient::new(&HiveConfig::from_env())?);
    api.ensure_account_exists(&account).await?;

    let delegations = api.get_vesting_delegations(&account).await?;
    if delegations.is_empty() {
        println!("No outgoing delegations for @{account}.");
        return Ok(());
    }

    for op in plan_undelegation(&delegations) {
        println!("[Dropping delegation to {} to 0]", op.delegatee);
        println!("{}", serde_json::to_string_pretty(&op)?);
    }
    log::warn!("Operations are unsigned and were not broadcast");
    Ok(())
}
