use anyhow::Result;
use clap::{Parser, Subcommand};
use core_logic::{setup_logger, Account, MetricsCollector, ProxyManager, TokenManager, WorkerRunner};
use depined_client::api;
use depined_client::config::DepinedConfig;
use depined_client::worker::AccountWorker;
use dotenv::dotenv;
use std::path::Path;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    #[arg(short, long)]
    export_metrics: Option<String>,
    #[arg(long, default_value = "30")]
    metrics_interval: u64,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll every account on the fixed interval (the default)
    Run,
    /// Create an account and append its token to the tokens file
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        referral_code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let config = match DepinedConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Ok(());
        }
    };

    match args.command {
        None | Some(Command::Run) => {
            run(config, args.export_metrics, args.metrics_interval).await
        }
        Some(Command::Register {
            email,
            password,
            username,
            referral_code,
        }) => register(config, email, password, username, referral_code).await,
    }
}

async fn run(
    config: DepinedConfig,
    export_metrics: Option<String>,
    metrics_interval: u64,
) -> Result<()> {
    let tokens = TokenManager::load(&config.tokens_file);
    if tokens.is_empty() {
        error!("No tokens found in {}", config.tokens_file);
        anyhow::bail!("no tokens loaded");
    }

    let proxies = ProxyManager::load(&config.proxy_file);
    if proxies.is_empty() {
        warn!("Running without proxy...");
    }

    info!("Starting program for all accounts: {}", tokens.len());

    let poll_config = config.to_poll_config();
    let mut workers = Vec::new();
    for account in Account::pair(tokens, &proxies) {
        if let Some(ref proxy) = account.proxy {
            info!("Assigned proxy {} to account {}", proxy, account.id());
        }
        let worker = AccountWorker::new(&poll_config, account)?;
        workers.push(Box::new(worker) as Box<dyn core_logic::traits::Worker>);
    }

    let metrics_task = export_metrics.map(|path| {
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(metrics_interval));
            loop {
                ticker.tick().await;
                let metrics = MetricsCollector::global();
                if let Err(e) = metrics.export_to_file(&path).await {
                    error!("Metrics export failed: {}", e);
                } else {
                    info!("Metrics exported to {}", path);
                }
            }
        })
    });

    WorkerRunner::run_workers(workers).await?;

    if let Some(task) = metrics_task {
        task.abort();
    }

    Ok(())
}

async fn register(
    config: DepinedConfig,
    email: String,
    password: String,
    username: Option<String>,
    referral_code: Option<String>,
) -> Result<()> {
    let client = api::ApiClient::new(&config.base_url, None)?;

    if client.register(&email, &password).await.is_none() {
        return Ok(());
    }

    let Some(login) = client.login(&email, &password).await else {
        return Ok(());
    };

    let token = login
        .get("data")
        .and_then(|d| d.get("token"))
        .and_then(|t| t.as_str())
        .or_else(|| login.get("token").and_then(|t| t.as_str()));

    let Some(token) = token else {
        error!("Login response did not carry a token");
        return Ok(());
    };

    if let Some(username) = username {
        let payload = serde_json::json!({ "step": "username", "username": username });
        let _ = client.create_profile(token, &payload).await;
    }

    if let Some(code) = referral_code {
        let _ = client.confirm_referral(token, &code).await;
    }

    core_logic::append_line(Path::new(&config.tokens_file), token)?;
    info!("Token for {} appended to {}", email, config.tokens_file);

    Ok(())
}
