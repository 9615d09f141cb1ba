use kalakaar_setup::console::Console;
use kalakaar_setup::db::MySqlConnector;
use kalakaar_setup::{Config, SetupMode, provision};
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            Console::stdout().failure(&e);
            return ExitCode::FAILURE;
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    let Some(mode) = SetupMode::from_flag(cfg.basic.setup_mode) else {
        warn!("setup mode not enabled; refusing to run");
        eprintln!(
            "This tool can only be run during setup (set KALAKAAR_BASIC__SETUP_MODE=true)"
        );
        return ExitCode::FAILURE;
    };

    info!(
        host = %cfg.database.host,
        port = cfg.database.port,
        user = %cfg.database.user,
        database = %cfg.database.name,
        base_dir = %cfg.layout.base_dir.display(),
        loglevel = %cfg.basic.loglevel
    );

    let connector = MySqlConnector::new(&cfg.database);
    let mut console = Console::stdout();
    match provision::run(mode, &cfg, &connector, &mut console).await {
        Ok(report) => {
            info!(
                database = %report.database,
                statements = report.statements_applied,
                tables = report.tables.len(),
                "setup complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "setup failed");
            console.failure(&e);
            ExitCode::FAILURE
        }
    }
}
