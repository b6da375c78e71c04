use clap::Parser;
use compra_facil::app::{self, Outcome};
use compra_facil::domain::ports::{ConfigProvider, SessionStorage};
use compra_facil::utils::error::{AppError, ErrorSeverity};
use compra_facil::utils::{logger, validation::Validate};
use compra_facil::{
    CliConfig, FileSessionStorage, InvoiceLookupClient, MemorySessionStorage, SessionPersistence,
    ShoppingListEngine, TomlConfig,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let toml_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 初始化日誌
    let verbose = cli.verbose || toml_config.as_ref().is_some_and(TomlConfig::verbose);
    if cli.json_logs || toml_config.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting compra-facil");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match toml_config {
        Some(config) => run(config).await,
        None => run(cli).await,
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let client = match InvoiceLookupClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };
    tracing::info!("📡 Lookups go to {}", client.endpoint());

    match config.session_dir() {
        Some(dir) => {
            tracing::info!("💾 Session stored in {}", dir);
            let persistence =
                SessionPersistence::with_key(FileSessionStorage::new(dir), config.storage_key());
            serve(ShoppingListEngine::new(client, persistence)).await
        }
        None => {
            tracing::info!("💾 Session kept in memory");
            let persistence =
                SessionPersistence::with_key(MemorySessionStorage::new(), config.storage_key());
            serve(ShoppingListEngine::new(client, persistence)).await
        }
    }
}

async fn serve<S: SessionStorage>(
    engine: ShoppingListEngine<InvoiceLookupClient, S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_block(&mut stdout, &app::render::render_state(&engine.state().await)).await?;
    write_block(&mut stdout, "Digite 'ajuda' para ver os comandos.").await?;

    // 一次只處理一行，查詢完成前不會讀下一個指令
    while let Some(line) = lines.next_line().await? {
        match app::execute_line(&engine, &line).await {
            Outcome::Continue(text) => write_block(&mut stdout, &text).await?,
            Outcome::Quit => break,
        }
    }

    tracing::info!("👋 Session closed");
    Ok(())
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n\n").await?;
    stdout.flush().await
}

fn exit_with(e: &AppError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
