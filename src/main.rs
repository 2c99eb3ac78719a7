use anyhow::Context;
use feelora::{
    auth::jwt::AuthService,
    chat::UserText,
    cli::{output::Output, Cli, Commands},
    create_app, AppState, FeeloraConfig, GeminiClient, InMemoryIdentityProvider, LLMClient,
    WellnessChat,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = FeeloraConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    init_tracing(&config, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, &output).await,
        Commands::Config { validate } => show_config(&config, validate, &output),
        Commands::Chat { message } => chat_once(&config, &message, &output).await,
    }
}

/// `RUST_LOG` wins; otherwise the configured level, raised to `debug` by
/// `--verbose`.
fn init_tracing(config: &FeeloraConfig, verbose: bool) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = if verbose {
                "debug"
            } else {
                config.server.log_level.as_str()
            };
            EnvFilter::try_new(level)
                .with_context(|| format!("invalid log level '{}'", level))?
                .add_directive("tower_http=info".parse()?)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn gemini_client(config: &FeeloraConfig) -> GeminiClient {
    let api_key = match config.gemini_api_key() {
        Ok(key) => key,
        Err(e) => {
            warn!(error = %e, "no Gemini API key, chat replies will use the fallback");
            String::new()
        }
    };

    GeminiClient::with_config(
        api_key,
        config.gemini.api_base.clone(),
        config.gemini.model.clone(),
        config.gemini.generation_config(),
    )
}

async fn serve(config: FeeloraConfig, output: &Output) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;

    let auth = Arc::new(AuthService::new(
        config.jwt_secret()?,
        config.auth.jwt_access_expiry,
        config.auth.jwt_refresh_expiry,
    ));
    let identity = Arc::new(InMemoryIdentityProvider::new(auth));
    let llm: Arc<dyn LLMClient> = Arc::new(gemini_client(&config));

    let addr = config.server.address();
    let state = AppState::new(config, identity, llm);
    let app = create_app(state);

    output.banner();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Feelora server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Feelora server stopped");
    Ok(())
}

fn show_config(config: &FeeloraConfig, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.header("Server");
    output.kv("address", &config.server.address());
    output.kv("log_level", &config.server.log_level);

    output.header("Auth");
    output.kv("access expiry (s)", &config.auth.jwt_access_expiry.to_string());
    output.kv("refresh expiry (s)", &config.auth.jwt_refresh_expiry.to_string());

    output.header("Gemini");
    output.kv("api_base", &config.gemini.api_base);
    output.kv("model", &config.gemini.model);
    output.kv("temperature", &config.gemini.temperature.to_string());
    output.kv("top_k", &config.gemini.top_k.to_string());
    output.kv("top_p", &config.gemini.top_p.to_string());
    output.kv(
        "max_output_tokens",
        &config.gemini.max_output_tokens.to_string(),
    );

    output.header("Chat");
    output.kv(
        "max sessions per owner",
        &config.chat.max_sessions_per_owner.to_string(),
    );
    output.kv("idle ttl (s)", &config.chat.session_idle_ttl.to_string());

    output.header("Secrets");
    for (name, value) in config.masked_secrets() {
        output.kv(&name, &value);
    }

    if validate {
        output.newline();
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                anyhow::bail!("configuration is invalid");
            }
        }
    }
    Ok(())
}

async fn chat_once(config: &FeeloraConfig, message: &str, output: &Output) -> anyhow::Result<()> {
    let Some(text) = UserText::parse(message) else {
        output.error("Message must not be blank");
        anyhow::bail!("blank message");
    };

    let chat = WellnessChat::new(Arc::new(gemini_client(config)));
    output.info(&format!("Asking {}...", chat.model_name()));
    let reply = chat.send_turn(&text, &[]).await;
    output.reply(&reply);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install CTRL+C signal handler");
    }
}
