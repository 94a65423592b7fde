use bouncer::bot;
use bouncer::config::{GateConfig, Settings};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Panics are fatal; make sure they land in the log before the process
    // unwinds through the default handler.
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Fatal panic: {}", info);
        default_panic(info);
    }));

    info!("Starting Bouncer Discord Bot");

    // Load settings
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    // Load the gate configuration (code table, roles, log channel)
    let gate = match GateConfig::load(&settings.gate_config_path) {
        Ok(g) => g,
        Err(e) => {
            error!(
                "Failed to load gate config from {}: {}",
                settings.gate_config_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    info!(
        "Gate config loaded: {} access codes, {} role buttons",
        gate.codes.len(),
        gate.role_buttons.len()
    );

    // Start the bot
    if let Err(e) = bot::framework::run(settings, gate).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}
