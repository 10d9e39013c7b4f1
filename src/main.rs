use anyhow::Result;
use jwt_gate::cli::commands::{self, MintOptions};
use jwt_gate::cli::output::Output;
use jwt_gate::cli::{Cli, Commands};
use jwt_gate::utils::toml_config::{GateConfig, LogFormat, ServerConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(server: &ServerConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = GateConfig::read_or_default(&cli.config)?;
    init_tracing(&config.server, cli.verbose);

    // Without a subcommand the binary runs the server.
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    match command {
        Commands::Mint {
            claims,
            claim,
            expiry,
            algorithm,
            raw,
        } => commands::mint(
            &config,
            MintOptions {
                claims,
                claim,
                expiry,
                algorithm,
                raw,
            },
            output,
        ),
        Commands::Decode { token, json } => commands::decode_token(&config, &token, json, output),
        Commands::Serve { host, port } => commands::serve(&config, host, port).await,
        Commands::Config { validate } => commands::show_config(&config, validate, output),
    }
}
