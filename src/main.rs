use cep_race::utils::{logger, validation::Validate};
use cep_race::{validate_cep, CepError, CliArgs, RaceConfig};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if let Err(e) = run(&args).await {
        tracing::error!("Lookup failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(args: &CliArgs) -> Result<(), CepError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading providers from: {}", path);
            RaceConfig::from_file(path)?
        }
        None => RaceConfig::stock(),
    };

    if let Some(deadline_ms) = args.deadline_ms {
        config.race.deadline_ms = Some(deadline_ms);
        tracing::debug!("Deadline overridden to {} ms", deadline_ms);
    }

    config.validate()?;

    if args.dry_run {
        return dry_run(&config, &args.cep);
    }

    let resolver = config.build_resolver()?;
    let result = resolver.resolve(&args.cep).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Response from {} (fastest):\n{}", result.source, result.payload);
    }
    Ok(())
}

fn dry_run(config: &RaceConfig, raw_cep: &str) -> Result<(), CepError> {
    let code = validate_cep(raw_cep)?;

    println!("CEP: {}", code);
    println!("Deadline: {:?}", config.deadline());
    if let Some(timeout) = config.request_timeout() {
        println!("Request timeout: {:?}", timeout);
    }
    for provider in &config.providers {
        let url = provider
            .url_template
            .replace(cep_race::utils::validation::CEP_PLACEHOLDER, code.as_str());
        let state = if provider.enabled { "enabled" } else { "disabled" };
        println!("  {} [{}] GET {}", provider.name, state, url);
    }

    if config.enabled_providers().next().is_none() {
        tracing::warn!("No enabled providers, a real run would fail immediately");
    }
    Ok(())
}
