use anyhow::Context;
use cask_server::{CaskServer, ServerConfig};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

/// Build the effective configuration: file (or defaults), then flags.
pub fn load_config(source: &ConfigSource) -> anyhow::Result<ServerConfig> {
    let mut config = match &source.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &source.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if let Some(port) = source.http_port {
        config = config.with_port(port);
    }
    if let Some(ms) = source.set_timeout_ms {
        config.store.set_timeout_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    println!(
        "{} Cask listening on {} (set timeout {}ms)",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.store.set_timeout_ms
    );
    let server = CaskServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
    runtime.block_on(server.serve())?;
    tracing::info!("server stopped");
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    match &args.source.config {
        Some(path) => println!("# {} {}", "source:".dimmed(), path.display()),
        None => println!("# {} {}", "source:".dimmed(), "defaults".yellow()),
    }
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let config = load_config(&ConfigSource::default()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let source = ConfigSource {
            bind: Some("0.0.0.0:1234".into()),
            http_port: Some(4321),
            set_timeout_ms: Some(75),
            ..Default::default()
        };
        let config = load_config(&source).unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:4321");
        assert_eq!(config.store.set_timeout_ms, 75);
    }

    #[test]
    fn invalid_bind_rejected() {
        let source = ConfigSource {
            bind: Some("nowhere".into()),
            ..Default::default()
        };
        assert!(load_config(&source).is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let source = ConfigSource {
            set_timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(load_config(&source).is_err());
    }

    #[test]
    fn missing_config_file_rejected() {
        let source = ConfigSource {
            config: Some("/definitely/not/here/cask.toml".into()),
            ..Default::default()
        };
        assert!(load_config(&source).is_err());
    }
}
