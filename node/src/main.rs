use anyhow::{Context as _, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use ledger_node::{init_logging, App, AppConfig, AppGenesis};
use std::path::{Path, PathBuf};
use tracing::{error, info};

fn cli() -> Command {
    Command::new("ledger-node")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Account ledger with token issuance")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Data directory")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("Log format (pretty, json)")
                .global(true),
        )
        .subcommand(
            Command::new("init")
                .about("Load a genesis file into the store")
                .arg(
                    Arg::new("genesis")
                        .long("genesis")
                        .value_name("FILE")
                        .help("Genesis JSON; defaults to the configured genesis_file"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Print the current state as genesis JSON")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write to FILE instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Run every registered invariant")
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Only report broken invariants"),
                ),
        )
        .subcommand(
            Command::new("default-genesis")
                .about("Print a default genesis for the configured native denomination"),
        )
}

fn load_config_with_overrides(matches: &ArgMatches) -> Result<AppConfig> {
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = AppConfig::load(config_path.as_deref())?;

    if let Some(data_dir) = matches.get_one::<String>("data-dir") {
        config.data_dir = Some(PathBuf::from(data_dir));
    }
    if let Some(log_level) = matches.get_one::<String>("log-level") {
        config.log_level = log_level.clone();
    }
    if let Some(log_format) = matches.get_one::<String>("log-format") {
        config.log_format = log_format.clone();
    }

    config.validate()?;
    Ok(config)
}

fn run_init(app: &App, config: &AppConfig, matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("genesis")
        .map(PathBuf::from)
        .or_else(|| config.genesis_file.clone())
        .context("no genesis file given; pass --genesis or set genesis_file")?;

    let genesis = AppGenesis::from_file(&path)
        .with_context(|| format!("failed to read genesis from {}", path.display()))?;
    app.init_genesis(&genesis)?;
    info!(target: "node", genesis = %path.display(), "genesis loaded");
    Ok(())
}

fn run_export(app: &App, matches: &ArgMatches) -> Result<()> {
    let exported = serde_json::to_string_pretty(&app.export_genesis()?)?;
    match matches.get_one::<String>("output") {
        Some(path) => {
            std::fs::write(Path::new(path), exported)?;
            info!(target: "node", output = %path, "genesis exported");
        }
        None => println!("{exported}"),
    }
    Ok(())
}

fn run_check(app: &App, matches: &ArgMatches) -> Result<()> {
    let quiet = matches.get_flag("quiet");
    let mut broken = 0usize;
    for (msg, is_broken) in app.run_invariants()? {
        if is_broken {
            broken += 1;
            error!(target: "node", "{msg}");
            println!("BROKEN {msg}");
        } else if !quiet {
            println!("ok     {msg}");
        }
    }
    if broken > 0 {
        anyhow::bail!("{broken} invariant(s) broken");
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = load_config_with_overrides(&matches)?;
    init_logging(&config)?;

    match matches.subcommand() {
        Some(("default-genesis", _)) => {
            let genesis = AppGenesis::default_genesis(&config.native_denom);
            println!("{}", serde_json::to_string_pretty(&genesis)?);
            Ok(())
        }
        Some((name, sub)) => {
            let app = App::open(&config)?;
            match name {
                "init" => run_init(&app, &config, sub),
                "export" => run_export(&app, sub),
                "check" => run_check(&app, sub),
                other => anyhow::bail!("unknown subcommand {other}"),
            }
        }
        None => anyhow::bail!("no subcommand given"),
    }
}
