use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dynform_core::{render_preview, ActionScript, FormConfig, FormStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod replay;

use replay::{replay, scenario_script, ReplayOptions};

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("TOML file with form defaults and preview options");

    Command::new("dynform")
        .version(dynform_core::VERSION)
        .about("Drive a dynamic form store headlessly and print its live JSON preview")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every store mutation (overrides RUST_LOG)"),
        )
        .subcommand(
            Command::new("preview")
                .about("Print the initial form snapshot")
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("scenario")
                .about("Run the built-in friends walkthrough, printing every step")
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("replay")
                .about("Apply a JSON or YAML action script")
                .arg(
                    Arg::new("script")
                        .required(true)
                        .value_name("SCRIPT")
                        .value_parser(value_parser!(PathBuf))
                        .help("Script file (.json, .yaml or .yml)"),
                )
                .arg(config_arg)
                .arg(
                    Arg::new("stop-on-error")
                        .long("stop-on-error")
                        .action(ArgAction::SetTrue)
                        .help("Stop at the first rejected action"),
                )
                .arg(
                    Arg::new("each")
                        .long("each")
                        .action(ArgAction::SetTrue)
                        .help("Print the preview after every action"),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dynform_core=debug,dynform=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ArgMatches) -> Result<FormConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(FormConfig::default()),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let mut stdout = std::io::stdout().lock();

    match matches.subcommand() {
        Some(("preview", args)) => {
            let config = load_config(args)?;
            let store = FormStore::with_config(config);
            let text = render_preview(store.state(), store.config().preview.indent)?;
            println!("{text}");
        }
        Some(("scenario", args)) => {
            let mut store = FormStore::with_config(load_config(args)?);
            let options = ReplayOptions {
                stop_on_error: false,
                each: true,
            };
            let report = replay(&mut store, &scenario_script(), options, &mut stdout)?;
            tracing::info!(
                applied = report.applied,
                rejected = report.rejected.len(),
                "scenario finished"
            );
        }
        Some(("replay", args)) => {
            let script_path = args
                .get_one::<PathBuf>("script")
                .context("missing script argument")?;
            let script = ActionScript::load(script_path)
                .with_context(|| format!("loading script {}", script_path.display()))?;
            let mut store = FormStore::with_config(load_config(args)?);
            let options = ReplayOptions {
                stop_on_error: args.get_flag("stop-on-error"),
                each: args.get_flag("each"),
            };

            let report = replay(&mut store, &script, options, &mut stdout)?;
            if !report.rejected.is_empty() {
                eprintln!(
                    "{} of {} actions rejected",
                    report.rejected.len(),
                    script.len()
                );
                if options.stop_on_error {
                    std::process::exit(1);
                }
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn replay_flags_parse() {
        let matches = cli()
            .try_get_matches_from(["dynform", "replay", "s.yaml", "--each", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "replay");
        assert!(args.get_flag("each"));
        assert!(!args.get_flag("stop-on-error"));
        assert_eq!(
            args.get_one::<PathBuf>("script"),
            Some(&PathBuf::from("s.yaml"))
        );
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(cli().try_get_matches_from(["dynform"]).is_err());
    }
}
