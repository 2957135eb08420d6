// Duokey CLI
// Loads a keymap, boots the resolver and replays recorded key edges

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use duokey_core::config::Config;
use duokey_core::script::read_script;
use duokey_core::{Behavior, Emission, Engine, KeyEvent};

/// Dual-role key resolver
#[derive(Parser, Debug)]
#[command(name = "duokey")]
#[command(version)]
#[command(about = "Modifier-dependent dual-role key resolver", long_about = None)]
struct Args {
    /// TOML keymap file (defaults to <config dir>/duokey/keymap.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Replay key edges from a script file ('-' reads stdin)
    #[arg(short, long, value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Print the loaded bindings
    #[arg(long)]
    summary: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Main application state
struct Application {
    config: Config,
    args: Args,
}

impl Application {
    fn new(args: Args) -> Result<Self> {
        let config_path = match &args.config {
            Some(path) => path.clone(),
            None => Config::default_path()
                .context("no config directory on this system; pass --config")?,
        };
        let config = Config::from_toml_path(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;
        log::info!("loaded {}", config_path.display());
        Ok(Self { config, args })
    }

    fn validate(&self) {
        println!(
            "Configuration is valid ({} bindings)",
            self.config.binding_count()
        );
    }

    fn print_summary(&self, engine: &Engine) {
        println!("\n=== KEYMAP SUMMARY ===");
        if let Some(name) = &self.config.name {
            println!("Keymap: {}", name);
        }
        println!("{} bindings", engine.resolver().len());
        for (trigger, behavior) in engine.resolver().iter() {
            match behavior {
                Behavior::Cycle(cycle) => {
                    println!("  {} cycle {}", trigger, behavior);
                    for step in cycle.steps() {
                        println!("      - {}", step);
                    }
                }
                _ => println!("  {} {} {}", trigger, behavior.kind(), behavior),
            }
        }
        if let Some(speed) = self.config.lighting_speed {
            println!("Lighting speed: 0x{:02X}", speed);
        }
        println!("======================\n");
    }

    fn read_events(&self, path: &Path) -> Result<Vec<KeyEvent>> {
        let events = if path.as_os_str() == "-" {
            read_script(io::stdin().lock()).context("failed to read script from stdin")?
        } else {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_script(BufReader::new(file))
                .with_context(|| format!("failed to read {}", path.display()))?
        };
        Ok(events)
    }

    fn run(&self) -> Result<()> {
        let mut engine = self.config.to_engine()?;

        if self.args.summary {
            self.print_summary(&engine);
        }

        print_emissions("boot", &engine.boot());

        let Some(script) = &self.args.script else {
            return Ok(());
        };
        let events = self.read_events(script)?;
        log::info!("replaying {} events", events.len());

        for event in events {
            let outcome = engine.process_event(event);
            if outcome.dispatch.is_handled() {
                print_emissions(&event.to_string(), &outcome.emissions);
            } else {
                println!("{}: unhandled", event);
            }
        }

        if !engine.held_keys().is_empty() {
            let stuck: Vec<String> = engine
                .held_keys()
                .keys()
                .iter()
                .map(ToString::to_string)
                .collect();
            log::warn!("keys still held after replay: {}", stuck.join(", "));
            print_emissions("cleanup", &engine.release_all());
        }
        Ok(())
    }
}

fn print_emissions(label: &str, emissions: &[Emission]) {
    if emissions.is_empty() {
        println!("{}: -", label);
        return;
    }
    let list: Vec<String> = emissions.iter().map(ToString::to_string).collect();
    println!("{}: {}", label, list.join(", "));
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let app = Application::new(args)?;

    if app.args.check_config {
        app.validate();
        return Ok(());
    }

    if app.args.script.is_none() && !app.args.summary {
        bail!("nothing to do; pass --script, --summary or --check-config");
    }

    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["duokey", "--config", "/tmp/test.toml"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert!(args.script.is_none());
        assert!(!args.verbose);
        assert!(!args.check_config);
        assert!(!args.summary);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "duokey",
            "--config",
            "/tmp/test.toml",
            "--verbose",
            "--summary",
            "--script",
            "-",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert!(args.verbose);
        assert!(args.summary);
        assert_eq!(args.script, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_args_check_config() {
        let args = Args::parse_from(["duokey", "--config", "/tmp/test.toml", "--check-config"]);

        assert!(args.check_config);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_application_replays_preset() {
        let preset = concat!(env!("CARGO_MANIFEST_DIR"), "/presets/corne.toml");
        let args = Args::parse_from(["duokey", "--config", preset, "--summary"]);
        let app = Application::new(args).unwrap();
        assert!(app.config.binding_count() > 0);
        app.run().unwrap();
    }
}
