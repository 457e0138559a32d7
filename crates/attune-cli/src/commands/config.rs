use clap::Subcommand;

use attune_core::{BehaviorConfig, Planner, StateStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "attention.morning_peak", "breaks.max_break_duration")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = BehaviorConfig::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = BehaviorConfig::load()?;
            let (store, mut planner) = open_state()?;
            config.set(&key, &value)?;
            planner.update_settings(config.clone())?;
            config.save()?;
            store.save(&planner)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = BehaviorConfig::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let (store, mut planner) = open_state()?;
            planner.reset_settings();
            BehaviorConfig::default().save()?;
            store.save(&planner)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

/// Load the planner state before anything is written, so an unreadable
/// state file leaves the settings untouched.
fn open_state() -> Result<(StateStore, Planner), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let planner = store.load(BehaviorConfig::default())?;
    Ok((store, planner))
}
