use clap::Subcommand;
use luminique_core::Config;
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dot-separated key: points.<action>, routine.morning,
        /// routine.evening or logging.level
        key: String,
    },
    /// Change one value and save
    Set {
        /// Dot-separated key (see `config get`)
        key: String,
        /// Number for points, JSON step list for routine.*, text for logging.level
        value: String,
    },
    /// Print the whole configuration
    List,
    /// Restore and save the default configuration
    Reset,
}

#[derive(Serialize)]
struct Updated<'a> {
    key: &'a str,
    value: serde_json::Value,
}

pub fn run(ctx: &Context, action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => match ctx.config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            let mut config = ctx.config.clone();
            config.set(&key, &value)?;
            let stored = serde_json::to_value(&config)?
                .pointer(&format!("/{}", key.replace('.', "/")))
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            print_json(&Updated {
                key: &key,
                value: stored,
            })?;
        }
        ConfigAction::List => print_json(&ctx.config)?,
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            print_json(&config)?;
        }
    }
    Ok(())
}
