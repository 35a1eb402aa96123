pub mod achievements;
pub mod config;
pub mod points;
pub mod reset;
pub mod routine;
pub mod stats;

use luminique_core::{
    CalendarDate, Config, Database, DateProvider, FixedClock, GlowSession, LocalClock,
};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Options and configuration shared by every command.
pub struct Context {
    pub today: Option<CalendarDate>,
    /// Loaded once in `main`.
    pub config: Config,
}

pub type Session = GlowSession<Box<dyn DateProvider>, Database>;

impl Context {
    fn clock(&self) -> Box<dyn DateProvider> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(LocalClock),
        }
    }

    /// Open the on-disk store and bring it up to today.
    pub fn session(&self) -> Result<Session, Box<dyn std::error::Error>> {
        let db = Database::open()?;
        let session = GlowSession::open(self.clock(), db, &self.config)?;
        tracing::debug!(today = %session.today(), "session opened");
        Ok(session)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
