//! Chat bot: acts on recognized commands and builds replies
//!
//! The bot is transport-agnostic. It receives the author and text of one
//! message and returns the reply to post, if any.

mod format;
mod version;

pub use format::format_outcome;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::{self, Command, MacroCommand, StatAssignment};
use crate::db::{Database, MacroStore, StatStore};
use crate::error::CommandError;
use crate::roll::{self, ParsedRoll, RandomSource, RngSource};

pub const HELP_TEXT: &str = "\
 BOT UTILITY FUNCTIONS
-----------------------
!ping                           Checks if bot is alive
!help                           Displays this message
!version [history]              Shows the latest commit(s)

    DICE FUNCTIONS
-----------------------
!roll <N>d<S>[+/-M][++/--] [<=X] [>=Y]
                                Roll some dice, e.g. !roll 1d20+2
!roll <stat>[+/-M][++/--] [<=X] [>=Y]
                                Roll a d20 against a stat, e.g. !roll str+1

   CHARACTER FUNCTIONS
-----------------------
!stat <stat> <value>            Record str/dex/con/int/wis/cha/av/ac/hp
!macro <name> <roll command>    Store a roll command under a name
!macro <name>                   Roll a stored command
";

/// Author of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Stable identifier used as the storage key
    pub id: String,
    /// Name shown in mentions
    pub name: String,
}

impl ChatUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn mention(&self) -> String {
        format!("@{}", self.name)
    }
}

#[derive(Debug, Error)]
enum BotError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The dice bot
pub struct Bot {
    /// The bot's own identity; messages from it are ignored
    identity: ChatUser,
    stats: StatStore,
    macros: MacroStore,
    dice: Mutex<Box<dyn RandomSource + Send>>,
}

impl Bot {
    /// Create a bot backed by `db` that rolls with an OS-seeded RNG
    pub fn new(identity: ChatUser, db: &Database) -> Self {
        Self::with_dice(identity, db, RngSource(StdRng::from_os_rng()))
    }

    /// Create a bot with a specific random source
    pub fn with_dice<S: RandomSource + Send + 'static>(
        identity: ChatUser,
        db: &Database,
        dice: S,
    ) -> Self {
        Self {
            identity,
            stats: db.stats(),
            macros: db.macros(),
            dice: Mutex::new(Box::new(dice)),
        }
    }

    pub fn identity(&self) -> &ChatUser {
        &self.identity
    }

    /// Handle one chat message. Returns the reply to post, or `None` when
    /// the message is not addressed to the bot.
    pub async fn handle_message(&self, author: &ChatUser, content: &str) -> Option<String> {
        // Bot ignores itself
        if author.id == self.identity.id {
            return None;
        }

        if !content.starts_with('!') {
            return None;
        }

        let command = command::recognize(content)?;
        debug!("{} issued {:?}", author.id, command);

        let reply = match self.execute(author, command).await {
            Ok(reply) => reply,
            Err(BotError::Command(e)) => {
                info!("Rejected command from {}: {}", author.id, e);
                format!("{} {}", author.mention(), e)
            }
            Err(e) => {
                warn!("Failed to handle {:?} from {}: {}", content, author.id, e);
                format!(
                    "{} Sorry, something went wrong handling that command.",
                    author.mention()
                )
            }
        };

        Some(reply)
    }

    async fn execute(&self, author: &ChatUser, command: Command) -> Result<String, BotError> {
        match command {
            Command::Ping => Ok(format!("{} pong!", author.mention())),
            Command::Help => Ok(format!("```{}```", HELP_TEXT)),
            Command::Version { history } => Ok(self.version(history).await),
            Command::Roll(parsed) => self.roll(author, &parsed).await,
            Command::Stat(StatAssignment { stat, value }) => {
                self.stats.set_stat(&author.id, stat, value).await?;
                Ok(format!(
                    "{} - **{}** set to `{}`",
                    author.mention(),
                    stat,
                    value
                ))
            }
            Command::Macro(MacroCommand::Define { name, body }) => {
                self.macros.set_macro(&author.id, &name, &body).await?;
                Ok(format!(
                    "{} - Macro **{}** set to `{}`",
                    author.mention(),
                    name,
                    body
                ))
            }
            Command::Macro(MacroCommand::Invoke { name }) => {
                let body = self
                    .macros
                    .get_macro(&author.id, &name)
                    .await?
                    .ok_or_else(|| CommandError::MacroLookupMiss { name: name.clone() })?;

                // One level only: the stored body goes through the roll
                // grammar, never back through the macro grammar.
                let parsed = command::recognize_roll(&body)
                    .ok_or(CommandError::MalformedMacro { name })?;
                self.roll(author, &parsed).await
            }
        }
    }

    async fn roll(&self, author: &ChatUser, parsed: &ParsedRoll) -> Result<String, BotError> {
        let stats = match parsed.stat {
            Some(_) => self.stats.get_stats(&author.id).await?,
            None => None,
        };

        let outcome = {
            let mut dice = self.dice.lock();
            roll::roll(parsed, stats.as_ref(), &mut **dice)?
        };

        debug!(
            "{} rolled {}: {:?} -> {}",
            author.id, outcome.dice, outcome.raw_rolls, outcome.total
        );
        Ok(format_outcome(&outcome))
    }

    async fn version(&self, history: bool) -> String {
        let count = if history {
            version::HISTORY_COMMITS
        } else {
            version::LATEST_COMMITS
        };

        match version::git_log(count).await {
            Ok(log) => version::format_history(&log),
            Err(e) => {
                warn!("Could not read commit history: {}", e);
                format!(
                    "{} v{} (commit history unavailable)",
                    self.identity.name,
                    env!("CARGO_PKG_VERSION")
                )
            }
        }
    }
}
