//! Meta command implementation

use super::{Command, CommandContext, print_json};
use anyhow::Result;
use async_trait::async_trait;
use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum MetaAction {
    /// Service addresses and capabilities
    Info,
    /// Current rate limit status
    RateLimit,
    /// Emoji names and image URLs
    Emojis,
    /// A line of GitHub zen
    Zen,
}

pub struct MetaCommand {
    pub action: MetaAction,
}

#[async_trait]
impl Command for MetaCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        match self.action {
            MetaAction::Info => print_json(&client.get_meta().await?),
            MetaAction::RateLimit => print_json(&client.get_rate_limit().await?),
            MetaAction::Emojis => print_json(&client.get_emojis().await?),
            MetaAction::Zen => {
                println!("{}", client.get_zen().await?);
                Ok(())
            }
        }
    }
}
