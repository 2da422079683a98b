use super::PermissionNavigator;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::process::Command;

/// A program, with arguments, which brings up the permission-grant screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandStrings {
    /// Program to run
    pub command: String,
    /// Its arguments
    #[serde(default)]
    pub args: Vec<String>,
}

/// A [PermissionNavigator] which launches an external program.
///
/// Without a configured program, it can only tell the user in the log what
/// to do.
#[derive(Debug, Clone)]
pub struct CommandNavigator {
    command: Option<CommandStrings>,
    settings_hint: String,
}

impl CommandNavigator {
    /// `settings_hint` names the thing the user needs to grant write access
    /// to, it's only used when no command is configured.
    pub fn new(command: Option<CommandStrings>, settings_hint: &str) -> CommandNavigator {
        CommandNavigator {
            command,
            settings_hint: settings_hint.to_owned(),
        }
    }
}

impl PermissionNavigator for CommandNavigator {
    fn open_write_settings_screen(&self) -> Result<()> {
        match &self.command {
            Some(c) => {
                log::info!("Opening permission screen with {}", c.command);
                // Not waited for, the screen stays up for as long as the user wants
                Command::new(&c.command)
                    .args(&c.args)
                    .spawn()
                    .with_context(|| format!("Couldn't launch {}", c.command))?;
            }
            None => log::info!(
                "No permission screen configured, grant write access to {} manually",
                self.settings_hint
            ),
        }
        Ok(())
    }
}
