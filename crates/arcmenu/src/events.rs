use clap::Subcommand;
use strum::{Display as StrumDisplay, EnumString, EnumIter};

/// Requests accepted on the control socket, one per line. The same enum is
/// the `arcmenuctl` command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay, Subcommand,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Command {
    /// Open the menu if it is closed, close it otherwise
    Toggle,
    /// Open the menu
    Expand,
    /// Close the menu
    Collapse,
    /// Show the trigger
    Show,
    /// Close the menu and hide the trigger
    Hide,
    /// Re-read the config file
    Reload,
    /// Move the trigger back to the nearer screen edge
    Snap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Toggle,
    Expand,
    Collapse,
    Show,
    Hide,
    Snap,
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Toggle => Self::Toggle,
            Command::Expand => Self::Expand,
            Command::Collapse => Self::Collapse,
            Command::Show => Self::Show,
            Command::Hide => Self::Hide,
            Command::Reload => Self::ConfigReload,
            Command::Snap => Self::Snap,
        }
    }
}
