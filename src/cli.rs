use std::path::PathBuf;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Set verbosity level, repeat for more details (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    /// Root of the ring repository. Defaults to the current directory
    #[arg(long, env = "RING_DT_ROOT", global = true)]
    pub(crate) root: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: RingCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum RingCommand {
    /// Generates the platform specific npm packages in `npm/`
    Build,
    /// Links the local debug executable into the npm package of the current platform
    Link,
    /// Removes the link created by `link`
    Unlink,
    /// Sets a value across the js packages
    Set {
        #[command(subcommand)]
        property: SetCommand,
    },
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum SetCommand {
    /// Sets all ring js packages to the given version. A leading 'v' is removed
    Version {
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_version() {
        let cli = CLI::try_parse_from(["ring-dt", "set", "version", "v1.2.3"]).unwrap();
        assert_eq!(cli.command, RingCommand::Set {
            property: SetCommand::Version { value: "v1.2.3".to_string() },
        });
    }

    #[test]
    fn test_parse_verbose_count() {
        let cli = CLI::try_parse_from(["ring-dt", "-vv", "build"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = CLI::try_parse_from(["ring-dt", "link", "--verbose"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(CLI::try_parse_from(["ring-dt"]).is_err());
        assert!(CLI::try_parse_from(["ring-dt", "set", "version"]).is_err());
    }
}
