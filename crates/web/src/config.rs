//! Runtime configuration.
//!
//! Parsed from CLI flags first, with environment variables as the
//! fallback. The only knob most runs need is `--directory`.

use clap::Parser;
use std::path::PathBuf;

/// The one-shot HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "oneshot-serve", version, about)]
pub struct Config {
    /// Directory root for the /files/ routes; without it those routes
    /// run unconfigured
    #[arg(long, value_name = "PATH", env = "ONESHOT_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4221", env = "ONESHOT_ADDRESS")]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn defaults_need_no_flags() {
        let config = Config::try_parse_from(["oneshot-serve"]).unwrap();

        assert_eq!(config.address, "127.0.0.1:4221");
        assert_eq!(config.directory, None);
    }

    #[test]
    fn directory_flag_is_parsed() {
        let config = Config::try_parse_from(["oneshot-serve", "--directory", "/tmp/files"]).unwrap();

        assert_eq!(config.directory, Some(PathBuf::from("/tmp/files")));
    }

    #[test]
    fn address_flag_overrides_the_default() {
        let config = Config::try_parse_from(["oneshot-serve", "--address", "0.0.0.0:8080"]).unwrap();

        assert_eq!(config.address, "0.0.0.0:8080");
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let result = Config::try_parse_from(["oneshot-serve", "--bogus"]);

        assert!(result.is_err());
    }
}
