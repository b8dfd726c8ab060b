use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigError};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect images for every diagnosis listed on dermis.net
    Crawl {
        /// Number of images to collect per diagnosis
        #[clap(value_parser, default_value_t = 5)]
        imagenum: usize,
    },
    /// Collect images for a single search query
    Collect {
        /// Text to search images for
        #[clap(value_parser)]
        query: String,

        /// Number of images to collect
        #[clap(value_parser, default_value_t = 100)]
        imagenum: usize,
    },
}

#[derive(Parser, Debug)]
#[clap(name = "Dermis Collector", author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub mode: Commands,

    /// Where to save images, one directory per query (If the path doesn't exist, it will be created.)
    ///
    /// [Default: "images"]
    #[clap(short = 'o', long, value_name = "PATH", value_parser, global = true)]
    pub output: Option<PathBuf>,

    /// Read settings from a TOML file. Command line flags take precedence.
    #[clap(short = 'c', long, value_name = "FILE", value_parser, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Merges the optional config file with the flags given on the command line.
    pub fn settings(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn crawl_defaults_to_five() {
        let cli = Cli::parse_from(["dermis-collector", "crawl"]);

        assert!(matches!(cli.mode, Commands::Crawl { imagenum: 5 }));
    }

    #[test]
    fn collect_defaults_to_hundred() {
        let cli = Cli::parse_from(["dermis-collector", "collect", "Acne vulgaris"]);

        match cli.mode {
            Commands::Collect { query, imagenum } => {
                assert_eq!(query, "Acne vulgaris");
                assert_eq!(imagenum, 100);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn collect_requires_query() {
        assert!(Cli::try_parse_from(["dermis-collector", "collect"]).is_err());
    }

    #[test]
    fn output_flag_overrides_default() {
        let cli = Cli::parse_from(["dermis-collector", "crawl", "12", "-o", "/tmp/derm"]);

        assert!(matches!(cli.mode, Commands::Crawl { imagenum: 12 }));
        assert_eq!(cli.settings().unwrap().output_dir, PathBuf::from("/tmp/derm"));
    }
}
