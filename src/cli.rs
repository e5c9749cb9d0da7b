use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;
use url::Url;

use crate::error::{ExportError, Result};
use crate::firestore::DEFAULT_ENDPOINT;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "Export a Firestore collection to newline-delimited JSON")]
pub struct Cli {
    /// Google Cloud project id
    #[clap(allow_hyphen_values = true)]
    pub project: String,

    /// Document or collection path below the default database (e.g. users)
    #[clap(allow_hyphen_values = true)]
    pub document: String,

    /// Number of documents requested per page
    #[clap(long("pageSize"), default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Quiet mode, suppress progress output
    #[clap(long)]
    pub quiet: bool,

    /// Debug mode, enable verbose logging
    #[clap(long)]
    pub debug: bool,

    /// Root of the Firestore REST API
    #[clap(long, hide = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Result<Self> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parse an argument list whose first element is the program name.
    ///
    /// `--help` and `--version` come back as [`ExportError::DisplayInfo`];
    /// every other parse failure is reported as [`ExportError::WrongArguments`].
    pub fn parse_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(ExportError::DisplayInfo(e))
            }
            Err(_) => Err(ExportError::WrongArguments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_positionals() {
        let cli = Cli::parse_from_args(["firestore-export", "my-project", "users"]).unwrap();
        assert_eq!(cli.project, "my-project");
        assert_eq!(cli.document, "users");
        assert_eq!(cli.page_size, 1, "Page size should default to 1");
        assert!(!cli.quiet);
        assert_eq!(cli.endpoint.as_str(), "https://firestore.googleapis.com/v1");
    }

    #[test]
    fn test_wrong_argument_count() {
        for args in [
            vec!["firestore-export"],
            vec!["firestore-export", "my-project"],
            vec!["firestore-export", "my-project", "users", "extra"],
        ] {
            let result = Cli::parse_from_args(args.clone());
            assert!(
                matches!(result, Err(ExportError::WrongArguments)),
                "Expected WrongArguments for {:?}",
                args
            );
        }
    }

    #[test]
    fn test_page_size_flag() {
        let cli =
            Cli::parse_from_args(["firestore-export", "p", "users", "--pageSize", "300"]).unwrap();
        assert_eq!(cli.page_size, 300);

        let zero = Cli::parse_from_args(["firestore-export", "p", "users", "--pageSize", "0"]);
        assert!(matches!(zero, Err(ExportError::WrongArguments)));
    }

    #[test]
    fn test_arguments_are_not_validated() {
        let cli = Cli::parse_from_args(["firestore-export", "", "a b/c"]).unwrap();
        assert_eq!(cli.project, "");
        assert_eq!(cli.document, "a b/c");
    }

    #[test]
    fn test_positionals_may_start_with_hyphen() {
        let cli = Cli::parse_from_args(["firestore-export", "p", "-users"]).unwrap();
        assert_eq!(cli.project, "p");
        assert_eq!(cli.document, "-users");

        let cli = Cli::parse_from_args(["firestore-export", "-proj", "-orders"]).unwrap();
        assert_eq!(cli.project, "-proj");
        assert_eq!(cli.document, "-orders");

        // Flags still parse once both positionals are taken
        let cli =
            Cli::parse_from_args(["firestore-export", "p", "-users", "--pageSize", "5"]).unwrap();
        assert_eq!(cli.page_size, 5);
    }

    #[test]
    fn test_help_and_version_are_not_errors_of_arguments() {
        for flag in ["--help", "--version"] {
            let result = Cli::parse_from_args(["firestore-export", flag]);
            assert!(
                matches!(result, Err(ExportError::DisplayInfo(_))),
                "Expected DisplayInfo for {}",
                flag
            );
        }
    }
}
