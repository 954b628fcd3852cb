use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use aquabuild_core::DeletePolicy;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Back office shell for pool construction clients, contractors, projects and payments"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Start with an empty store instead of the demo data
    #[clap(long)]
    pub empty: bool,

    /// Load a JSON snapshot after startup
    #[clap(long)]
    pub import: Option<PathBuf>,

    /// Delete policy for this session (overrides the configuration file)
    #[clap(long)]
    pub policy: Option<DeletePolicy>,
}

/// One line typed at the shell prompt
#[derive(Parser, Debug)]
#[clap(no_binary_name = true, name = "aqua")]
pub struct ShellLine {
    #[clap(subcommand)]
    pub command: ShellCommand,
}

/// The record collections
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    #[value(alias = "client")]
    Clients,
    #[value(alias = "contractor")]
    Contractors,
    #[value(alias = "project")]
    Projects,
    #[value(alias = "document", alias = "docs")]
    Documents,
    #[value(alias = "payment", alias = "pay")]
    Payments,
    #[value(alias = "lead")]
    Leads,
}

/// Exact-match filters for `list`. Each applies only to the kinds that
/// have the field.
#[derive(Args, Debug, Clone, Default)]
pub struct ListFilters {
    /// Filter by status
    #[clap(long)]
    pub status: Option<String>,

    /// Filter projects by city
    #[clap(long)]
    pub city: Option<String>,

    /// Filter documents by type
    #[clap(long = "type")]
    pub doc_type: Option<String>,

    /// Filter documents by project ID
    #[clap(long)]
    pub project: Option<String>,

    /// Filter payments by party (client or contractor)
    #[clap(long)]
    pub party: Option<String>,

    /// Filter leads by source
    #[clap(long)]
    pub source: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List records, optionally searching and filtering
    #[clap(alias = "ls")]
    List {
        /// Which records to list
        #[clap(value_enum)]
        kind: Kind,

        /// Case-insensitive search words
        search: Vec<String>,

        #[clap(flatten)]
        filters: ListFilters,
    },

    /// Show a record with its related records
    Show {
        /// The record ID (CL001, CT001, AQ001, DOC001, PAY001 or LD001)
        id: String,
    },

    /// Add a record interactively
    Add {
        #[clap(value_enum)]
        kind: Kind,
    },

    /// Edit a record interactively
    Edit {
        /// The record ID
        id: String,
    },

    /// Delete a record
    #[clap(alias = "rm")]
    Del {
        /// The record ID
        id: String,

        /// Skip the confirmation prompt
        #[clap(long, short = 'y')]
        yes: bool,

        /// Delete policy for this command only
        #[clap(long)]
        policy: Option<DeletePolicy>,
    },

    /// Show dashboard totals
    Summary,

    /// Export all records to a JSON file
    Export {
        /// Output path (defaults to the configured export path)
        path: Option<PathBuf>,
    },

    /// Replace records from a JSON snapshot
    Import {
        /// Path to the snapshot file
        path: PathBuf,
    },

    /// Show or write the configuration file
    #[clap(subcommand)]
    Config(ConfigCommand),

    /// Leave the shell
    #[clap(alias = "quit")]
    Exit,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the settings in effect for this session
    Show,

    /// Write this session's settings to the configuration file
    Init {
        /// Overwrite an existing file
        #[clap(long)]
        force: bool,
    },
}

/// Splits a shell line into words. Double quotes group words that contain
/// spaces.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        ShellLine::try_parse_from(split_line(line)).unwrap().command
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("  list   clients "), vec!["list", "clients"]);
        assert_eq!(
            split_line(r#"list projects "villa pool" --city Mumbai"#),
            vec!["list", "projects", "villa pool", "--city", "Mumbai"]
        );
        assert_eq!(split_line(r#"edit """#), vec!["edit", ""]);
        assert!(split_line("   ").is_empty());
    }

    #[test]
    fn test_list_with_search_and_filters() {
        match parse("list projects luxury pool --status completed --city Pune") {
            ShellCommand::List {
                kind,
                search,
                filters,
            } => {
                assert_eq!(kind, Kind::Projects);
                assert_eq!(search, vec!["luxury", "pool"]);
                assert_eq!(filters.status.as_deref(), Some("completed"));
                assert_eq!(filters.city.as_deref(), Some("Pune"));
                assert!(filters.party.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_kind_aliases() {
        match parse("add client") {
            ShellCommand::Add { kind } => assert_eq!(kind, Kind::Clients),
            other => panic!("unexpected command: {:?}", other),
        }
        match parse("ls docs --type receipt") {
            ShellCommand::List { kind, filters, .. } => {
                assert_eq!(kind, Kind::Documents);
                assert_eq!(filters.doc_type.as_deref(), Some("receipt"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        match parse("ls pay --party contractor --status overdue") {
            ShellCommand::List { kind, filters, .. } => {
                assert_eq!(kind, Kind::Payments);
                assert_eq!(filters.party.as_deref(), Some("contractor"));
                assert_eq!(filters.status.as_deref(), Some("overdue"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        match parse(r#"list lead --source "Google Ads""#) {
            ShellCommand::List { kind, filters, .. } => {
                assert_eq!(kind, Kind::Leads);
                assert_eq!(filters.source.as_deref(), Some("Google Ads"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_subcommands() {
        assert!(matches!(
            parse("config show"),
            ShellCommand::Config(ConfigCommand::Show)
        ));
        assert!(matches!(
            parse("config init --force"),
            ShellCommand::Config(ConfigCommand::Init { force: true })
        ));
        assert!(matches!(
            parse("config init"),
            ShellCommand::Config(ConfigCommand::Init { force: false })
        ));
    }

    #[test]
    fn test_delete_flags() {
        match parse("del CL001 -y --policy cascade") {
            ShellCommand::Del { id, yes, policy } => {
                assert_eq!(id, "CL001");
                assert!(yes);
                assert_eq!(policy, Some(DeletePolicy::Cascade));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_policy_is_rejected() {
        assert!(ShellLine::try_parse_from(split_line("del CL001 --policy nuke")).is_err());
    }

    #[test]
    fn test_startup_flags() {
        let cli = Cli::try_parse_from(["aqua", "--empty", "--policy", "restrict"]).unwrap();
        assert!(cli.empty);
        assert_eq!(cli.policy, Some(DeletePolicy::Restrict));
        assert!(cli.import.is_none());
    }
}
