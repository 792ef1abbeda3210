//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use neptun_domain::{Relevance, TermKind};
use std::path::PathBuf;

/// CLI arguments for neptun
#[derive(Parser, Debug)]
#[command(name = "neptun")]
#[command(version, about = "Client for the Neptun mobile service")]
#[command(long_about = r#"
Talks to a university's Neptun mobile service: discovers institutions,
logs in, and lists trainings, terms, curriculums and subjects.

Credentials come from configuration or environment:
  NEPTUN_LOGIN_USER       the student's code
  NEPTUN_LOGIN_PASSWORD   the password (never put this in a file)

Configuration files are loaded from (in priority order):
1. --config <path>    Explicit config file
2. ./neptun.toml      Project-level config
3. ~/.config/neptun/config.toml   Global config

Example:
  neptun institutions --compatible
  neptun subjects -r curriculum -r unrelated --name Logika
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every institution known to the discovery service
    Institutions {
        /// Show only institutions this client can talk to
        #[arg(long)]
        compatible: bool,
    },

    /// List the student's trainings
    Trainings,

    /// List terms of one kind
    Terms {
        #[arg(short, long, value_enum, default_value = "register-subject")]
        kind: TermKindArg,
    },

    /// List curriculums for a registration term
    Curriculums {
        /// Which register term to use, by position in the term listing
        #[arg(long, default_value_t = 0)]
        term_index: usize,

        #[arg(short, long, value_enum, default_value = "curriculum")]
        relevance: RelevanceArg,
    },

    /// List subjects for a registration term
    Subjects {
        /// Relevances to include (repeatable); all three when omitted
        #[arg(short, long, value_enum)]
        relevance: Vec<RelevanceArg>,

        /// Which register term to use, by position in the term listing
        #[arg(long, default_value_t = 0)]
        term_index: usize,

        /// Filter by subject name
        #[arg(long)]
        name: Option<String>,

        /// Filter by subject code
        #[arg(long)]
        code: Option<String>,

        /// Filter by lecturer name
        #[arg(long)]
        lecturer: Option<String>,

        /// Filter by course code
        #[arg(long)]
        course_code: Option<String>,

        /// Sort descending by name instead of ascending
        #[arg(long)]
        descending: bool,
    },
}

/// Term kinds accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TermKindArg {
    RegisterSubject,
    RegisterExam,
    TakenSubject,
    TakenExam,
    Period,
    Markbook,
}

impl From<TermKindArg> for TermKind {
    fn from(arg: TermKindArg) -> Self {
        match arg {
            TermKindArg::RegisterSubject => TermKind::RegisterSubject,
            TermKindArg::RegisterExam => TermKind::RegisterExam,
            TermKindArg::TakenSubject => TermKind::TakenSubject,
            TermKindArg::TakenExam => TermKind::TakenExam,
            TermKindArg::Period => TermKind::Period,
            TermKindArg::Markbook => TermKind::Markbook,
        }
    }
}

/// Relevances accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RelevanceArg {
    Curriculum,
    Elective,
    Unrelated,
}

impl From<RelevanceArg> for Relevance {
    fn from(arg: RelevanceArg) -> Self {
        match arg {
            RelevanceArg::Curriculum => Relevance::Curriculum,
            RelevanceArg::Elective => Relevance::Elective,
            RelevanceArg::Unrelated => Relevance::Unrelated,
        }
    }
}
