//! CLI entrypoint for neptun-rs
//!
//! Wires configuration, discovery and the session together and prints
//! listings as text or JSON.

mod commands;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use commands::{Cli, Command};
use indicatif::{ProgressBar, ProgressStyle};
use neptun_application::{Items, PageCursor};
use neptun_domain::{
    Institution, KnownLanguage, Relevance, SortOrder, Subject, SubjectQuery, Term, TermKind,
};
use neptun_infrastructure::{
    ConfigLoader, Credentials, FileConfig, HttpEndpoint, Session, list_institutions_with,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    match cli.command {
        Command::Institutions { compatible } => {
            let mut institutions = discover(&config).await?;
            if compatible {
                institutions.retain(Institution::is_compatible);
            }
            if cli.json {
                print_json(&institutions)?;
            } else {
                for institution in &institutions {
                    let marker = if institution.is_compatible() {
                        "+".green()
                    } else {
                        "-".red()
                    };
                    let languages = institution
                        .languages
                        .iter()
                        .map(|l| l.code().to_string())
                        .collect::<Vec<_>>()
                        .join(",");
                    println!(
                        "{} {} [{}] ({})",
                        marker,
                        institution.name.bold(),
                        institution.om_code,
                        languages
                    );
                }
            }
        }

        Command::Trainings => {
            let session = open_session(&config).await?;
            let trainings = session.trainings().await?;
            if cli.json {
                print_json(&trainings)?;
            } else {
                for training in &trainings {
                    println!("{:>8}  {}  {}", training.id, training.code.bold(), training.description);
                }
            }
            session.logout().await?;
        }

        Command::Terms { kind } => {
            let session = open_session(&config).await?;
            let terms = session.terms(TermKind::from(kind), None).await?;
            if cli.json {
                print_json(&terms)?;
            } else {
                for term in &terms {
                    println!("{:>8}  {}", term.id, term.name);
                }
            }
            session.logout().await?;
        }

        Command::Curriculums {
            term_index,
            relevance,
        } => {
            let session = open_session(&config).await?;
            let term = register_term(&session, term_index).await?;
            let curriculums = session
                .curriculums(&term, Relevance::from(relevance), None)
                .await?;
            if cli.json {
                print_json(&curriculums)?;
            } else {
                println!("{}", format!("Curriculums for {}", term.name).bold());
                for curriculum in &curriculums {
                    println!("{:>8}  {}", curriculum.id, curriculum.name);
                }
            }
            session.logout().await?;
        }

        Command::Subjects {
            relevance,
            term_index,
            name,
            code,
            lecturer,
            course_code,
            descending,
        } => {
            let session = open_session(&config).await?;
            let term = register_term(&session, term_index).await?;

            let mut query = SubjectQuery::for_term(term.clone());
            if !relevance.is_empty() {
                let relevances: Vec<Relevance> =
                    relevance.into_iter().map(Relevance::from).collect();
                query = query.with_relevance(relevances);
            }
            if let Some(name) = name {
                query = query.with_name(name);
            }
            if let Some(code) = code {
                query = query.with_code(code);
            }
            if let Some(lecturer) = lecturer {
                query = query.with_lecturer(lecturer);
            }
            if let Some(course_code) = course_code {
                query = query.with_course_code(course_code);
            }
            if descending {
                query = query.sorted(SortOrder::Descending);
            }

            let mut cursor = session.subjects(&query, None)?;
            let total = cursor.load_length().await?;

            if cli.json {
                let subjects = Items::new(&mut *cursor).collect().await?;
                print_json(&subjects)?;
            } else {
                println!(
                    "{}",
                    format!("Listing {total} subjects ({})", term.name).bold()
                );
                let progress = ProgressBar::new(total).with_style(
                    ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                        .expect("progress template"),
                );
                let mut lines = Vec::new();
                let mut items = Items::new(&mut *cursor);
                while let Some(subject) = items.next().await? {
                    lines.push(format_subject(&subject));
                    progress.inc(1);
                }
                progress.finish_and_clear();
                for line in lines {
                    println!("{line}");
                }
            }

            session.logout().await?;
        }
    }

    Ok(())
}

fn format_subject(subject: &Subject) -> String {
    let mark = if subject.taken { "*" } else { " " };
    let assessment = subject.assessment.as_deref().unwrap_or("-");
    format!(
        "{mark} {}  {}  {} cr  {}",
        subject.code.bold(),
        subject.name,
        subject.credit,
        assessment
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fetch the institution list, honoring a discovery URL override.
async fn discover(config: &FileConfig) -> Result<Vec<Institution>> {
    let institutions = match &config.discovery.url {
        Some(url) => list_institutions_with(&HttpEndpoint::new(url.clone())).await?,
        None => neptun_infrastructure::list_institutions().await?,
    };
    Ok(institutions)
}

/// Pick the configured institution out of the discovery listing.
fn pick_institution(institutions: Vec<Institution>, pattern: &str) -> Result<Institution> {
    let needle = pattern.to_lowercase();
    let matched = institutions.into_iter().find(|institution| {
        institution.name.to_lowercase().contains(&needle)
            || institution
                .url
                .as_deref()
                .is_some_and(|url| url.to_lowercase().contains(&needle))
    });
    match matched {
        Some(institution) => Ok(institution),
        None => bail!("no institution matches {pattern:?}"),
    }
}

/// Discover, pick the configured institution and log in.
async fn open_session(config: &FileConfig) -> Result<Session> {
    let user = config
        .login
        .user
        .clone()
        .context("no user configured; set login.user or NEPTUN_LOGIN_USER")?;
    let password = config
        .login
        .password
        .clone()
        .context("no password configured; set NEPTUN_LOGIN_PASSWORD")?;
    let language = KnownLanguage::from_code(&config.login.language)
        .with_context(|| format!("unsupported language code {:?}", config.login.language))?;
    let pattern = config
        .institution
        .name
        .clone()
        .context("no institution configured; set institution.name or NEPTUN_INSTITUTION_NAME")?;

    let institutions = discover(config).await?;
    let institution = pick_institution(institutions, &pattern)?;
    if !institution.is_compatible() {
        bail!(
            "institution {:?} has no compatible mobile service",
            institution.name
        );
    }

    info!(institution = %institution.name, "logging in");
    let session = Session::connect(&institution, Credentials::new(user, password), language)
        .await
        .context("login failed")?;
    Ok(session)
}

/// The register term at `index` in the sign-up term listing.
async fn register_term(session: &Session, index: usize) -> Result<Term> {
    let terms = session.terms(TermKind::RegisterSubject, None).await?;
    let count = terms.len();
    terms
        .into_iter()
        .nth(index)
        .with_context(|| format!("term index {index} out of range ({count} terms)"))
}
