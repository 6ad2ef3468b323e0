use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::ReportConfig;
use crate::loaders::{load_projects, IssueLoader};
use crate::render::{JsonRenderer, TextRenderer, ViewRenderer};
use crate::services::{CreationReport, IssueIndex, Messages, PatternDateFormatter, ProjectCatalog};
use crate::types::{RawParams, ReportError, User, ValidationErrors};

/// Issue creation report: issues created per interval for a project
#[derive(Parser)]
#[command(name = "creation-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ~/.creation-report/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the issue creation report
    Generate(GenerateArgs),

    /// List known projects
    Projects {
        /// Projects JSON file
        #[arg(long)]
        projects: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// First day of the report
    #[arg(long)]
    start: Option<String>,

    /// Day the report ends (exclusive)
    #[arg(long)]
    end: Option<String>,

    /// Bucket width in days
    #[arg(long, allow_negative_numbers = true)]
    interval: Option<i64>,

    /// Project id
    #[arg(long, allow_negative_numbers = true)]
    project: Option<i64>,

    /// Acting user (anonymous when omitted)
    #[arg(long)]
    user: Option<String>,

    /// Directory of issue JSONL files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Projects JSON file
    #[arg(long)]
    projects: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn raw_params(&self) -> RawParams {
        RawParams {
            start_date: self.start.clone(),
            end_date: self.end.clone(),
            interval: self.interval,
            selected_project_id: self.project,
        }
    }
}

/// Result of a generate run that didn't hit an operational error
#[derive(Debug)]
pub enum Outcome {
    Rendered(String),
    Invalid(ValidationErrors),
}

/// Exit status for a report rejected by validation
pub const EXIT_INVALID: u8 = 2;

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        let config = ReportConfig::load(self.config.as_deref())?;
        config.logging.init();

        match self.command {
            Commands::Generate(args) => {
                let outcome = generate(&config, &args)?;
                let code = write_outcome(outcome, &mut io::stdout(), &mut io::stderr())?;
                Ok(ExitCode::from(code))
            }
            Commands::Projects { projects, json } => {
                let path = match projects {
                    Some(p) => p,
                    None => config.projects_file()?,
                };
                let catalog = ProjectCatalog::new(
                    load_projects(&path)
                        .with_context(|| format!("loading projects from {}", path.display()))?,
                );
                write_projects(&catalog, json, &mut io::stdout())?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Print a generate outcome and return the process exit status.
/// Validation errors go to `err` as one `field: message` line each.
pub fn write_outcome(
    outcome: Outcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<u8> {
    match outcome {
        Outcome::Rendered(output) => {
            write!(out, "{}", output)?;
            Ok(0)
        }
        Outcome::Invalid(errors) => {
            for e in errors.iter() {
                writeln!(err, "{}: {}", e.field, e.message)?;
            }
            Ok(EXIT_INVALID)
        }
    }
}

pub fn write_projects(
    catalog: &ProjectCatalog,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&catalog.projects())?)?;
    } else {
        for p in catalog.projects() {
            writeln!(out, "{:>8}  {:<10}  {}", p.id, p.key, p.name)?;
        }
    }
    Ok(())
}

/// Load data, then validate and render the report
pub fn generate(config: &ReportConfig, args: &GenerateArgs) -> anyhow::Result<Outcome> {
    let projects_file = match &args.projects {
        Some(p) => p.clone(),
        None => config.projects_file()?,
    };
    let data_dir = match &args.data_dir {
        Some(d) => d.clone(),
        None => config.data_dir()?,
    };

    let catalog = ProjectCatalog::new(
        load_projects(&projects_file)
            .with_context(|| format!("loading projects from {}", projects_file.display()))?,
    );
    let index = IssueIndex::new(IssueLoader::new(data_dir).load_all());
    let user = args.user.clone().map(User::named).unwrap_or_default();

    if args.json {
        render_with(config, index, catalog, JsonRenderer, &args.raw_params(), &user)
    } else {
        let renderer = TextRenderer::new(config.bar_width);
        render_with(config, index, catalog, renderer, &args.raw_params(), &user)
    }
}

fn render_with<R: ViewRenderer>(
    config: &ReportConfig,
    index: IssueIndex,
    catalog: ProjectCatalog,
    renderer: R,
    raw: &RawParams,
    user: &User,
) -> anyhow::Result<Outcome> {
    let report = CreationReport::new(
        index,
        catalog,
        PatternDateFormatter::new(config.date_format.as_str()),
        renderer,
    )
    .with_messages(Messages::with_overrides(&config.messages))
    .with_max_height(config.max_height);

    match report.generate(raw, user) {
        Ok(output) => Ok(Outcome::Rendered(output)),
        Err(ReportError::Validation(errors)) => Ok(Outcome::Invalid(errors)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn fixture(path: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), path)
    }

    fn generate_args(extra: &[&str]) -> GenerateArgs {
        let issues = fixture("issues");
        let projects = fixture("projects.json");
        let mut argv = vec![
            "creation-report",
            "generate",
            "--data-dir",
            issues.as_str(),
            "--projects",
            projects.as_str(),
        ];
        argv.extend_from_slice(extra);

        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "creation-report",
            "generate",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-10",
            "--interval",
            "3",
            "--project",
            "10000",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.start.as_deref(), Some("2024-01-01"));
                assert_eq!(args.interval, Some(3));
                assert_eq!(args.project, Some(10000));
                assert!(!args.json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_parse_negative_interval() {
        let args = generate_args(&["--interval", "-2"]);
        assert_eq!(args.interval, Some(-2));
    }

    #[test]
    fn test_cli_parse_projects_json() {
        let cli = Cli::try_parse_from(["creation-report", "projects", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Projects { json: true, .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["creation-report"]).is_err());
    }

    #[test]
    fn test_generate_text_report_from_fixtures() {
        let args = generate_args(&[
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-10",
            "--interval",
            "3",
            "--project",
            "10000",
        ]);

        match generate(&ReportConfig::default(), &args).unwrap() {
            Outcome::Rendered(out) => {
                assert!(out.starts_with("Issue creation report: Demo Project\n"));
                // DEMO-1 resolves to the archived copy from 2023 and DEMO-5
                // is restricted to alice
                assert!(out.contains("2024-01-01  "));
                assert!(out.contains("2024-01-07  "));
                assert!(out.trim_end().ends_with("Total: 5"));
            }
            Outcome::Invalid(errors) => panic!("unexpected validation errors: {}", errors),
        }
    }

    #[test]
    fn test_generate_json_report_as_user() {
        let args = generate_args(&[
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-10",
            "--interval",
            "3",
            "--project",
            "10000",
            "--user",
            "alice",
            "--json",
        ]);

        match generate(&ReportConfig::default(), &args).unwrap() {
            Outcome::Rendered(out) => {
                let value: serde_json::Value = serde_json::from_str(&out).unwrap();
                assert_eq!(value["params"]["openCount"], serde_json::json!([2, 1, 3]));
                assert_eq!(value["params"]["maxHeight"], 360);
            }
            Outcome::Invalid(errors) => panic!("unexpected validation errors: {}", errors),
        }
    }

    #[test]
    fn test_generate_reports_every_invalid_field() {
        let args = generate_args(&["--end", "2024-01-10", "--interval", "0", "--project", "5"]);

        match generate(&ReportConfig::default(), &args).unwrap() {
            Outcome::Invalid(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.has_field(Field::StartDate));
                assert!(errors.has_field(Field::Interval));
                assert!(errors.has_field(Field::SelectedProjectId));
            }
            Outcome::Rendered(_) => panic!("expected validation errors"),
        }
    }

    #[test]
    fn test_invalid_report_exits_with_field_lines() {
        let args = generate_args(&["--end", "2024-01-10", "--interval", "0", "--project", "5"]);
        let outcome = generate(&ReportConfig::default(), &args).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = write_outcome(outcome, &mut out, &mut err).unwrap();

        assert_eq!(code, EXIT_INVALID);
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        let lines: Vec<&str> = err.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("startDate: "));
        assert!(lines[1].starts_with("interval: "));
        assert!(lines[2].starts_with("selectedProjectId: "));
    }

    #[test]
    fn test_rendered_report_exits_zero() {
        let args = generate_args(&[
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-10",
            "--interval",
            "3",
            "--project",
            "10000",
        ]);
        let outcome = generate(&ReportConfig::default(), &args).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = write_outcome(outcome, &mut out, &mut err).unwrap();

        assert_eq!(code, 0);
        assert!(err.is_empty());
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("Issue creation report: Demo Project"));
    }

    #[test]
    fn test_write_projects_table_and_json() {
        let path = PathBuf::from(fixture("projects.json"));
        let catalog = ProjectCatalog::new(load_projects(&path).unwrap());

        let mut table = Vec::new();
        write_projects(&catalog, false, &mut table).unwrap();
        let table = String::from_utf8(table).unwrap();
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "   10000  DEMO        Demo Project");
        assert_eq!(rows[1], "   10001  OPS         Operations");

        let mut json = Vec::new();
        write_projects(&catalog, true, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value[1]["key"], "OPS");
    }

    #[test]
    fn test_generate_missing_projects_file_errors() {
        let mut args = generate_args(&["--project", "10000"]);
        args.projects = Some(PathBuf::from(fixture("absent.json")));

        assert!(generate(&ReportConfig::default(), &args).is_err());
    }
}
