use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ticket_cli::{apply, parse_assignment, CliConfig, Shell};
use ticket_core::{Scenario, Session};
use ticket_out::{render_report, ReportRequest, DEFAULT_TEMPLATE};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ticket-sim", version, about = "Ticket revenue simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a report for a scenario and exit (status 2 when blocked)
    Report {
        #[arg(long)]
        scenario: Option<String>,
        /// Edit applied after loading, e.g. `--set openTicket=20`
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Profile mode (advisory, strict) or a profile YAML file
        #[arg(long)]
        profile: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long)]
        template: Option<String>,
        /// Templates YAML file replacing the built-in templates
        #[arg(long)]
        templates: Option<String>,
        #[arg(long)]
        width: Option<usize>,
    },
    /// Edit a session interactively, one command per line on stdin
    Shell {
        #[arg(long)]
        scenario: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = CliConfig::from_env();

    match cli.command {
        Command::Report {
            scenario,
            set,
            profile,
            format,
            template,
            templates,
            width,
        } => {
            override_config(&mut config, scenario, profile);
            if templates.is_some() {
                config.templates = templates;
            }
            if let Some(width) = width {
                config.chart_width = width;
            }

            let mut session = load_session(&config)?;
            for edit in &set {
                let command = parse_assignment(edit).with_context(|| format!("invalid --set '{edit}'"))?;
                apply(&mut session, command);
            }

            let mut request = ReportRequest::new(&session)
                .with_profile(config.resolve_profile()?)
                .with_template(template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()));
            request.templates_path = config.templates.clone();
            request.chart_width = config.chart_width;

            let report = render_report(request)?;
            match format {
                Format::Text => println!("{}", report.output.trim_end()),
                Format::Json => println!("{}", serde_json::to_string_pretty(&report.view)?),
            }

            if report.verdict.is_blocked() {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Shell { scenario, profile } => {
            override_config(&mut config, scenario, profile);
            let session = load_session(&config)?;
            let mut shell = Shell::new(session, config.resolve_profile()?)
                .with_templates(config.templates.clone())
                .with_chart_width(config.chart_width);

            shell.run(io::stdin().lock(), io::stdout().lock())?;
            info!(session = shell.session().id(), "shell closed");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn override_config(config: &mut CliConfig, scenario: Option<String>, profile: Option<String>) {
    if scenario.is_some() {
        config.scenario = scenario;
    }
    if let Some(profile) = profile {
        config.profile = profile;
    }
}

fn load_session(config: &CliConfig) -> Result<Session> {
    let scenario = match &config.scenario {
        Some(path) => Scenario::load(path).with_context(|| format!("loading scenario {path}"))?,
        None => Scenario::default(),
    };
    Ok(Session::from_scenario(scenario))
}
