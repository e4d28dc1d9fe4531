//! Interactive shell: one command per line, summary line after every edit.

use std::io::{self, BufRead, Write};

use ticket_core::Session;
use ticket_out::{render_report, RenderError, ReportRequest, ReportResult};
use ticket_quality::QualityProfile;
use tracing::{info, warn};

use crate::commands::{apply, parse_command, Command, HELP};

/// What the shell prints back for a command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The session changed; carries the refreshed summary line
    Updated(String),
    Output(String),
    Quit,
}

pub struct Shell {
    session: Session,
    profile: QualityProfile,
    templates: Option<String>,
    chart_width: usize,
}

impl Shell {
    pub fn new(session: Session, profile: QualityProfile) -> Self {
        Self {
            session,
            profile,
            templates: None,
            chart_width: ticket_out::DEFAULT_CHART_WIDTH,
        }
    }

    pub fn with_templates(mut self, path: Option<String>) -> Self {
        self.templates = path;
        self
    }

    pub fn with_chart_width(mut self, width: usize) -> Self {
        self.chart_width = width;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, RenderError> {
        match command {
            Command::Quit => Ok(Reply::Quit),
            Command::Help => Ok(Reply::Output(HELP.to_string())),
            Command::Show => Ok(Reply::Output(self.report(ticket_out::DEFAULT_TEMPLATE)?.output)),
            Command::Chart => Ok(Reply::Output(self.report("charts_only")?.output)),
            Command::Json => {
                let report = self.report(ticket_out::DEFAULT_TEMPLATE)?;
                serde_json::to_string_pretty(&report.view)
                    .map(Reply::Output)
                    .map_err(|e| RenderError::Serialize(e.to_string()))
            }
            edit => {
                apply(&mut self.session, edit);
                Ok(Reply::Updated(self.summary()?))
            }
        }
    }

    /// Summary line of the current state, always from the built-in templates
    pub fn summary(&self) -> Result<String, RenderError> {
        let request = ReportRequest::new(&self.session)
            .with_profile(self.profile.clone())
            .with_template("summary_line");
        Ok(render_report(request)?.output)
    }

    fn report(&self, template: &str) -> Result<ReportResult, RenderError> {
        let mut request = ReportRequest::new(&self.session)
            .with_profile(self.profile.clone())
            .with_template(template);
        request.templates_path = self.templates.clone();
        request.chart_width = self.chart_width;
        render_report(request)
    }

    /// Read commands until end of input or `quit`. Bad commands are
    /// reported and leave the session untouched.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!(session = self.session.id(), "shell started");
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "errore: {}", e)?;
                    continue;
                }
            };
            match self.execute(command) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Updated(text)) | Ok(Reply::Output(text)) => writeln!(output, "{}", text)?,
                Err(e) => {
                    warn!(error = %e, "command failed");
                    writeln!(output, "errore: {}", e)?;
                }
            }
        }
        output.flush()
    }
}
