//! Non-interactive classification report (`--check`)

use std::io::{self, Write};

use serde::Serialize;

use super::{exit_code, open_input, Config};
use crate::classify::Finding;
use crate::panel::{PreviewControl, PreviewOutcome};

/// What `--check` found for one document
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub input: String,
    pub outcome: &'static str,
    pub blocked: bool,
    /// Document size, absent when reading failed
    pub bytes: Option<usize>,
    pub findings: Vec<Finding>,
    /// Banner text the preview would show
    pub banner: Option<String>,
    /// Banner size in cells at the requested panel width
    pub banner_width: Option<u16>,
    pub banner_rows: Option<u16>,
}

impl CheckReport {
    /// Preview `config.input` and summarize the resulting panel
    pub fn collect(config: &Config) -> anyhow::Result<Self> {
        let options = config.file.control_options()?;
        let classifier = options.classifier.clone();
        let mut control = PreviewControl::with_options(options);
        control.set_width(config.width);

        let mut stream = open_input(&config.input);
        control.do_preview(&mut stream);

        let findings = control
            .surface()
            .map(|surface| classifier.findings(&surface.document_text()))
            .unwrap_or_default();

        Ok(Self {
            input: config.input.display_name(),
            outcome: outcome_label(control.outcome()),
            blocked: control.outcome() == PreviewOutcome::Blocked,
            bytes: control.surface().map(|s| s.document().len()),
            findings,
            banner: control.banner().map(|b| b.text().to_string()),
            banner_width: control.banner().map(|b| b.width()),
            banner_rows: control.banner().map(|b| b.height()),
        })
    }

    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            "clean" => exit_code::SUCCESS,
            "blocked" => exit_code::BLOCKED,
            _ => exit_code::ERROR,
        }
    }

    /// Human-readable report
    pub fn write_plain(&self, out: &mut impl Write) -> io::Result<()> {
        match self.outcome {
            "clean" => writeln!(
                out,
                "{}: clean ({} bytes)",
                self.input,
                self.bytes.unwrap_or(0)
            )?,
            "blocked" => {
                writeln!(out, "{}: blocked elements found", self.input)?;
                for finding in &self.findings {
                    writeln!(out, "  {} at offset {}", finding.rule, finding.offset)?;
                }
            }
            _ => writeln!(out, "{}: unreadable", self.input)?,
        }
        if let Some(banner) = &self.banner {
            writeln!(
                out,
                "  banner ({}x{}): {}",
                self.banner_width.unwrap_or(0),
                self.banner_rows.unwrap_or(0),
                banner
            )?;
        }
        Ok(())
    }
}

fn outcome_label(outcome: PreviewOutcome) -> &'static str {
    match outcome {
        PreviewOutcome::Rendered => "clean",
        PreviewOutcome::Blocked => "blocked",
        PreviewOutcome::Failed => "failed",
        PreviewOutcome::Empty => "empty",
    }
}

/// Run `--check` and return the process exit code
pub fn run_check(config: &Config) -> anyhow::Result<i32> {
    let report = CheckReport::collect(config)?;
    let mut stdout = io::stdout().lock();

    if config.json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        report.write_plain(&mut stdout)?;
    }

    Ok(report.exit_code())
}
