//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;

use super::config_file::ConfigFile;
use super::exit_code;
use crate::panel::control::DEFAULT_WIDTH;

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Stdin,
}

impl Input {
    /// Label shown in the surface title and reports
    pub fn display_name(&self) -> String {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Application configuration from CLI args and config file
pub struct Config {
    pub input: Input,
    /// Classify only and report, no interactive preview
    pub check: bool,
    /// Report as JSON (with --check)
    pub json: bool,
    /// Panel width the --check banner is laid out at
    pub width: u16,
    /// Settings loaded from the config file
    pub file: ConfigFile,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        Self::parse(env::args().skip(1), ConfigFile::load())
    }

    /// Parse `args` (program name excluded) on top of `file`
    pub fn parse(args: impl IntoIterator<Item = String>, file: ConfigFile) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let mut input: Option<Input> = None;
        let mut check = false;
        let mut json = false;
        let mut width = DEFAULT_WIDTH;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--check" | "-c" => check = true,
                "--json" => json = true,
                "--width" | "-w" => {
                    if let Some(value) = args.next() {
                        width = value.parse().map_err(|_| {
                            anyhow::anyhow!("--width requires a positive integer, got '{}'", value)
                        })?;
                        if width == 0 {
                            anyhow::bail!("--width must be greater than zero");
                        }
                    } else {
                        anyhow::bail!("--width requires a value");
                    }
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(exit_code::SUCCESS);
                }
                "--version" | "-V" => {
                    println!("svgv {}", env!("CARGO_PKG_VERSION"));
                    std::process::exit(exit_code::SUCCESS);
                }
                "-" => input = Some(Input::Stdin),
                path if !path.starts_with('-') => {
                    if input.is_some() {
                        anyhow::bail!("only one input file may be given");
                    }
                    input = Some(Input::Path(PathBuf::from(path)));
                }
                other => anyhow::bail!("Unknown option: {}", other),
            }
        }

        let Some(input) = input else {
            anyhow::bail!("no input file given (use '-' for stdin)");
        };
        if json && !check {
            anyhow::bail!("--json requires --check");
        }

        Ok(Self {
            input,
            check,
            json,
            width,
            file,
        })
    }
}

fn print_help() {
    println!(
        r#"svgv - Safe SVG preview

USAGE:
    svgv [OPTIONS] <FILE>
    command | svgv [OPTIONS] -

OPTIONS:
    -c, --check         Classify only: print verdict and exit
                        (0 = clean, 1 = blocked elements, 2 = read error)
    --json              With --check, print a JSON report
    -w, --width N       Panel width for the banner layout in --check (default 80)
    -h, --help          Show this help message
    -V, --version       Show version

KEYS:
    j / Down            Scroll down
    k / Up              Scroll up
    PageDown / PageUp   Scroll by page
    g / G               Top / bottom
    q / Esc             Quit

CONFIG:
    ~/.config/svgview/config.toml"#
    );
}
