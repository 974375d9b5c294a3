use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use distrib_core::config::validate_sentinel;
use distrib_core::{DistribConfig, OutputFormat};
use distrib_placement::allocate;
use distrib_report::DEFAULT_CHART_TITLE;
use tracing::info;

/// Command-line values; each overrides the matching distrib.toml entry.
pub struct RunArgs {
    pub files: Option<PathBuf>,
    pub nodes: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub chart: Option<PathBuf>,
    pub sentinel: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, PartialEq)]
struct Settings {
    files: PathBuf,
    nodes: PathBuf,
    out: Option<PathBuf>,
    format: OutputFormat,
    chart: Option<PathBuf>,
    sentinel: String,
}

fn resolve(args: RunArgs, config: DistribConfig) -> anyhow::Result<Settings> {
    let files = args
        .files
        .or(config.input.files)
        .ok_or_else(|| anyhow!("no files table given (use --files or [input].files)"))?;
    let nodes = args
        .nodes
        .or(config.input.nodes)
        .ok_or_else(|| anyhow!("no nodes table given (use --nodes or [input].nodes)"))?;
    let out = args.out.or(config.output.path);
    let format = args
        .format
        .or(config.output.format)
        .unwrap_or(if out.is_some() {
            OutputFormat::Csv
        } else {
            OutputFormat::Text
        });

    let sentinel = args.sentinel.unwrap_or(config.allocation.sentinel);
    validate_sentinel(&sentinel)?;

    Ok(Settings {
        files,
        nodes,
        out,
        format,
        chart: args.chart.or(config.output.chart),
        sentinel,
    })
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = DistribConfig::discover(args.config.as_deref(), Path::new("."))
        .context("failed to load config")?;
    let settings = resolve(args, config)?;

    let inputs = distrib_core::load_inputs(&settings.files, &settings.nodes, &settings.sentinel)
        .context("failed to load inputs")?;
    let allocation = allocate(&inputs.items, &inputs.nodes);

    match &settings.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_report(&allocation, &settings, BufWriter::new(file))?;
            info!(path = %path.display(), format = %settings.format, "wrote report");
        }
        None => write_report(&allocation, &settings, std::io::stdout().lock())?,
    }

    if let Some(path) = &settings.chart {
        let svg = distrib_report::render_chart(&allocation, DEFAULT_CHART_TITLE)?;
        std::fs::write(path, svg)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote chart");
    }

    Ok(())
}

fn write_report<W: Write>(
    allocation: &distrib_placement::Allocation,
    settings: &Settings,
    mut out: W,
) -> anyhow::Result<()> {
    match settings.format {
        OutputFormat::Text => {
            out.write_all(distrib_report::format_text(allocation, &settings.sentinel).as_bytes())?;
        }
        OutputFormat::Csv => distrib_report::write_csv(allocation, &settings.sentinel, &mut out)?,
        OutputFormat::Json => {
            writeln!(out, "{}", distrib_report::to_json(allocation)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            files: None,
            nodes: None,
            config: None,
            out: None,
            format: None,
            chart: None,
            sentinel: None,
        }
    }

    fn config() -> DistribConfig {
        DistribConfig::from_toml_str(
            r#"
[input]
files = "cfg-files.txt"
nodes = "cfg-nodes.txt"

[allocation]
sentinel = "NONE"
"#,
        )
        .unwrap()
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.files = Some(PathBuf::from("cli-files.txt"));
        a.sentinel = Some("-".to_string());

        let s = resolve(a, config()).unwrap();
        assert_eq!(s.files, PathBuf::from("cli-files.txt"));
        assert_eq!(s.nodes, PathBuf::from("cfg-nodes.txt"));
        assert_eq!(s.sentinel, "-");
    }

    #[test]
    fn default_format_is_text_on_stdout() {
        let s = resolve(args(), config()).unwrap();
        assert_eq!(s.format, OutputFormat::Text);
        assert_eq!(s.sentinel, "NONE");
    }

    #[test]
    fn output_file_defaults_to_csv() {
        let mut a = args();
        a.out = Some(PathBuf::from("out.txt"));
        assert_eq!(resolve(a, config()).unwrap().format, OutputFormat::Csv);

        let mut a = args();
        a.out = Some(PathBuf::from("out.json"));
        a.format = Some(OutputFormat::Json);
        assert_eq!(resolve(a, config()).unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn sentinel_flag_must_be_one_token() {
        for bad in ["", "no node", "tab\there"] {
            let mut a = args();
            a.sentinel = Some(bad.to_string());
            let err = resolve(a, config()).unwrap_err();
            assert!(err.to_string().contains("sentinel"), "{bad:?}: {err}");
        }
    }

    #[test]
    fn missing_tables_are_reported() {
        let err = resolve(args(), DistribConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--files"));
    }
}
