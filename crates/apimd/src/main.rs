//! apimd CLI - Markdown API reference generator.
//!
//! Reads a compiler-emitted XML documentation export and the project
//! descriptor next to it, then writes one Markdown page per package,
//! namespace and type plus a `menu.json` navigation manifest.
//!
//! Failures are reported on stdout and the process still exits successfully.

mod error;
mod output;
mod writer;

use std::path::{Path, PathBuf};

use apimd_config::{CliSettings, Config, descriptor_path, load_descriptor};
use apimd_core::{ApiDocument, generate_site};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;
use writer::SiteWriter;

/// apimd - Markdown API reference generator.
#[derive(Parser)]
#[command(name = "apimd", version, about)]
struct Cli {
    /// XML documentation export produced by the compiler.
    input: PathBuf,

    /// Output folder relative to the input file (overrides config, default: docs).
    destination: Option<String>,

    /// Path to configuration file (default: auto-discover apimd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let output = Output::new();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            output.error(err.render().to_string().trim_end());
            return;
        }
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli, &output) {
        output.error(&format!("Error: {err}"));
    }
}

fn run(cli: &Cli, output: &Output) -> Result<(), CliError> {
    let input_dir = cli.input.parent().unwrap_or_else(|| Path::new(""));

    let cli_settings = CliSettings {
        destination: cli.destination.clone(),
    };
    let config = Config::load(cli.config.as_deref(), input_dir, Some(&cli_settings))?;

    let xml = std::fs::read_to_string(&cli.input).map_err(|source| CliError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let document = ApiDocument::parse(&xml)?;
    let package = load_descriptor(&descriptor_path(&cli.input))?;

    output.highlight(&format!("Generating {} ({})", package.title, package.id));

    let options = config.site_options();
    let site = generate_site(&document, &package, &options);

    let writer = SiteWriter::new(input_dir, &options.destination, &package.id);
    let count = writer.write(&site)?;

    output.info(&format!("Output: {}", writer.base().display()));
    output.success(&format!(
        "Wrote {count} pages and {} navigation entries",
        site.menu.pages.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<doc>
    <members>
        <member name="T:Acme.Widget"><summary>A widget.</summary></member>
        <member name="M:Acme.Widget.Do"><summary>Does it.</summary></member>
    </members>
</doc>"#;

    fn cli(input: &Path) -> Cli {
        Cli {
            input: input.to_path_buf(),
            destination: None,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_run_writes_site() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Acme.xml");
        std::fs::write(&input, DOC).unwrap();
        std::fs::write(
            dir.path().join("Acme.csproj"),
            "<Project><PropertyGroup><title>Acme</title><id>acme</id></PropertyGroup></Project>",
        )
        .unwrap();

        run(&cli(&input), &Output::new()).unwrap();

        let base = dir.path().join("docs/acme");
        assert!(base.join("index.md").is_file());
        assert!(base.join("Acme.Widget/index.md").is_file());
        assert!(base.join("menu.json").is_file());
    }

    #[test]
    fn test_run_missing_title_reports_error_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Acme.xml");
        std::fs::write(&input, DOC).unwrap();
        std::fs::write(
            dir.path().join("Acme.csproj"),
            "<Project><PropertyGroup><id>acme</id></PropertyGroup></Project>",
        )
        .unwrap();

        let err = run(&cli(&input), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("title"));
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn test_run_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = run(&cli(&dir.path().join("Missing.xml")), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Io { .. }));
    }
}
