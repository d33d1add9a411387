use anyhow::{Context, Result};
use gitssg::{Command, Config, DirSink, IndexPolicy};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(&config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gitssg: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level())
        .with_target(false)
        .init();
}

fn run(config: &Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Repo {
            path,
            output,
            with_style,
        } => generate_repo(path, output, *with_style),
        Command::Index { paths, strict } => {
            generate_index(paths, IndexPolicy::from_strict(*strict))
        }
    }
}

fn generate_repo(path: &Path, output: &Path, with_style: bool) -> Result<()> {
    let mut sink = DirSink::create(output)?;
    let report = gitssg::build_repo_pages(path, &mut sink)
        .with_context(|| format!("Failed to generate pages for {}", path.display()))?;

    if with_style {
        gitssg::write_stylesheet(sink.dir())?;
    }

    info!(
        repo = report.snapshot.name(),
        pages = report.pages.len(),
        issues = report.issues.len(),
        output = %sink.dir().display(),
        "repository pages generated"
    );
    Ok(())
}

fn generate_index(paths: &[PathBuf], policy: IndexPolicy) -> Result<()> {
    let document = gitssg::render_index(paths, policy).context("Failed to build index")?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .context("Failed to write index to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
