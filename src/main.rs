use clap::{Parser, Subcommand};
use sheet_essays::model::ContentModel;
use sheet_essays::session::{Action, Session};
use sheet_essays::source::{self, Origin};
use sheet_essays::{config, generate, output};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheet-essays")]
#[command(about = "Essay blog built from a Google Sheet")]
#[command(long_about = "\
Essay blog built from a Google Sheet

Each sheet row is an essay. Columns, left to right:

  title | date | read time | excerpt | content | tags | series | series description | image url

Rows without a title are skipped. Tags are comma-separated. Rows sharing a
series name form a series; the first non-empty description wins.

Site directory:

  my-blog/
  ├── config.toml        # Site title, sheet id, colors (optional)
  └── posts.json         # Local copy of the sheet (optional, see source.file)

Without a configured source the built-in sample essays are used.

Run 'sheet-essays gen-config' to generate a documented config.toml.
Set SHEET_ESSAYS_LOG=debug for diagnostics.")]
#[command(version = env!("SHEET_ESSAYS_VERSION"))]
struct Cli {
    /// Site directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the content and print an inventory
    Check {
        /// Print the normalized content model as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Write the static site
    Build,
    /// Read actions from stdin and print each resulting view
    ///
    /// Commands: tag <name>, search <text>, more, series <name>, article <id>,
    /// series-only, home, subscribe, close, click inside|outside, reload
    Browse,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { json } => {
            let site_config = config::load_config(&cli.site)?;
            let (session, origin) = load_session(&site_config, &cli.site);
            if json {
                println!("{}", serde_json::to_string_pretty(session.model())?);
            } else {
                output::print_check_output(session.model(), &origin);
            }
        }
        Command::Build => {
            let site_config = config::load_config(&cli.site)?;
            let (session, origin) = load_session(&site_config, &cli.site);
            println!("==> Content from {}", origin);
            let summary = generate::generate(
                &session,
                &site_config,
                origin.needs_setup_notice(),
                &cli.output,
            )?;
            output::print_generate_output(session.model(), &summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Browse => {
            let site_config = config::load_config(&cli.site)?;
            browse(&site_config, &cli.site)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; stdout carries command output only.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SHEET_ESSAYS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Start a session and run the initial load through it.
fn load_session(site_config: &config::SiteConfig, site_dir: &Path) -> (Session, Origin) {
    let mut session = Session::new(ContentModel::default());
    let origin = reload(&mut session, site_config, site_dir);
    (session, origin)
}

fn reload(session: &mut Session, site_config: &config::SiteConfig, site_dir: &Path) -> Origin {
    let ticket = session.begin_load();
    let loaded = source::load(&site_config.source, site_dir);
    session.finish_load(ticket, loaded.records);
    loaded.origin
}

/// Interactive text browser: one action per line, one frame per action.
fn browse(site_config: &config::SiteConfig, site_dir: &Path) -> std::io::Result<()> {
    let (mut session, origin) = load_session(site_config, site_dir);
    if origin.needs_setup_notice() {
        println!("(showing sample essays: no source configured)");
    }
    output::print_frame(&session.frame());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        println!();
        if line.trim() == "reload" {
            let origin = reload(&mut session, site_config, site_dir);
            println!("(reloaded from {origin})");
            output::print_frame(&session.frame());
            continue;
        }
        match line.parse::<Action>() {
            Ok(action) => output::print_step(&session.dispatch(&action)),
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}
