use clap::{Parser, Subcommand};
use folio::host::Document;
use folio::locale::Locale;
use folio::page::Page;
use folio::{config, content, output, render, replay};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}@{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

/// Locale selection shared by commands that build a page.
#[derive(clap::Args, Clone)]
struct LocaleArgs {
    /// Locale to render (pt, en, es). Defaults to the configured locale
    #[arg(long)]
    locale: Option<Locale>,

    /// Pick the locale from a Cookie header, as a browser request would
    #[arg(long, conflicts_with = "locale")]
    cookie: Option<String>,
}

impl LocaleArgs {
    fn resolve(&self) -> Option<Locale> {
        self.locale
            .or_else(|| self.cookie.as_deref().and_then(Locale::from_cookie_header))
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Single-page portfolio with a project modal and image carousel")]
#[command(long_about = "\
Single-page portfolio with a project modal and image carousel

Every display string comes from one TOML file per locale. A locale without
its own file falls back to the default locale.

Content structure:

  content/
  ├── config.toml        # Site config (optional)
  ├── pt.toml            # Profile, labels, education, projects, work, ...
  ├── en.toml
  ├── es.toml
  └── assets/            # Images, CV, favicon → copied to output root

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render index.html and copy assets to the output directory
    Render(LocaleArgs),
    /// Load and validate the content of every locale
    Check,
    /// Replay a script of clicks and key presses, printing each step
    Replay {
        /// Script file, one input per line
        script: PathBuf,

        #[command(flatten)]
        locale: LocaleArgs,

        /// Print steps as JSON
        #[arg(long)]
        json: bool,

        /// Write the final page state to the output directory
        #[arg(long)]
        snapshot: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render(locale) => {
            println!("==> Rendering {}", cli.source.display());
            let summary = render::generate(&cli.source, &cli.output, locale.resolve())?;
            output::print_render_output(&summary);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let reports = content::check_content(&cli.source, site_config.default_locale)?;
            output::print_check_output(&reports);
            println!("==> Content is valid");
        }
        Command::Replay {
            script,
            locale,
            json,
            snapshot,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let fallback = site_config.default_locale;
            let requested = locale.resolve().unwrap_or(fallback);
            let loaded = content::load_content(&cli.source, requested, fallback)?;
            let lines = replay::parse_script(&std::fs::read_to_string(&script)?)?;

            let document = Document::new();
            let mut page = Page::new(&document, loaded.content, loaded.locale);
            let steps = replay::run(&mut page, &lines, |l| {
                content::load_content(&cli.source, l, fallback)
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                output::print_replay_output(&steps);
            }
            if snapshot {
                let index = render::write_index(&page, &site_config, &cli.output)?;
                render::copy_assets(&cli.source.join("assets"), &cli.output)?;
                if !json {
                    println!("==> Snapshot written to {}", index.display());
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
