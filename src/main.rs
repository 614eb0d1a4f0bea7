use std::time::Instant;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

use symbolcopy::app::App;
use symbolcopy::cache_policy::CachePolicy;
use symbolcopy::catalog::{FsSource, ZipSource};
use symbolcopy::clipboard::ClipboardChain;
use symbolcopy::config::AppConfig;
use symbolcopy::logging::{self, Verbosity};
use symbolcopy::model::CatalogSnapshot;
use symbolcopy::render;
use symbolcopy::view::{Tab, View};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse, search and copy special symbols, kaomoji and fancy-font text", long_about = None)]
struct Cli {
    /// Directory or .zip bundle holding the JSON data files
    #[arg(long, value_name = "DIR_OR_ZIP", default_value = "assets")]
    assets: Utf8PathBuf,
    /// Folder inside a .zip bundle that holds the data files
    #[arg(long, value_name = "PATH", default_value = "")]
    zip_root: String,
    /// Start from a catalog snapshot instead of the data files
    #[arg(long, value_name = "FILE")]
    snapshot: Option<Utf8PathBuf>,
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,
    /// Search strictness (0.0 = exact only)
    #[arg(long)]
    threshold: Option<f64>,
    /// Location to open, absolute or relative to the base URL (e.g. "/?tab=kaomoji&q=cat")
    #[arg(long)]
    url: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print what the location displays
    View {
        /// Text shown on the fonts tab
        #[arg(long, default_value = "")]
        font_input: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Search symbols and kaomoji
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render text in every fancy font
    Fonts {
        text: String,
        /// Only this font
        #[arg(long)]
        font: Option<String>,
    },
    /// List categories of a tab
    Categories {
        #[arg(long)]
        tab: Option<Tab>,
    },
    /// Copy text to the clipboard
    Copy {
        text: String,
        #[arg(long)]
        tab: Option<Tab>,
    },
    /// Save the loaded catalog as a binary snapshot
    Snapshot { out: Utf8PathBuf },
    /// Print the offline cache policy as JSON
    CachePolicy,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(t) = cli.threshold {
        config.search.threshold = t;
    }

    if let Command::CachePolicy = cli.command {
        let policy = CachePolicy::for_sources(&config.sources, &config.base_url()?);
        println!("{}", serde_json::to_string_pretty(&policy)?);
        return Ok(());
    }

    let html_errors = matches!(
        cli.command,
        Command::View {
            format: Format::Html,
            ..
        }
    );
    let mut app = start_app(&cli, &config, html_errors)?;

    match cli.command {
        Command::View { font_input, format } => {
            app.set_font_input(&font_input);
            println!("{}", app.meta().title);
            println!("{}", app.location());
            print_view(&app.view(), format)?;
        }
        Command::Search { query, format } => {
            app.search_now(&query);
            print_view(&app.view(), format)?;
        }
        Command::Fonts { text, font } => {
            app.switch_tab(Tab::Fonts);
            app.set_font_input(&text);
            if let View::Fonts { rows, .. } = app.view() {
                let rows: Vec<_> = rows
                    .into_iter()
                    .filter(|r| font.as_deref().is_none_or(|f| r.font.name == f))
                    .collect();
                if rows.is_empty() {
                    anyhow::bail!("No font named {:?}", font.unwrap_or_default());
                }
                for r in rows {
                    println!("{}\t{}", r.text, r.font.name);
                }
            }
        }
        Command::Categories { tab } => {
            if let Some(tab) = tab {
                app.switch_tab(tab);
            }
            for c in app.categories() {
                println!("{}\t{}", c.name, c.count);
            }
        }
        Command::Copy { text, tab } => {
            if let Some(tab) = tab {
                app.switch_tab(tab);
            }
            let mut clipboard = ClipboardChain::system();
            let outcome = app
                .copy(&text, &mut clipboard, Instant::now())
                .context("Copy failed, please copy the text manually")?;
            println!("Copied with {}", outcome.mechanism);
            if let Some(entry) = outcome.pushed {
                println!("{}", entry.url);
            }
        }
        Command::Snapshot { out } => {
            let snapshot = CatalogSnapshot {
                catalog: app.catalog().clone(),
            };
            snapshot
                .save_to_binary(out.as_std_path())
                .with_context(|| format!("Failed to write snapshot {}", out))?;
            println!("Wrote {} entries to {}", app.catalog().len(), out);
        }
        Command::CachePolicy => {}
    }
    Ok(())
}

fn start_location(cli: &Cli, config: &AppConfig) -> Result<Url> {
    let base = config.base_url()?;
    match &cli.url {
        Some(u) => base.join(u).with_context(|| format!("Invalid --url {}", u)),
        None => Ok(base),
    }
}

fn start_app(cli: &Cli, config: &AppConfig, html_errors: bool) -> Result<App> {
    let location = start_location(cli, config)?;
    if let Some(path) = &cli.snapshot {
        let snapshot = CatalogSnapshot::load_from_binary(path.as_std_path())
            .with_context(|| format!("Failed to load snapshot {}", path))?;
        let mut app = App::new(snapshot.catalog, config, location);
        app.init_from_url();
        return Ok(app);
    }
    let started = if is_zip(&cli.assets) {
        let file = std::fs::File::open(&cli.assets)
            .with_context(|| format!("Open {}", cli.assets))?;
        let mut source = ZipSource::new(std::io::BufReader::new(file))?.with_root(&cli.zip_root);
        App::start(&mut source, config, location)
    } else {
        App::start(&mut FsSource::new(&cli.assets), config, location)
    };
    started.map_err(|err| {
        if html_errors {
            println!("{}", render::load_failure(&err));
        }
        anyhow::Error::new(err).context("Failed to load the catalog; retry once every data source is reachable")
    })
}

fn is_zip(path: &Utf8Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

fn print_view(view: &View<'_>, format: Format) -> Result<()> {
    match format {
        Format::Text => print!("{}", render::text(view)),
        Format::Html => println!("{}", render::html(view)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&render::json(view))?),
    }
    Ok(())
}
