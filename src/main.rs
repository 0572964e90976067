use clap::{Parser, Subcommand};
use photo_folio::config::{self, SiteConfig};
use photo_folio::output;
use photo_folio::scan::PhotoStore;
use photo_folio::server::{self, AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "photo_folio=info,tower_http=info";

#[derive(Parser)]
#[command(name = "photo-folio")]
#[command(about = "Photo portfolio web server")]
#[command(long_about = "\
Photo portfolio web server

Your filesystem is the data source. Images in the variant directories become
the galleries, and the filename prefix picks the category.

Site structure:

  ./
  ├── config.toml                  # Site config (optional)
  ├── about.md                     # About page body (optional)
  └── static/
      ├── desktop/                 # Portfolio grid, detail pages
      │   ├── Supercars-001-red.jpg
      │   ├── classic_002.png
      │   └── studio_about_me.jpg  # Tagged about_me: hidden from listings
      └── mobile/                  # Landing carousel
          └── sports-lap.webp

Categories (prefix followed by '-' or '_', any case):
  supercars, classic, sports, studio; anything else is 'all'

Environment:
  ACCESS_KEY             Contact form service key
  FOLIO_ENV=development  Enable development mode (/debug)
  RUST_LOG               Log filter (default: photo_folio=info,tower_http=info)

Run 'photo-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root holding config.toml and about.md
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Photo root, overriding static_dir from config.toml
    #[arg(long, global = true)]
    static_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Listen address, overriding bind from config.toml
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// Enable development mode
        #[arg(long)]
        dev: bool,
    },
    /// List what the site would show, per variant
    Scan {
        /// List about-me photos too
        #[arg(long)]
        include_about: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, dev } => {
            let mut site_config = resolve_config(&cli.root, cli.static_dir.as_deref())?;
            if let Some(bind) = bind {
                site_config.bind = bind.to_string();
            }
            if dev {
                site_config.development = true;
            }
            site_config.validate()?;
            init_tracing(site_config.development);

            let state = AppState::load(site_config, &cli.root)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(state))?;
        }
        Command::Scan { include_about } => {
            let site_config = resolve_config(&cli.root, cli.static_dir.as_deref())?;
            init_tracing(site_config.development);
            let store = PhotoStore::new(&site_config.static_dir);
            let reports = output::build_report(&store, include_about);
            output::print_scan_output(&reports);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Config file, then environment, then `--static-dir`. A relative photo root
/// is taken relative to the site root.
fn resolve_config(root: &Path, static_dir: Option<&Path>) -> Result<SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(root)?;
    site_config.apply_process_env();
    let photos = match static_dir {
        Some(dir) => dir.to_path_buf(),
        None => root.join(&site_config.static_dir),
    };
    site_config.static_dir = photos.to_string_lossy().into_owned();
    Ok(site_config)
}

/// `RUST_LOG` wins over the default filter. Development mode gets the
/// multi-line pretty format.
fn init_tracing(development: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if development {
        builder.pretty().init();
    } else {
        builder.compact().init();
    }
}
