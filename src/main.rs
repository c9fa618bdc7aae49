use clap::{Parser, Subcommand};
use simple_folio::prefs::FilePreferenceStore;
use simple_folio::theme::{EnvAmbientSignal, Theme, ThemeStore};
use simple_folio::view::{Message, ProfileView};
use simple_folio::{config, content, generate, logging, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static site generator for single-page personal profiles")]
#[command(long_about = "\
Static site generator for single-page personal profiles

One content file describes you; the build writes one self-contained page
with a light/dark toggle and detail dialogs.

Content structure:

  content/
  ├── content.toml     # Profile, experience, skills, projects, ... (required)
  ├── config.toml      # Site config: colors, theme key, placeholder (optional)
  └── assets/          # Copied to the output root (photo, resume, icons)

Theme preference (first available wins):
  Saved value (--state file) → SIMPLE_FOLIO_COLOR_SCHEME / COLORFGBG → light

The CLI theme is written into the page as its initial data-theme. In the
browser, the visitor's own choice (localStorage) or OS color scheme replaces
it before first paint, so the built theme only shows without JavaScript.

Run 'simple-folio gen-content' for a starter content.toml and
'simple-folio gen-config' for a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// File holding the saved theme preference
    #[arg(long, default_value = ".simple-folio/preferences.json", global = true)]
    state: PathBuf,

    /// Log state transitions and fallbacks to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page into the output directory
    Build,
    /// Validate content and config without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a starter content.toml
    GenContent,
    /// Show or change the saved theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Replay UI events against the view and print the resulting state
    Snapshot {
        /// Event to dispatch, in order (e.g. toggle-theme, open:project:0, close)
        #[arg(long = "event", value_name = "EVENT")]
        events: Vec<Message>,
        /// Also render the resulting page into this directory. The replayed
        /// theme is the page's no-JS default; browsers re-resolve it on load.
        #[arg(long)]
        render: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme and where it came from
    Show,
    /// Flip between light and dark
    Toggle,
    /// Save an explicit theme
    Set { theme: Theme },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let profile = content::load_content(&cli.source)?;
            let store = open_theme_store(&cli.state, &site_config);
            let view = ProfileView::new(profile, store);

            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&view, &site_config, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let profile = content::load_content(&cli.source)?;
            output::print_check_output(&profile, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", content::stock_content_toml());
        }
        Command::Theme { action } => {
            let site_config = config::load_config(&cli.source)?;
            let mut store = open_theme_store(&cli.state, &site_config);
            match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    store.toggle();
                }
                ThemeAction::Set { theme } => store.set(theme),
            }
            output::print_theme_status(store.get(), store.origin(), &cli.state);
        }
        Command::Snapshot { events, render } => {
            let site_config = config::load_config(&cli.source)?;
            let profile = content::load_content(&cli.source)?;
            let store = snapshot_theme_store(&cli.state, &site_config);
            let mut view = ProfileView::new(profile, store);
            for event in events {
                view.dispatch(event);
            }
            output::print_view_state(&view);
            if let Some(dir) = render {
                let report = generate::generate(&view, &site_config, &cli.source, &dir)?;
                output::print_generate_output(&report);
            }
        }
    }

    Ok(())
}

/// Theme store backed by the `--state` file.
fn open_theme_store(state: &Path, site_config: &config::SiteConfig) -> ThemeStore {
    ThemeStore::init(
        Box::new(FilePreferenceStore::new(state)),
        site_config.theme.storage_key.as_str(),
        &EnvAmbientSignal,
    )
}

/// Theme store seeded from the `--state` file but never writing to it.
fn snapshot_theme_store(state: &Path, site_config: &config::SiteConfig) -> ThemeStore {
    ThemeStore::detached(
        &FilePreferenceStore::new(state),
        site_config.theme.storage_key.as_str(),
        &EnvAmbientSignal,
    )
}
