use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Template designer canvas with in-place text box editing.
///
/// Examples:
///   canvas-textbox
///   canvas-textbox --config editor.toml
///   canvas-textbox --log gfx=debug,info
#[derive(Parser, Debug)]
#[clap(name = "canvas-textbox", version)]
struct Cli {
    /// Editor settings (TOML). A missing file falls back to the defaults.
    #[clap(long = "config", short = 'c')]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `gfx=trace,info`. Overrides `RUST_LOG`.
    #[clap(long = "log")]
    log: Option<String>,
}

fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|err| {
            eprintln!("invalid --log filter {d:?}: {err}");
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    let config = match &cli.config {
        Some(path) => {
            let loaded = platform::load_from_path(path)
                .with_context(|| format!("loading editor config from {}", path.display()))?;
            if loaded.is_none() {
                log::info!("{} not found, using default editor settings", path.display());
            }
            loaded.unwrap_or_default()
        }
        None => Default::default(),
    };
    log::debug!("editor config: {config:?}");

    platform::run("Template designer", move |ctx| {
        Box::new(platform::DesignerApp::new(ctx, config))
    })?;
    Ok(())
}
