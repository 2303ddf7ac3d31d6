use anyhow::{Context, Result, bail};
use clap::Parser;
use markdown_attrs_config::Config;
use markdown_attrs_engine::attributes::{BlockAttributes, MergeDirection, Options};
use markdown_attrs_engine::{Markdown, NodeKind};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Converts Markdown to HTML, attaching `{#id .class key=value}` lines to
/// the adjacent block.
#[derive(Parser, Debug)]
#[command(name = "markdown-attrs", version, about, long_about = None)]
struct Args {
    /// Markdown file to convert (stdin when omitted)
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/markdown-attrs/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the document tree instead of HTML
    #[arg(long)]
    dump: bool,

    /// Which block an attribute line annotates: `next` or `previous`
    #[arg(long)]
    direction: Option<MergeDirection>,

    /// Block kinds that may receive attributes, e.g. `paragraph,heading`
    #[arg(long, value_delimiter = ',')]
    kinds: Option<Vec<NodeKind>>,

    /// Convert plain Markdown without the attributes extension
    #[arg(long, conflicts_with_all = ["direction", "kinds"])]
    no_attributes: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let source = read_input(args.file.as_deref())?;
    let output = convert(&args, &source)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    stdout.flush()?;
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Options from the config file, overridden by command-line flags.
fn resolve_options(args: &Args) -> Result<Options> {
    let config = match &args.config {
        Some(path) => {
            let path = Config::expand_path(path);
            match Config::load_from_path(&path)? {
                Some(config) => config,
                None => bail!("Config file not found: {}", path.display()),
            }
        }
        None => Config::load()?.unwrap_or_default(),
    };

    let mut options = config.attributes;
    if let Some(direction) = args.direction {
        options.direction = direction;
    }
    if let Some(kinds) = &args.kinds {
        options.eligible_kinds = Some(kinds.clone());
    }
    Ok(options)
}

fn convert(args: &Args, source: &str) -> Result<String> {
    let mut md = Markdown::new();
    if args.no_attributes {
        log::info!("block attributes off");
    } else {
        let options = resolve_options(args)?;
        log::info!(
            "block attributes: direction {}, on conflict {}",
            options.direction,
            options.on_conflict
        );
        md = md.with_extension(BlockAttributes::new(options));
    }

    let parsed = md.parse(source);
    for (name, count) in parsed.context.counters() {
        log::debug!("{name}: {count}");
    }

    Ok(if args.dump {
        parsed.dump()
    } else {
        md.render(&parsed)
    })
}
