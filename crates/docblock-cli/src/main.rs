use anyhow::{Context, Result, anyhow};
use docblock_config::{Config, RenderSettings};
use docblock_engine::{
    AsciidocConverter, HtmlPolicy, MarkdownConverter, MarkdownOptions, MarkupBlock, MarkupKind,
    RawHtml, Renderer,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "\
Usage:
  docblock render <file> [--kind adoc|md] [--config <path>]
  docblock tailwind [output] [--config <path>]
  docblock scan [root] [--config <path>]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Render {
        file: PathBuf,
        kind: Option<MarkupKind>,
    },
    Tailwind {
        output: Option<PathBuf>,
    },
    Scan {
        root: PathBuf,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct Cli {
    command: Command,
    config_path: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut positional = Vec::new();
    let mut kind = None;
    let mut config_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--kind" => {
                let value = iter.next().ok_or_else(|| anyhow!("--kind needs a value"))?;
                kind = Some(value.parse::<MarkupKind>()?);
            }
            "--config" => {
                let value = iter.next().ok_or_else(|| anyhow!("--config needs a value"))?;
                config_path = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => return Err(anyhow!("Unknown option {flag}")),
            _ => positional.push(arg.as_str()),
        }
    }

    let command = match positional.as_slice() {
        ["render", file] => Command::Render {
            file: PathBuf::from(file),
            kind,
        },
        ["tailwind"] => Command::Tailwind { output: None },
        ["tailwind", output] => Command::Tailwind {
            output: Some(PathBuf::from(output)),
        },
        ["scan"] => Command::Scan {
            root: PathBuf::from("."),
        },
        ["scan", root] => Command::Scan {
            root: PathBuf::from(root),
        },
        _ => return Err(anyhow!("Invalid arguments")),
    };
    if kind.is_some() && !matches!(command, Command::Render { .. }) {
        return Err(anyhow!("--kind only applies to render"));
    }

    Ok(Cli {
        command,
        config_path,
    })
}

/// AsciiDoc has no raw HTML switch of its own, so turning raw HTML off
/// sanitizes its output instead.
fn html_policy(settings: &RenderSettings, kind: MarkupKind) -> HtmlPolicy {
    if settings.sanitize || (!settings.raw_html && kind == MarkupKind::AsciiDoc) {
        HtmlPolicy::sanitized()
    } else {
        HtmlPolicy::Trusted
    }
}

fn render_file(file: &Path, kind: Option<MarkupKind>, settings: &RenderSettings) -> Result<()> {
    let kind = kind
        .or_else(|| MarkupKind::from_path(file))
        .ok_or_else(|| anyhow!("Cannot tell markup kind of {}; pass --kind", file.display()))?;
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // Converters are built once here and lent to the renderer.
    let raw_html = if settings.raw_html {
        RawHtml::Allow
    } else {
        RawHtml::Escape
    };
    let asciidoc = AsciidocConverter::new();
    let markdown = MarkdownConverter::new(MarkdownOptions {
        gfm: settings.gfm,
        raw_html,
    });
    let renderer = Renderer::new(&asciidoc, &markdown, html_policy(settings, kind));

    let mut block = MarkupBlock::new(kind, source);
    renderer
        .render(&mut block)
        .with_context(|| format!("Failed to render {}", file.display()))?;
    println!("{}", block.content());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config_path.as_deref())?;
    log::debug!("Render settings: {:?}", config.render);

    match cli.command {
        Command::Render { file, kind } => render_file(&file, kind, &config.render),
        Command::Tailwind { output } => {
            let js = config.theme.to_tailwind_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, js)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => print!("{js}"),
            }
            Ok(())
        }
        Command::Scan { root } => {
            let files = config.theme.content_files(&root)?;
            log::info!("{} content files under {}", files.len(), root.display());
            for file in files {
                println!("{}", file.display());
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
