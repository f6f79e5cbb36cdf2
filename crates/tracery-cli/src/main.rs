use serde::Serialize;
use std::io::Read;
use tracery::render::{OverlayLayout, ResolvedGeometry};
use tracery::{HeadlessError, HeadlessRenderer};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Tracery(HeadlessError),
    Json(serde_json::Error),
    Unresolved(Vec<String>),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Tracery(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Unresolved(sections) => {
                write!(f, "Unresolved sections: {}", sections.join(", "))
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Tracery(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Resolve,
    #[default]
    Paths,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    registry: Option<String>,
    overlay_id: Option<String>,
    pretty: bool,
    require_all: bool,
    out: Option<String>,
}

#[derive(Serialize)]
struct ResolveOut<'a> {
    overlay_visible: bool,
    geometries: &'a [ResolvedGeometry],
}

fn usage() -> &'static str {
    "tracery-cli\n\
\n\
USAGE:\n\
  tracery-cli resolve [--config <json>] [--registry <json>] [--pretty] [<snapshot>|-]\n\
  tracery-cli [paths] [--config <json>] [--registry <json>] [--pretty] [--require-all] [<snapshot>|-]\n\
  tracery-cli render [--config <json>] [--registry <json>] [--id <overlay-id>] [--require-all] [--out <path>] [<snapshot>|-]\n\
\n\
NOTES:\n\
  - <snapshot> is a JSON layout snapshot (viewport, document size, element boxes).\n\
  - If <snapshot> is omitted or '-', input is read from stdin.\n\
  - resolve prints the per-connection geometry; paths prints the overlay layout as JSON.\n\
  - render prints the SVG overlay to stdout by default; use --out to write a file.\n\
  - --id is only accepted by render.\n\
  - --require-all exits with status 3 when any section could not be resolved.\n\
  - Set RUST_LOG (e.g. RUST_LOG=tracery_render=debug) to see skipped sections.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "resolve" => args.command = Command::Resolve,
            "paths" => args.command = Command::Paths,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--require-all" => args.require_all = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--registry" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.registry = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !id.trim().is_empty() {
                    args.overlay_id = Some(id.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    // The overlay id only names the SVG element.
    if args.overlay_id.is_some() && !matches!(args.command, Command::Render) {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_renderer(args: &Args) -> Result<HeadlessRenderer, CliError> {
    let mut renderer = HeadlessRenderer::new();
    if let Some(path) = args.config.as_deref() {
        renderer = renderer.with_config_json(&std::fs::read_to_string(path)?)?;
    }
    if let Some(path) = args.registry.as_deref() {
        renderer = renderer.with_registry_json(&std::fs::read_to_string(path)?)?;
    }
    renderer.svg.overlay_id = args.overlay_id.clone();
    Ok(renderer)
}

fn check_resolved(overlay: &OverlayLayout, require_all: bool) -> Result<(), CliError> {
    if require_all && !overlay.skipped.is_empty() {
        return Err(CliError::Unresolved(overlay.skipped.clone()));
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let renderer = build_renderer(&args)?;
    let text = read_input(args.input.as_deref())?;
    let snapshot = tracery::DocumentSnapshot::from_json_str(&text).map_err(HeadlessError::from)?;
    tracing::debug!(
        elements = snapshot.elements.len(),
        viewport_width = snapshot.viewport.width,
        "snapshot loaded"
    );

    match args.command {
        Command::Resolve => {
            let geometries = renderer.resolve(&snapshot);
            let out = ResolveOut {
                overlay_visible: tracery::render::overlay_enabled(&snapshot, &renderer.config),
                geometries: &geometries,
            };
            write_json(&out, args.pretty, args.out.as_deref())
        }
        Command::Paths => {
            let overlay = renderer.layout(&snapshot);
            check_resolved(&overlay, args.require_all)?;
            write_json(&overlay, args.pretty, args.out.as_deref())
        }
        Command::Render => {
            let overlay = renderer.layout(&snapshot);
            check_resolved(&overlay, args.require_all)?;
            let svg =
                tracery::render::svg::render_overlay_svg(&overlay, &renderer.config, &renderer.svg);
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Unresolved(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
