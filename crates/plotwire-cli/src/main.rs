mod script;

use plotwire::Figure;
use plotwire_render::{
    ImageFormat, OutputFormat, RenderError, SaveOptions, Session, SessionConfig, html,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Build(plotwire::Error),
    Render(RenderError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Build(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<plotwire::Error> for CliError {
    fn from(value: plotwire::Error) -> Self {
        Self::Build(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    format: Option<OutputFormat>,
    out: Option<String>,
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    config: Option<String>,
}

fn usage() -> &'static str {
    "plotwire-cli\n\
\n\
USAGE:\n\
  plotwire-cli [--format html|png|jpeg] [--out <path>] [--title <title>] [--width <w>] [--height <h>] [--config <session.json>] [<script.json>|-]\n\
\n\
NOTES:\n\
  - If <script.json> is omitted or '-', the script is read from stdin.\n\
  - The script is a JSON array of operations, e.g. [{\"op\": \"bar\", \"values\": [1, 2]}].\n\
  - Without --format the format is inferred from --out (.html/.htm, .png, .jpg/.jpeg), else html.\n\
  - html is printed to stdout unless --out is given; images default to the script path with the image extension\n\
    (./out.png or ./out.jpeg for stdin).\n\
  - Images need node + playwright; PLOTWIRE_BROWSER_LAUNCHER overrides the launcher command.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = Some(
                    fmt.parse::<OutputFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = Some(w.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = Some(h.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
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

fn default_image_out_path(input: Option<&str>, format: ImageFormat) -> PathBuf {
    match input {
        None | Some("-") => PathBuf::from(format!("out.{}", format.as_str())),
        Some(path) => Path::new(path).with_extension(format.as_str()),
    }
}

fn load_config(path: Option<&str>) -> Result<SessionConfig, CliError> {
    match path {
        None => Ok(SessionConfig::from_env()),
        Some(path) => Ok(SessionConfig::from_json(&std::fs::read_to_string(path)?)?),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let ops = script::parse(&text)?;
    let mut fig = Figure::new();
    script::replay(&mut fig, ops)?;

    let config = load_config(args.config.as_deref())?;
    let format = match (args.format, args.out.as_deref()) {
        (Some(format), _) => format,
        (None, Some(out)) => OutputFormat::from_path(Path::new(out))?,
        (None, None) => OutputFormat::Html,
    };

    let out = match (format, args.out) {
        (OutputFormat::Html, None) => {
            let id = uuid::Uuid::new_v4().to_string();
            let page = html::standalone(
                &fig.document(),
                args.title.as_deref().unwrap_or(html::DEFAULT_TITLE),
                &config.library_src,
                &id,
            )?;
            std::io::stdout().lock().write_all(page.as_bytes())?;
            return Ok(());
        }
        (OutputFormat::Html, Some(out)) => PathBuf::from(out),
        (OutputFormat::Image(_), Some(out)) => PathBuf::from(out),
        (OutputFormat::Image(image), None) => default_image_out_path(args.input.as_deref(), image),
    };

    let defaults = SaveOptions::default();
    let options = SaveOptions {
        format: Some(format),
        title: args.title,
        width: args.width.or(defaults.width),
        height: args.height.or(defaults.height),
        element_id: None,
    };
    let session = Session::new(config);
    session.save(&fig, &out, &options)?;
    session.shutdown()?;
    Ok(())
}

fn main() {
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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
