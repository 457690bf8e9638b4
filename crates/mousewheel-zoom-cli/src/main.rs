use anyhow::{Context, Result, bail};
use mousewheel_zoom_config::Config;
use mousewheel_zoom_engine::{ImageElement, ImageZoom, ScrollDirection, Vault, ZoomOutcome, io};
use relative_path::RelativePathBuf;
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "<document> <image-src> <in|out> [--natural-width N] [--filesource PATH]";

/// One zoom request, as given on the command line.
struct Request {
    document: PathBuf,
    element: ImageElement,
    direction: ScrollDirection,
}

fn parse_args(args: &[String]) -> Result<Request> {
    let [document, src, direction, flags @ ..] = args else {
        bail!("expected a document, an image source and a direction");
    };

    let direction = match direction.as_str() {
        "in" => ScrollDirection::ZoomIn,
        "out" => ScrollDirection::ZoomOut,
        other => bail!("direction must be 'in' or 'out', got '{other}'"),
    };

    let mut element = ImageElement::new(src.as_str());
    let mut flags = flags.iter();
    while let Some(flag) = flags.next() {
        let value = flags
            .next()
            .with_context(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--natural-width" => {
                let width = value
                    .parse()
                    .with_context(|| format!("invalid natural width '{value}'"))?;
                element = element.with_natural_width(width);
            }
            "--filesource" => {
                element = element
                    .with_class("excalidraw-svg")
                    .with_filesource(value.as_str());
            }
            other => bail!("unknown option '{other}'"),
        }
    }

    Ok(Request {
        document: PathBuf::from(document),
        element,
        direction,
    })
}

/// Express `document` relative to the notes root.
fn relative_document(document: &Path, notes_root: &Path) -> Result<RelativePathBuf> {
    let relative = if document.is_absolute() {
        let outside = || format!("{} is outside {}", document.display(), notes_root.display());
        document.strip_prefix(notes_root).with_context(outside)?
    } else {
        document
    };
    RelativePathBuf::from_path(relative)
        .with_context(|| format!("invalid document path {}", relative.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("mousewheel-zoom-cli", String::as_str);

    let request = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(1);
        }
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let notes_root = match config.notes_path {
        Some(path) => path,
        None => env::current_dir()?,
    };
    if let Err(e) = io::validate_notes_dir(&notes_root) {
        eprintln!(
            "Error: Notes path '{}' is invalid: {e}",
            notes_root.display()
        );
        process::exit(1);
    }
    log::debug!("Notes root: {}", notes_root.display());

    let document = relative_document(&request.document, &notes_root)?;
    let vault = Vault::new(notes_root).with_active_document(document);
    let mut zoom = ImageZoom::new(config.zoom, vault);

    match zoom.zoom_image(&request.element, request.direction) {
        Ok(ZoomOutcome::Resized { document, size }) => {
            println!("{document}: {} -> {size}px", request.element.src);
        }
        Ok(outcome) => {
            println!("{}: {outcome:?}", request.element.src);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    Ok(())
}
