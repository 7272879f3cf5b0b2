use futures::executor::block_on;
use serde::Serialize;
use std::io::Read;
use wayfarer::view::MapSession;
use wayfarer::{ActivityKey, DayFilter, MapConfig, Selection, ValidationIssue};
use wayfarer_view::mercator::pixel_size;
use wayfarer_view::model::CameraSpec;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Model(wayfarer::Error),
    Json(serde_json::Error),
    InvalidItinerary,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Model(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::InvalidItinerary => write!(f, "Itinerary failed validation"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<wayfarer::Error> for CliError {
    fn from(value: wayfarer::Error) -> Self {
        Self::Model(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Scene,
    Camera,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    day: Option<u32>,
    focus: Option<ActivityKey>,
    viewport_width: Option<f64>,
    viewport_height: Option<f64>,
    detail_zoom: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedOut {
    center: wayfarer::GeoPoint,
    zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CameraOut {
    spec: Option<CameraSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<ResolvedOut>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateOut {
    issues: Vec<ValidationIssue>,
}

fn usage() -> &'static str {
    "wayfarer-cli\n\
\n\
USAGE:\n\
  wayfarer-cli [scene] [--pretty] [--day <n>] [--focus <name>@<time>] [<path>|-]\n\
  wayfarer-cli camera [--pretty] [--day <n>] [--focus <name>@<time>] [--viewport-width <w>] [--viewport-height <h>] [--detail-zoom <z>] [<path>|-]\n\
  wayfarer-cli validate [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the itinerary JSON is read from stdin.\n\
  - scene prints the marker/route draw model for the selection.\n\
  - camera prints the camera spec; with a viewport size it also prints the\n\
    resolved center/zoom. A null spec means nothing is visible.\n\
  - validate exits 3 when the itinerary has validation issues.\n\
"
}

fn parse_focus(raw: &str) -> Result<ActivityKey, CliError> {
    // `<name>@<time>`; the name may itself contain '@', so split on the last.
    let Some(at) = raw.rfind('@') else {
        return Err(CliError::Usage(usage()));
    };
    let (name, time) = raw.split_at(at);
    if name.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    Ok(ActivityKey {
        activity_name: name.to_string(),
        time: time[1..].to_string(),
    })
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "scene" => args.command = Command::Scene,
            "camera" => args.command = Command::Camera,
            "validate" => args.command = Command::Validate,
            "--pretty" => args.pretty = true,
            "--day" => {
                let Some(day) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.day = Some(day.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--focus" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some(parse_focus(raw)?);
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width =
                    Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--viewport-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height =
                    Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--detail-zoom" => {
                let Some(z) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.detail_zoom =
                    Some(z.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
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

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    let mut session = MapSession::new();
    if let Some(zoom) = args.detail_zoom {
        let mut cfg = MapConfig::empty_object();
        cfg.set_value("viewport.detailZoom", serde_json::json!(zoom));
        session = session.with_site_config(cfg);
    }

    let itinerary = block_on(session.planner.parse_itinerary(&text))?;
    let selection = Selection {
        day_filter: args.day.map(DayFilter::Day).unwrap_or(DayFilter::All),
        focus: args.focus.clone(),
    };

    match args.command {
        Command::Scene => {
            let scene = block_on(session.scene(&itinerary, &selection));
            write_json(&scene, args.pretty)?;
            Ok(())
        }
        Command::Camera => {
            let spec = block_on(session.camera(&itinerary, &selection));
            let resolved = match (&spec, args.viewport_width, args.viewport_height) {
                (Some(_), Some(w), Some(h)) => session
                    .resolved_camera_sync(&itinerary, &selection, pixel_size(w, h))
                    .map(|(center, zoom)| ResolvedOut { center, zoom }),
                _ => None,
            };
            write_json(&CameraOut { spec, resolved }, args.pretty)?;
            Ok(())
        }
        Command::Validate => {
            let issues = session.planner.validate(&itinerary);
            let failed = !issues.is_empty();
            write_json(&ValidateOut { issues }, args.pretty)?;
            if failed {
                return Err(CliError::InvalidItinerary);
            }
            Ok(())
        }
    }
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

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(CliError::InvalidItinerary) => {
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_parsing_splits_on_the_last_at() {
        let key = parse_focus("Dinner @ Le Jules Verne@19:30").unwrap();
        assert_eq!(key.activity_name, "Dinner @ Le Jules Verne");
        assert_eq!(key.time, "19:30");
        assert!(parse_focus("no-time-part").is_err());
        assert!(parse_focus("@09:00").is_err());
    }

    #[test]
    fn args_accept_command_flags_and_path() {
        let argv: Vec<String> = ["wayfarer-cli", "camera", "--pretty", "--day", "2", "trip.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let args = parse_args(&argv).unwrap();
        assert!(matches!(args.command, Command::Camera));
        assert!(args.pretty);
        assert_eq!(args.day, Some(2));
        assert_eq!(args.input.as_deref(), Some("trip.json"));
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        let argv: Vec<String> = ["wayfarer-cli", "--nope"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(matches!(parse_args(&argv), Err(CliError::Usage(_))));
    }
}
