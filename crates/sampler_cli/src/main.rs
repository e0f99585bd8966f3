//! `route-sampler`: print evenly spaced points along a driving route.
//!
//! ```text
//! route-sampler --origin 26.8323,80.9214 --destination 26.8426,80.9228 --frequency 0.05
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::debug;
use sampler_core::config::SamplerConfig;
use sampler_core::routing::{build_route_fetcher, RouteProviderKind};
use sampler_core::{GeoPoint, PathService};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "route-sampler",
    about = "Resample a driving route into points spaced a fixed distance apart",
    long_about = "Fetches the driving route between two \"lat,lon\" coordinates from a\n\
                  directions provider and prints one \"lat,lon\" line per resampled point."
)]
struct Cli {
    /// Start of the route as "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    origin: String,
    /// End of the route as "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    destination: String,
    /// Target spacing between points, in kilometres
    #[arg(long)]
    frequency: Option<f64>,
    /// Accept original vertices within this many kilometres of the spacing
    #[arg(long)]
    tolerance: Option<f64>,
    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directions provider
    #[arg(value_enum, long)]
    provider: Option<Provider>,
    /// Provider base URL
    #[arg(long)]
    endpoint: Option<String>,
    /// Google Directions API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Output format
    #[arg(value_enum, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Provider {
    #[cfg(feature = "osrm")]
    Osrm,
    #[cfg(feature = "google")]
    Google,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One "lat,lon" line per point
    Text,
    /// JSON array of {"lat", "lon"} objects
    Json,
}

// ── helpers ────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> Result<SamplerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!("loading config from {}", path.display());
            SamplerConfig::from_file(path)?
        }
        None => SamplerConfig::default(),
    };

    if let Some(frequency) = cli.frequency {
        config.frequency_km = frequency;
    }
    if let Some(tolerance) = cli.tolerance {
        config.tolerance_km = tolerance;
    }
    if let Some(provider) = cli.provider {
        config.provider = provider_kind(provider, cli)?;
    } else if let Some(endpoint) = &cli.endpoint {
        override_endpoint(&mut config.provider, endpoint);
    }
    apply_api_key(&mut config.provider, cli.api_key.as_deref());

    config.validate()?;
    Ok(config)
}

fn provider_kind(
    provider: Provider,
    cli: &Cli,
) -> Result<RouteProviderKind, Box<dyn std::error::Error>> {
    match provider {
        #[cfg(feature = "osrm")]
        Provider::Osrm => Ok(RouteProviderKind::Osrm {
            endpoint: cli
                .endpoint
                .clone()
                .unwrap_or_else(|| sampler_core::routing::osrm::DEFAULT_ENDPOINT.to_string()),
        }),
        #[cfg(feature = "google")]
        Provider::Google => {
            let api_key = cli
                .api_key
                .clone()
                .ok_or("the google provider needs --api-key or GOOGLE_MAPS_API_KEY")?;
            Ok(RouteProviderKind::Google {
                api_key,
                endpoint: cli
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| sampler_core::routing::google::DEFAULT_ENDPOINT.to_string()),
            })
        }
    }
}

fn override_endpoint(kind: &mut RouteProviderKind, new_endpoint: &str) {
    match kind {
        #[cfg(feature = "osrm")]
        RouteProviderKind::Osrm { endpoint } => *endpoint = new_endpoint.to_string(),
        #[cfg(feature = "google")]
        RouteProviderKind::Google { endpoint, .. } => *endpoint = new_endpoint.to_string(),
        RouteProviderKind::Static { .. } => {
            log::warn!("--endpoint ignored for the static provider");
        }
    }
}

fn apply_api_key(kind: &mut RouteProviderKind, key: Option<&str>) {
    match (kind, key) {
        #[cfg(feature = "google")]
        (RouteProviderKind::Google { api_key, .. }, Some(key)) => *api_key = key.to_string(),
        _ => {}
    }
}

fn render(points: &[GeoPoint], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(points
            .iter()
            .map(|point| format!("{point}\n"))
            .collect()),
        OutputFormat::Json => serde_json::to_string_pretty(points).map(|json| json + "\n"),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli)?;
    let fetcher = build_route_fetcher(&config.provider, &config.route_settings())?;
    let service = PathService::new(fetcher, config.sampling_options());

    let points = service.form_path(&cli.origin, &cli.destination)?;
    debug!("{} points", points.len());
    print!("{}", render(&points, cli.format)?);
    Ok(())
}

// ── main ───────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("route-sampler").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--origin",
            "-33.86,151.20",
            "--destination",
            "-33.87,151.21",
            "--frequency",
            "0.1",
            "--tolerance",
            "0.01",
        ]);
        let config = load_config(&cli).expect("config");
        assert_eq!(config.frequency_km, 0.1);
        assert_eq!(config.tolerance_km, 0.01);
        assert_eq!(cli.origin, "-33.86,151.20");
    }

    #[test]
    fn rejects_non_positive_frequency() {
        let cli = parse(&["--origin", "0,0", "--destination", "0,1", "--frequency", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[cfg(feature = "osrm")]
    #[test]
    fn endpoint_flag_updates_default_provider() {
        let cli = parse(&[
            "--origin",
            "0,0",
            "--destination",
            "0,1",
            "--endpoint",
            "http://localhost:5000",
        ]);
        let config = load_config(&cli).expect("config");
        assert_eq!(
            config.provider,
            RouteProviderKind::Osrm {
                endpoint: "http://localhost:5000".to_string()
            }
        );
    }

    #[test]
    fn text_output_is_one_line_per_point() {
        let points = [GeoPoint::new(26.8323, 80.9214), GeoPoint::new(26.8426, 80.9228)];
        assert_eq!(
            render(&points, OutputFormat::Text).unwrap(),
            "26.8323,80.9214\n26.8426,80.9228\n"
        );
    }

    #[test]
    fn json_output_is_an_array_of_points() {
        let points = [GeoPoint::new(1.5, 2.5)];
        let json = render(&points, OutputFormat::Json).unwrap();
        let parsed: Vec<GeoPoint> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, points);
    }
}
