use clap::Parser;
use fire_map_core::{
    cyprus, geojson, CyprusMap, Hours, LatLng, SpreadModel, SpreadProfile,
};

/// Headless fire-spread demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "fire-map-demo")]
#[command(about = "Cyprus fire-risk map demo", long_about = None)]
struct Args {
    /// Elapsed time in hours
    #[arg(short = 't', long, default_value_t = 10.0)]
    hours: f64,

    /// Ignition latitude in decimal degrees (default: Limassol hinterland)
    #[arg(long)]
    origin_lat: Option<f64>,

    /// Ignition longitude in decimal degrees
    #[arg(long)]
    origin_lng: Option<f64>,

    /// Output format (text, geojson)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Sweep the timeline from 0 to --hours instead of a single snapshot
    #[arg(long)]
    timeline: bool,

    /// Timeline step in hours
    #[arg(long, default_value_t = 4.0)]
    step: f64,

    /// Include the static dataset groups in geojson output
    #[arg(long)]
    full_map: bool,
}

fn main() {
    let args = Args::parse();

    let origin = match (args.origin_lat, args.origin_lng) {
        (Some(lat), Some(lng)) => match LatLng::try_new(lat, lng) {
            Ok(origin) => origin,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        (None, None) => cyprus::fire_origin(),
        _ => {
            eprintln!("error: --origin-lat and --origin-lng must be given together");
            std::process::exit(1);
        }
    };

    let mut map =
        CyprusMap::with_spread_model(SpreadModel::new(origin, SpreadProfile::limassol()));

    if args.timeline {
        run_timeline(&map, args.hours, args.step);
        return;
    }

    if let Err(err) = map.set_fire_hours(args.hours) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    match args.format.as_str() {
        "geojson" => print_geojson(&map, args.full_map),
        "text" => print_snapshot(&map),
        other => {
            eprintln!("error: unknown format '{other}' (expected text or geojson)");
            std::process::exit(1);
        }
    }
}

fn print_snapshot(map: &CyprusMap) {
    let model = map.spread_model();
    println!("=== Cyprus Fire-Risk Map ===\n");
    println!("Profile:  {}", model.profile().name);
    println!("Origin:   {}", model.origin());
    println!("Elapsed:  {}", map.fire_hours());

    match map.fire_polygon() {
        None => println!("\nNo fire drawn (zero elapsed time)."),
        Some(polygon) => {
            println!(
                "Extent:   {:.4} sq. degrees over {} vertices\n",
                ring_area(polygon.vertices()),
                polygon.len()
            );
            for vertex in polygon {
                println!("  {vertex}");
            }
        }
    }
}

fn print_geojson(map: &CyprusMap, full_map: bool) {
    let document = if full_map {
        geojson::view_feature_collection(map.view())
    } else {
        match map.fire_polygon() {
            Some(polygon) => geojson::spread_feature(polygon, map.fire_hours()),
            None => {
                eprintln!("error: nothing to export at zero elapsed time (try --full-map)");
                std::process::exit(1);
            }
        }
    };
    println!("{document:#}");
}

fn run_timeline(map: &CyprusMap, end: f64, step: f64) {
    if !(end > 0.0 && step > 0.0) {
        eprintln!("error: --timeline needs positive --hours and --step");
        std::process::exit(1);
    }

    let model = map.spread_model();
    println!("=== Fire spread timeline ({}) ===\n", model.profile().name);
    println!("{:>8}  {:>10}  {:>12}", "hours", "vertices", "sq. degrees");

    let mut hours = 0.0;
    while hours <= end {
        let polygon = model.compute_spread(Hours::new(hours));
        let area = if hours == 0.0 {
            0.0 // no overlay is drawn at zero elapsed time
        } else {
            ring_area(polygon.vertices())
        };
        println!("{hours:>8.1}  {:>10}  {area:>12.5}", polygon.len());
        hours += step;
    }
}

/// Shoelace area of an implicit ring, in square degrees.
fn ring_area(ring: &[LatLng]) -> f64 {
    let mut twice_area = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        twice_area += *a.lat * *b.lng - *b.lat * *a.lng;
    }
    (twice_area / 2.0).abs()
}
