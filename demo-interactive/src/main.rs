//! Interactive Fire-Risk Map Demo
//!
//! A terminal stand-in for the widget host: it forwards slider and checkbox
//! events to the map controller, then drains and prints the layer commands
//! a real map widget would apply.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive
//! ```
//!
//! # Commands
//!
//! - `hours <n>` - Move the time slider to n elapsed hours
//! - `toggle <forests|grass|roads> [on|off]` - Flip (or set) a surface layer checkbox
//! - `status` - Show view state, layer visibility, and fire extent
//! - `layers` - List registered layer groups
//! - `polygon` - Print the current fire polygon vertices
//! - `geojson` - Print the visible map as GeoJSON
//! - `reset` - Recreate the map in its initial state
//! - `help` - Show available commands
//! - `quit` - Exit

use fire_map_core::{cyprus, geojson, CyprusMap, MapCommand, SurfaceKind};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Cyprus Fire-Risk Map - Interactive Demo ===");
    println!();

    let mut map = CyprusMap::new();
    println!(
        "Map centered on {} at zoom {}.",
        map.view().center(),
        map.view().zoom()
    );
    apply_pending(&mut map);

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create readline: {e}");
            return;
        }
    };

    println!("\nType 'help' for available commands.\n");

    loop {
        let readline = rl.readline("map> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let parts: Vec<&str> = line.split_whitespace().collect();

                if parts.is_empty() {
                    continue;
                }

                match parts[0].to_lowercase().as_str() {
                    "hours" | "h" => {
                        set_hours(&mut map, parts.get(1).copied());
                        apply_pending(&mut map);
                    }
                    "toggle" | "t" => {
                        toggle(&mut map, parts.get(1).copied(), parts.get(2).copied());
                        apply_pending(&mut map);
                    }
                    "status" => show_status(&map),
                    "layers" => show_layers(&map),
                    "polygon" => show_polygon(&map),
                    "geojson" => {
                        println!("{:#}", geojson::view_feature_collection(map.view()));
                    }
                    "reset" => {
                        map = CyprusMap::new();
                        println!("Map reset to its initial state.");
                        apply_pending(&mut map);
                    }
                    "help" => show_help(),
                    "quit" | "exit" | "q" => break,
                    other => println!("Unknown command '{other}'. Type 'help'."),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Readline error: {e}");
                break;
            }
        }
    }

    println!("Bye.");
}

/// Play the widget-host role: drain queued commands and "apply" them.
fn apply_pending(map: &mut CyprusMap) {
    for command in map.drain_commands() {
        match command {
            MapCommand::AddLayer(id) => {
                let describe = map
                    .view()
                    .group(id)
                    .map_or_else(String::new, |group| {
                        format!(" '{}' ({} overlays)", group.name, group.len())
                    });
                println!("  [widget] draw {id}{describe}");
            }
            MapCommand::RemoveLayer(id) => println!("  [widget] erase {id}"),
        }
    }
}

fn set_hours(map: &mut CyprusMap, value: Option<&str>) {
    let Some(value) = value else {
        println!("Usage: hours <n>");
        return;
    };
    let Ok(parsed) = value.parse::<f64>() else {
        println!("Not a number: '{value}'");
        return;
    };
    match map.set_fire_hours(parsed) {
        Ok(hours) if hours.is_zero() => println!("Slider at zero; no fire drawn."),
        Ok(hours) => {
            let vertices = map.fire_polygon().map_or(0, fire_map_core::SpreadPolygon::len);
            println!("Fire extent after {hours}: {vertices} vertices.");
        }
        Err(err) => println!("Rejected: {err}"),
    }
}

fn toggle(map: &mut CyprusMap, kind: Option<&str>, state: Option<&str>) {
    let Some(kind) = kind.and_then(SurfaceKind::parse) else {
        println!("Usage: toggle <forests|grass|roads> [on|off]");
        return;
    };
    let target = match state {
        Some("on") => true,
        Some("off") => false,
        None => !map.is_surface_visible(kind),
        Some(other) => {
            println!("Expected 'on' or 'off', got '{other}'");
            return;
        }
    };
    if map.set_surface_visible(kind, target) {
        println!(
            "{kind} ({}) now {}.",
            kind.risk(),
            if target { "shown" } else { "hidden" }
        );
    } else {
        println!("{kind} already {}.", if target { "shown" } else { "hidden" });
    }
}

fn show_status(map: &CyprusMap) {
    println!("Center {} | zoom {}", map.view().center(), map.view().zoom());
    for kind in SurfaceKind::ALL {
        println!(
            "  {:<8} {:<18} {}",
            kind.label(),
            format!("({})", kind.risk()),
            if map.is_surface_visible(kind) { "shown" } else { "hidden" }
        );
    }
    match map.fire_polygon() {
        Some(polygon) => println!(
            "  fire     {} elapsed, {} vertices",
            map.fire_hours(),
            polygon.len()
        ),
        None => println!("  fire     not drawn"),
    }
    let origin = cyprus::fire_origin();
    println!("  ignition origin {origin}");
}

fn show_layers(map: &CyprusMap) {
    for id in map.view().layer_ids() {
        if let Some(group) = map.view().group(id) {
            let visible = map.view().is_visible(id) == Ok(true);
            println!(
                "  {id}: '{}' with {} overlays [{}]",
                group.name,
                group.len(),
                if visible { "visible" } else { "hidden" }
            );
        }
    }
}

fn show_polygon(map: &CyprusMap) {
    match map.fire_polygon() {
        None => println!("No fire polygon; move the slider with 'hours <n>'."),
        Some(polygon) => {
            for vertex in polygon {
                println!("  {vertex}");
            }
        }
    }
}

fn show_help() {
    println!("Commands:");
    println!("  hours <n>                        move the time slider (0 clears the fire)");
    println!("  toggle <forests|grass|roads>     flip a surface checkbox (optional on/off)");
    println!("  status                           view state summary");
    println!("  layers                           registered layer groups");
    println!("  polygon                          current fire polygon vertices");
    println!("  geojson                          visible map as GeoJSON");
    println!("  reset                            back to the initial state");
    println!("  quit                             exit");
}
