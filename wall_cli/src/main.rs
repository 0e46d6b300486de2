//! # Corewall CLI Application
//!
//! Runs a design request through `wall_core` and prints the report.
//!
//! ```text
//! wall_cli [<request.json>] [--output <report.json>] [--sequential]
//! ```
//!
//! Without a request file a built-in demo runs: a 6 m × 8 m tube with doors
//! on both faces and a small framing grid around it. Set `RUST_LOG=debug` to
//! see per-beam trimming decisions.

use std::path::PathBuf;
use std::process::ExitCode;

use nalgebra::Point2;
use wall_core::{
    load_request, save_report, BeamSegment, CoreWallGeometry, DesignRequest, OpeningPlacement,
    StoryClearances, WallResult,
};

#[derive(Debug, Default)]
struct Args {
    request: Option<PathBuf>,
    output: Option<PathBuf>,
    sequential: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                let path = iter.next().ok_or("--output needs a file path")?;
                args.output = Some(PathBuf::from(path));
            }
            "--sequential" => args.sequential = true,
            "--help" | "-h" => return Err(usage()),
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'\n{}", flag, usage())),
            path => {
                if args.request.is_some() {
                    return Err(format!("only one request file may be given\n{}", usage()));
                }
                args.request = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn usage() -> String {
    "usage: wall_cli [<request.json>] [--output <report.json>] [--sequential]".to_string()
}

/// Tube contract example with a framing grid: two girders through the core,
/// a beam framing in from the shaft, one clear of the wall, and one that
/// only grazes a corner.
fn demo_request() -> WallResult<DesignRequest> {
    let geometry = CoreWallGeometry::tube_with_openings(
        500.0,
        6000.0,
        8000.0,
        2000.0,
        None,
        OpeningPlacement::TopAndBottom,
    )?;
    let story = StoryClearances::new(3500.0, 200.0, 200.0)?;
    let mut request = DesignRequest::new("Demo Engineer", "DEMO-001", geometry).with_story(story);

    let beams = [
        ("G1", (-4000.0, 2000.0), (10000.0, 2000.0)),
        ("G2", (-4000.0, 6000.0), (10000.0, 6000.0)),
        ("B1", (3000.0, 4000.0), (11000.0, 4000.0)),
        ("B2", (9000.0, -2000.0), (9000.0, 10000.0)),
        ("B3", (5000.0, -1000.0), (7000.0, 1000.0)),
    ];
    for (id, (x0, y0), (x1, y1)) in beams {
        request.add_beam(BeamSegment::new(Point2::new(x0, y0), Point2::new(x1, y1), 300.0).with_id(id));
    }
    Ok(request)
}

fn run(args: Args) -> WallResult<()> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => {
            println!("No request given. Running built-in demo...");
            println!();
            demo_request()?
        }
    };
    if args.sequential {
        request.settings.parallel_trimming = false;
    }

    let report = request.evaluate();

    println!("═══════════════════════════════════════");
    println!("  CORE WALL REPORT");
    println!("═══════════════════════════════════════");
    println!("{}", request.geometry);
    println!();
    print!("{}", report.to_text());
    println!("═══════════════════════════════════════");

    match &args.output {
        Some(path) => {
            save_report(&report, path)?;
            println!("Report saved to {}", path.display());
        }
        None => {
            println!();
            println!("JSON Output:");
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                wall_core::WallError::SerializationError {
                    reason: e.to_string(),
                }
            })?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
