//! Prints a summary of a las or laz file.
//!
//! ```text
//! cargo run --example summary -- points.laz "+proj=utm +zone=10 +datum=WGS84"
//! ```
//!
//! The optional second argument is the proj definition of the file's coordinate system; when it is
//! given the geographic extent is printed too.

use las_dataset::{ParseOptions, Parser, reproject::ProjectionDefinitions};

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("Must provide a path to a las file");
    let mut options = ParseOptions::default();
    if let Some(definition) = args.next() {
        options = options.with_projection(ProjectionDefinitions::to_wgs84(definition));
    }
    let bytes = std::fs::read(&path).expect("Unable to read file");
    let dataset = Parser::new(options)
        .parse(&bytes)
        .expect("Unable to decode file");

    let header = dataset.header();
    println!("{path}");
    println!("  version: {}", header.version());
    println!("  point format: {}", header.point_format());
    println!("  compressed: {}", header.is_compressed());
    println!("  system identifier: {}", header.system_identifier());
    println!("  generating software: {}", header.generating_software());
    if let Some(date) = header.date() {
        println!("  date: {date}");
    }
    println!("  vlrs: {}", dataset.vlrs().len());
    for vlr in dataset.vlrs() {
        println!(
            "    {} {}: {} bytes",
            vlr.user_id,
            vlr.record_id,
            vlr.data.len()
        );
    }

    let statistics = dataset.statistics();
    println!("  points: {}", statistics.total_points);
    println!(
        "  declared points: {}",
        header.number_of_points()
    );
    let bounds = statistics.bounds;
    println!(
        "  bounds: ({}, {}, {}) to ({}, {}, {})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    if !statistics.intensity.is_empty() {
        println!(
            "  intensity: {} to {}",
            statistics.intensity.min, statistics.intensity.max
        );
    }
    println!("  classifications:");
    for (classification, count) in &statistics.classifications {
        println!("    {classification:>3}: {count}");
    }

    if let Some(extent) = dataset.geo_extent() {
        println!(
            "  center: {:.6}, {:.6}",
            extent.center_latitude, extent.center_longitude
        );
        println!(
            "  latitude: {:.6} to {:.6}",
            extent.min_latitude, extent.max_latitude
        );
        println!(
            "  longitude: {:.6} to {:.6}",
            extent.min_longitude, extent.max_longitude
        );
    }
}
