//! The geographic extent derived from a dataset's header bounds.

mod common;

use common::{Fixture, Record};
use las_dataset::{
    Error, ParseOptions, Parser, Result,
    reproject::{Projection, ProjectionDefinitions},
};

const UTM_10N: &str = "+proj=utm +zone=10 +datum=WGS84 +units=m +no_defs";

fn utm() -> Vec<u8> {
    Fixture {
        records: vec![
            Record::xyz(49_000_000, 464_000_000, 0),
            Record::xyz(51_000_000, 466_000_000, 1_000),
        ],
        ..Default::default()
    }
    .las()
}

#[test]
fn no_projection_no_extent() {
    let dataset = Parser::default().parse(&utm()).unwrap();
    assert!(dataset.geo_extent().is_none());
}

#[test]
fn utm_to_wgs84() {
    let parser =
        Parser::new(ParseOptions::default().with_projection(ProjectionDefinitions::to_wgs84(UTM_10N)));
    let dataset = parser.parse(&utm()).unwrap();
    let extent = dataset.geo_extent().unwrap();
    assert!((extent.center_longitude - -123.).abs() < 1e-6);
    assert!(extent.min_longitude < -123. && -123. < extent.max_longitude);
    assert!(extent.min_latitude < extent.center_latitude);
    assert!(extent.center_latitude < extent.max_latitude);
    assert!((extent.center_latitude - 42.).abs() < 0.01);
}

#[test]
fn failure_is_not_fatal() {
    let parser = Parser::new(
        ParseOptions::default()
            .with_projection(ProjectionDefinitions::to_wgs84("+proj=not-a-projection")),
    );
    let dataset = parser.parse(&utm()).unwrap();
    assert!(dataset.geo_extent().is_none());
    assert_eq!(2, dataset.points().len());
    assert_eq!(2, dataset.statistics().total_points);
}

struct OutOfDomain;

impl Projection for OutOfDomain {
    fn project(&self, _: &str, _: &str, _: [f64; 2]) -> Result<[f64; 2]> {
        Err(Error::Reprojection("coordinate out of domain".to_string()))
    }
}

#[test]
fn custom_projection_failure() {
    let parser =
        Parser::new(ParseOptions::default().with_projection(ProjectionDefinitions::to_wgs84(UTM_10N)))
            .with_projection(OutOfDomain);
    let dataset = parser.parse(&utm()).unwrap();
    assert!(dataset.geo_extent().is_none());
    assert_eq!(2, dataset.points().len());
}

struct Swap;

impl Projection for Swap {
    fn project(&self, _: &str, _: &str, [x, y]: [f64; 2]) -> Result<[f64; 2]> {
        Ok([y, x])
    }
}

#[test]
fn custom_projection() {
    let parser = Parser::new(
        ParseOptions::default().with_projection(ProjectionDefinitions {
            source: "native".to_string(),
            target: "swapped".to_string(),
        }),
    )
    .with_projection(Swap);
    let dataset = parser.parse(&utm()).unwrap();
    let extent = dataset.geo_extent().unwrap();
    close(490_000., extent.min_latitude);
    close(510_000., extent.max_latitude);
    close(4_640_000., extent.min_longitude);
    close(4_660_000., extent.max_longitude);
    close(500_000., extent.center_latitude);
    close(4_650_000., extent.center_longitude);
}

fn close(expected: f64, actual: f64) {
    assert!((expected - actual).abs() < 1e-6, "{expected} != {actual}");
}
