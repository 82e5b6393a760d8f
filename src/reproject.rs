//! Convert a projected extent into geographic coordinates.
//!
//! Only summary coordinates are projected: the two corners of the bounds and their center. The
//! projection engine is pluggable through [Projection]; [Proj4rs] is the default.

use crate::{Bounds, Error, Result};
use proj4rs::{proj::Proj, transform::transform};

/// The definition of WGS84 longitude and latitude, in degrees.
pub const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// A forward coordinate transform between two projection definitions.
pub trait Projection {
    /// Projects one coordinate from one definition into another.
    ///
    /// Geographic coordinates are in degrees, longitude first.
    fn project(&self, from: &str, to: &str, xy: [f64; 2]) -> Result<[f64; 2]>;
}

/// A [Projection] on top of the pure-Rust proj4rs crate.
///
/// # Examples
///
/// ```
/// use las_dataset::reproject::{Proj4rs, Projection, WGS84};
/// let [lon, lat] = Proj4rs.project(WGS84, WGS84, [10., 20.]).unwrap();
/// assert!((lon - 10.).abs() < 1e-9);
/// assert!((lat - 20.).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Proj4rs;

impl Projection for Proj4rs {
    fn project(&self, from: &str, to: &str, [x, y]: [f64; 2]) -> Result<[f64; 2]> {
        let source = Proj::from_proj_string(from)
            .map_err(|err| Error::Reprojection(format!("invalid source definition {from:?}: {err:?}")))?;
        let target = Proj::from_proj_string(to)
            .map_err(|err| Error::Reprojection(format!("invalid target definition {to:?}: {err:?}")))?;
        let mut point = if is_geographic(from) {
            (x.to_radians(), y.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };
        transform(&source, &target, &mut point)
            .map_err(|err| Error::Reprojection(format!("cannot project ({x}, {y}): {err:?}")))?;
        let (x, y) = if is_geographic(to) {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };
        if x.is_finite() && y.is_finite() {
            Ok([x, y])
        } else {
            Err(Error::Reprojection(format!(
                "projection produced a non-finite coordinate ({x}, {y})"
            )))
        }
    }
}

fn is_geographic(definition: &str) -> bool {
    definition.contains("longlat") || definition.contains("latlong")
}

/// The source and target definitions used to derive a [GeoExtent].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectionDefinitions {
    /// The definition of the data's native coordinate system.
    pub source: String,

    /// The geographic definition to project into.
    pub target: String,
}

impl ProjectionDefinitions {
    /// Creates definitions that project from `source` into [WGS84].
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::reproject::{ProjectionDefinitions, WGS84};
    /// let definitions = ProjectionDefinitions::to_wgs84("+proj=utm +zone=10 +datum=WGS84");
    /// assert_eq!(WGS84, definitions.target);
    /// ```
    pub fn to_wgs84(source: impl Into<String>) -> ProjectionDefinitions {
        ProjectionDefinitions {
            source: source.into(),
            target: WGS84.to_string(),
        }
    }
}

/// The geographic extent of a dataset, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoExtent {
    #[allow(missing_docs)]
    pub center_latitude: f64,
    #[allow(missing_docs)]
    pub center_longitude: f64,
    #[allow(missing_docs)]
    pub min_latitude: f64,
    #[allow(missing_docs)]
    pub max_latitude: f64,
    #[allow(missing_docs)]
    pub min_longitude: f64,
    #[allow(missing_docs)]
    pub max_longitude: f64,
}

impl GeoExtent {
    /// Projects the corners and center of native bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{Bounds, Vector};
    /// use las_dataset::reproject::{GeoExtent, Proj4rs, ProjectionDefinitions, WGS84};
    /// let bounds = Bounds {
    ///     min: Vector { x: -1., y: 50., z: 0. },
    ///     max: Vector { x: 1., y: 52., z: 0. },
    /// };
    /// let definitions = ProjectionDefinitions::to_wgs84(WGS84);
    /// let extent = GeoExtent::from_bounds(&bounds, &definitions, &Proj4rs).unwrap();
    /// assert!((extent.center_latitude - 51.).abs() < 1e-9);
    /// ```
    pub fn from_bounds<P: Projection + ?Sized>(
        bounds: &Bounds,
        definitions: &ProjectionDefinitions,
        projection: &P,
    ) -> Result<GeoExtent> {
        let project =
            |xy| projection.project(&definitions.source, &definitions.target, xy);
        let [lon_a, lat_a] = project([bounds.min.x, bounds.min.y])?;
        let [lon_b, lat_b] = project([bounds.max.x, bounds.max.y])?;
        let center = bounds.center();
        let [center_longitude, center_latitude] = project([center.x, center.y])?;
        Ok(GeoExtent {
            center_latitude,
            center_longitude,
            min_latitude: lat_a.min(lat_b),
            max_latitude: lat_a.max(lat_b),
            min_longitude: lon_a.min(lon_b),
            max_longitude: lon_a.max(lon_b),
        })
    }
}
