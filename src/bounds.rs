use crate::{Point, Vector};

/// Minimum and maximum bounds in three dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Grows the bounds to encompass this point in xyz space.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::{Bounds, Point};
    /// let point = Point { x: 1., y: 2., z: 3., ..Default::default() };
    /// let mut bounds = Bounds::default();
    /// bounds.grow(&point);
    /// assert_eq!(1., bounds.min.x);
    /// ```
    pub fn grow(&mut self, point: &Point) {
        if point.x < self.min.x {
            self.min.x = point.x;
        }
        if point.y < self.min.y {
            self.min.y = point.y;
        }
        if point.z < self.min.z {
            self.min.z = point.z;
        }
        if point.x > self.max.x {
            self.max.x = point.x;
        }
        if point.y > self.max.y {
            self.max.y = point.y;
        }
        if point.z > self.max.z {
            self.max.z = point.z;
        }
    }

    /// Grows these bounds to encompass another bounds.
    pub fn union(&mut self, other: &Bounds) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    /// Returns true if nothing has grown these bounds yet.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::{Bounds, Point};
    /// let mut bounds = Bounds::default();
    /// assert!(bounds.is_empty());
    /// bounds.grow(&Point::default());
    /// assert!(!bounds.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns true if the point lies inside these bounds, edges included.
    pub fn contains(&self, point: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Returns the centroid of the bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_dataset::{Bounds, Vector};
    /// let bounds = Bounds {
    ///     min: Vector { x: 0., y: 0., z: 0. },
    ///     max: Vector { x: 2., y: 4., z: 6. },
    /// };
    /// assert_eq!(Vector { x: 1., y: 2., z: 3. }, bounds.center());
    /// ```
    pub fn center(&self) -> Vector<f64> {
        Vector {
            x: (self.min.x + self.max.x) / 2.,
            y: (self.min.y + self.max.y) / 2.,
            z: (self.min.z + self.max.z) / 2.,
        }
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: Vector {
                x: f64::INFINITY,
                y: f64::INFINITY,
                z: f64::INFINITY,
            },
            max: Vector {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
                z: f64::NEG_INFINITY,
            },
        }
    }
}
