//! Streaming summaries of decoded points.

use crate::{Bounds, Point};
use std::collections::BTreeMap;

/// Summary values accumulated over a dataset's points.
///
/// Every decoded point is observed exactly once, in record order.
///
/// # Examples
///
/// ```
/// use las_dataset::{Point, Statistics};
/// let mut statistics = Statistics::default();
/// statistics.observe(&Point { x: 1., intensity: 10, classification: 2, ..Default::default() });
/// statistics.observe(&Point { x: 3., intensity: 4, classification: 2, ..Default::default() });
/// assert_eq!(2, statistics.total_points);
/// assert_eq!(1., statistics.bounds.min.x);
/// assert_eq!(3., statistics.bounds.max.x);
/// assert_eq!((4, 10), (statistics.intensity.min, statistics.intensity.max));
/// assert_eq!(2, statistics.classification_count(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    /// The number of points observed.
    pub total_points: u64,

    /// The bounds of the observed points.
    pub bounds: Bounds,

    /// The range of observed intensities.
    pub intensity: IntensityRange,

    /// The number of points observed for each classification value.
    pub classifications: BTreeMap<u8, u64>,
}

/// The smallest and largest intensity observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntensityRange {
    #[allow(missing_docs)]
    pub min: u16,
    #[allow(missing_docs)]
    pub max: u16,
}

impl Statistics {
    /// Adds one point to these statistics.
    pub fn observe(&mut self, point: &Point) {
        self.total_points += 1;
        self.bounds.grow(point);
        self.intensity.grow(point.intensity);
        *self.classifications.entry(point.classification).or_insert(0) += 1;
    }

    /// Folds another set of statistics into these.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::{Point, Statistics};
    /// let mut a = Statistics::default();
    /// a.observe(&Point { classification: 2, ..Default::default() });
    /// let mut b = Statistics::default();
    /// b.observe(&Point { classification: 2, ..Default::default() });
    /// b.observe(&Point { classification: 6, ..Default::default() });
    /// a.merge(&b);
    /// assert_eq!(3, a.total_points);
    /// assert_eq!(2, a.classification_count(2));
    /// ```
    pub fn merge(&mut self, other: &Statistics) {
        self.total_points += other.total_points;
        self.bounds.union(&other.bounds);
        self.intensity.union(&other.intensity);
        for (&classification, &count) in &other.classifications {
            *self.classifications.entry(classification).or_insert(0) += count;
        }
    }

    /// Returns the number of points observed with this classification value.
    pub fn classification_count(&self, classification: u8) -> u64 {
        self.classifications
            .get(&classification)
            .copied()
            .unwrap_or(0)
    }

    /// Returns true if no points have been observed.
    pub fn is_empty(&self) -> bool {
        self.total_points == 0
    }
}

impl IntensityRange {
    /// Widens this range to include an intensity.
    pub fn grow(&mut self, intensity: u16) {
        self.min = self.min.min(intensity);
        self.max = self.max.max(intensity);
    }

    /// Widens this range to include another.
    pub fn union(&mut self, other: &IntensityRange) {
        if !other.is_empty() {
            self.grow(other.min);
            self.grow(other.max);
        }
    }

    /// Returns true if no intensity has been observed.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::IntensityRange;
    /// let mut range = IntensityRange::default();
    /// assert!(range.is_empty());
    /// range.grow(0);
    /// assert!(!range.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl Default for IntensityRange {
    fn default() -> IntensityRange {
        IntensityRange {
            min: u16::MAX,
            max: u16::MIN,
        }
    }
}
