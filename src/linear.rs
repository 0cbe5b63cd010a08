use crate::{
    error::{MTreeError, Result},
    metric::{Euclidean, Metric},
    point::Point,
};

/// Brute-force range index over a flat list of points. Same call surface
/// and guards as [`crate::MTree`]; the differential-testing and benchmark
/// baseline, not a structure you would deploy.
pub struct LinearScan<T, M = Euclidean> {
    dimension: Option<usize>,
    points: Vec<Point<T>>,
    metric: M,
}

impl<T> LinearScan<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_metric(Euclidean)
    }
}

impl<T, M: Metric> LinearScan<T, M> {
    #[must_use]
    pub fn with_metric(metric: M) -> Self {
        LinearScan {
            dimension: None,
            points: Vec::new(),
            metric,
        }
    }

    pub fn insert(&mut self, point: Point<T>) -> Result<()> {
        match self.dimension {
            Some(dimension) if point.coords.len() != dimension => {
                return Err(MTreeError::DimensionMismatch {
                    expected: dimension,
                    actual: point.coords.len(),
                });
            }
            Some(_) => {}
            None => self.dimension = Some(point.coords.len()),
        }
        self.points.push(point);
        Ok(())
    }

    pub fn search(&self, center: &[f64], radius: f64) -> Result<Vec<&Point<T>>> {
        let dimension = match self.dimension {
            Some(dimension) => dimension,
            None => return Ok(Vec::new()),
        };
        if center.len() != dimension {
            return Err(MTreeError::DimensionMismatch {
                expected: dimension,
                actual: center.len(),
            });
        }
        Ok(self
            .points
            .iter()
            .filter(|point| self.metric.distance(&point.coords, center) <= radius)
            .collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<T> Default for LinearScan<T> {
    fn default() -> Self {
        Self::new()
    }
}
