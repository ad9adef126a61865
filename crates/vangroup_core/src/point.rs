/// Planar job coordinate.
/// `x` holds the raw longitude and `y` the raw latitude; all distances are
/// plain Euclidean on these values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JobPoint {
    pub x: f64,
    pub y: f64,
}

impl JobPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { x: lon, y: lat }
    }

    #[inline]
    pub fn dist(self, rhs: &Self) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::JobPoint;

    #[test]
    fn from_lon_lat_stores_lon_in_x_and_lat_in_y() {
        let point = JobPoint::from_lon_lat(-33.75, 12.5);
        assert_eq!(point.x, -33.75);
        assert_eq!(point.y, 12.5);
    }

    #[test]
    fn dist_uses_euclidean_metric() {
        let a = JobPoint::new(0.0, 0.0);
        let b = JobPoint::new(4.0, 3.0);
        assert!((a.dist(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn dist_is_symmetric_and_zero_for_same_point() {
        let a = JobPoint::new(1.5, -2.25);
        let b = JobPoint::new(-7.0, 4.0);
        assert!((a.dist(&b) - b.dist(&a)).abs() < 1e-12);
        assert!(a.dist(&a).abs() < 1e-12);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(JobPoint::new(0.0, 0.0).is_valid());
        assert!(!JobPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!JobPoint::new(0.0, f64::INFINITY).is_valid());
    }
}
