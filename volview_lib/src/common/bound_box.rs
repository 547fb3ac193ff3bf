use nalgebra::{point, Point3, Vector3};

/// Axis aligned bounds of a volume, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Zero sized boundbox
    ///
    /// For testing purposes, where bound box is irrelevant
    pub fn empty() -> BoundBox {
        BoundBox {
            lower: point![0.0, 0.0, 0.0],
            upper: point![0.0, 0.0, 0.0],
        }
    }

    pub fn from_position_dims(position: Point3<f32>, dimensions: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: position,
            upper: position + dimensions,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.lower
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    /// Midpoint of the bounds, per axis.
    pub fn center(&self) -> Point3<f32> {
        self.lower + self.dims() * 0.5
    }

    /// Euclidean length of the extent vector.
    ///
    /// Camera framing distances are derived from this, so a camera placed
    /// `diagonal` away sees the whole volume regardless of aspect ratio.
    pub fn diagonal(&self) -> f32 {
        self.dims().norm()
    }

    pub fn is_in(&self, pos: &Point3<f32>) -> bool {
        self.upper.x > pos.x
            && self.upper.y > pos.y
            && self.upper.z > pos.z
            && pos.x > self.lower.x
            && pos.y > self.lower.y
            && pos.z > self.lower.z
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use nalgebra::vector;

    #[test]
    fn center_and_diagonal() {
        let bbox = BoundBox::new(point![0.0, 0.0, 0.0], point![100.0, 100.0, 100.0]);

        assert_eq!(bbox.center(), point![50.0, 50.0, 50.0]);
        assert!((bbox.diagonal() - 173.205_08).abs() < 1e-3);
    }

    #[test]
    fn from_position_dims() {
        let bbox = BoundBox::from_position_dims(point![1.0, 2.0, 3.0], vector![2.0, 2.0, 2.0]);

        assert_eq!(bbox.upper, point![3.0, 4.0, 5.0]);
        assert_eq!(bbox.center(), point![2.0, 3.0, 4.0]);
        assert!(bbox.is_in(&point![2.0, 3.0, 4.0]));
        assert!(!bbox.is_in(&point![0.0, 3.0, 4.0]));
    }
}
