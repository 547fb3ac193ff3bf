use nalgebra::{point, vector, Point3, Vector2, Vector3};

use crate::common::BoundBox;

use super::{AnatomicalView, Axis};

/// Oblique offset applied on camera reset, in units of the bounds diagonal.
/// Guarantees the whole volume is visible no matter its aspect ratio.
const RESET_OFFSET: Vector3<f32> = vector![0.8, -0.8, 0.8];

/// Fixed vertical view angle, in degrees.
const VIEW_ANGLE: f32 = 30.0;

/// Smallest allowed distance between position and focal point.
const MIN_FOCAL_DISTANCE: f32 = 1e-2;

/// Camera state of the 3D view.
///
/// Holds position, focal point and up vector, mutated in place by the
/// orientation operations. Position and focal point never coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    position: Point3<f32>,
    focal_point: Point3<f32>,
    view_up: Vector3<f32>,
    parallel_projection: bool,
    view_angle: f32,
    clipping_range: (f32, f32),
}

impl ViewCamera {
    pub fn new() -> ViewCamera {
        ViewCamera {
            position: point![300.0, -300.0, 300.0],
            focal_point: point![0.0, 0.0, 0.0],
            view_up: vector![0.0, 0.0, 1.0],
            parallel_projection: true,
            view_angle: VIEW_ANGLE,
            clipping_range: (0.1, 1000.0),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn focal_point(&self) -> Point3<f32> {
        self.focal_point
    }

    pub fn view_up(&self) -> Vector3<f32> {
        self.view_up
    }

    pub fn parallel_projection(&self) -> bool {
        self.parallel_projection
    }

    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }

    pub fn clipping_range(&self) -> (f32, f32) {
        self.clipping_range
    }

    /// Unit vector from position towards the focal point.
    pub fn view_direction(&self) -> Vector3<f32> {
        (self.focal_point - self.position).normalize()
    }

    /// Frame the camera on the given bounds.
    ///
    /// Focal point lands on the bounds center, position on a fixed oblique
    /// offset scaled by the bounds diagonal, up points along `+z`. Clipping
    /// planes are scaled from the diagonal as well. Called on every volume
    /// bind and on explicit camera reset.
    pub fn reset_to_bounds(&mut self, bounds: &BoundBox) {
        let center = bounds.center();
        let diagonal = bounds.diagonal();

        self.focal_point = center;
        self.position = center + RESET_OFFSET * diagonal;
        self.view_up = vector![0.0, 0.0, 1.0];
        self.clipping_range = (0.01 * diagonal, 100.0 * diagonal);
        self.parallel_projection = true;
        self.view_angle = VIEW_ANGLE;
    }

    /// Rotate position and up vector about a world axis, holding the focal
    /// point fixed.
    ///
    /// This is a planar rotation in the two axes other than `axis`; the named
    /// axis's own coordinate of both position and up vector is untouched.
    /// Rotations about different axes therefore do not compose like true 3D
    /// rotations about the current view basis.
    pub fn rotate_around_axis(&mut self, axis: Axis, degrees: f32) {
        let r = degrees.to_radians();
        let (sin, cos) = r.sin_cos();

        let dir = self.position - self.focal_point;
        let up = self.view_up;

        match axis {
            Axis::X => {
                self.position.y = self.focal_point.y + dir.y * cos - dir.z * sin;
                self.position.z = self.focal_point.z + dir.y * sin + dir.z * cos;
                self.view_up.y = up.y * cos - up.z * sin;
                self.view_up.z = up.y * sin + up.z * cos;
            }
            Axis::Y => {
                self.position.z = self.focal_point.z + dir.z * cos - dir.x * sin;
                self.position.x = self.focal_point.x + dir.z * sin + dir.x * cos;
                self.view_up.z = up.z * cos - up.x * sin;
                self.view_up.x = up.z * sin + up.x * cos;
            }
            Axis::Z => {
                self.position.x = self.focal_point.x + dir.x * cos - dir.y * sin;
                self.position.y = self.focal_point.y + dir.x * sin + dir.y * cos;
                self.view_up.x = up.x * cos - up.y * sin;
                self.view_up.y = up.x * sin + up.y * cos;
            }
        }
    }

    /// Snap to an anatomical view of the given bounds.
    ///
    /// Center and diagonal are recomputed exactly as in
    /// [`ViewCamera::reset_to_bounds`], then the camera is placed one diagonal
    /// away from the center along the view's axis.
    pub fn preset_view(&mut self, view: AnatomicalView, bounds: &BoundBox) {
        let center = bounds.center();
        let diagonal = bounds.diagonal();

        self.focal_point = center;
        self.position = center + view.direction() * diagonal;
        self.view_up = view.view_up();
    }

    /// Translate position and focal point together along the view plane.
    ///
    /// `delta.x` moves along the camera's right vector, `delta.y` along its
    /// in-plane up vector.
    pub fn pan_in_view_plane(&mut self, delta: Vector2<f32>) {
        let forward = self.view_direction();
        let right = forward.cross(&self.view_up);

        // up vector may drift towards the view direction over rotations,
        // re-orthogonalize for a stable pan basis
        let right = if right.norm() > f32::EPSILON {
            right.normalize()
        } else {
            return;
        };
        let up = right.cross(&forward);

        let shift = right * delta.x + up * delta.y;
        self.position += shift;
        self.focal_point += shift;
    }

    /// Move position along the view direction.
    ///
    /// Positive `amount` moves towards the focal point. The move is clamped so
    /// the position never reaches the focal point.
    pub fn dolly(&mut self, amount: f32) {
        let distance = (self.focal_point - self.position).norm();
        let amount = amount.min(distance - MIN_FOCAL_DISTANCE);

        self.position += self.view_direction() * amount;
    }
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn unit_bounds() -> BoundBox {
        BoundBox::new(point![0.0, 0.0, 0.0], point![100.0, 100.0, 100.0])
    }

    fn assert_point_eq(a: Point3<f32>, b: Point3<f32>, eps: f32) {
        assert!((a - b).norm() < eps, "{a:?} != {b:?}");
    }

    #[test]
    fn reset_frames_bounds() {
        let mut cam = ViewCamera::new();
        cam.reset_to_bounds(&unit_bounds());

        let diag = 173.205_08;
        assert_point_eq(cam.focal_point(), point![50.0, 50.0, 50.0], 1e-4);
        assert_point_eq(
            cam.position(),
            point![50.0 + 0.8 * diag, 50.0 - 0.8 * diag, 50.0 + 0.8 * diag],
            1e-2,
        );
        assert_eq!(cam.view_up(), vector![0.0, 0.0, 1.0]);
        assert!(cam.parallel_projection());

        let (near, far) = cam.clipping_range();
        assert!((near - 0.01 * diag).abs() < 1e-3);
        assert!((far - 100.0 * diag).abs() < 1e-1);
    }

    #[test]
    fn rotation_keeps_named_axis_coordinate() {
        let mut cam = ViewCamera::new();
        cam.reset_to_bounds(&unit_bounds());

        let before = cam.position();
        cam.rotate_around_axis(Axis::Z, 90.0);
        assert_eq!(cam.position().z, before.z);

        let before = cam.position();
        cam.rotate_around_axis(Axis::X, 45.0);
        assert_eq!(cam.position().x, before.x);

        let before = cam.position();
        cam.rotate_around_axis(Axis::Y, 30.0);
        assert_eq!(cam.position().y, before.y);
    }

    #[test]
    fn rotation_inverse_restores_state() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let mut cam = ViewCamera::new();
            cam.reset_to_bounds(&unit_bounds());
            cam.rotate_around_axis(Axis::Z, 33.0); // start from a non-trivial up

            let pos = cam.position();
            let up = cam.view_up();

            cam.rotate_around_axis(axis, 77.5);
            cam.rotate_around_axis(axis, -77.5);

            assert_point_eq(cam.position(), pos, 1e-3);
            assert!((cam.view_up() - up).norm() < 1e-5);
        }
    }

    #[test]
    fn rotation_holds_focal_point_and_distance() {
        let mut cam = ViewCamera::new();
        cam.reset_to_bounds(&unit_bounds());

        let focal = cam.focal_point();
        let dist = (cam.position() - focal).norm();

        cam.rotate_around_axis(Axis::Z, 120.0);

        assert_eq!(cam.focal_point(), focal);
        assert!(((cam.position() - focal).norm() - dist).abs() < 1e-3);
    }

    #[test]
    fn superior_preset_view() {
        let mut cam = ViewCamera::new();
        let bounds = unit_bounds();
        cam.reset_to_bounds(&bounds);
        cam.preset_view(AnatomicalView::Superior, &bounds);

        let diag = bounds.diagonal();
        assert_point_eq(cam.position(), point![50.0, 50.0, 50.0 + diag], 1e-3);
        assert_eq!(cam.view_up(), vector![0.0, 1.0, 0.0]);
        assert_eq!(cam.focal_point(), point![50.0, 50.0, 50.0]);
    }

    #[test]
    fn horizontal_preset_views_keep_z_up() {
        let bounds = unit_bounds();
        for view in [
            AnatomicalView::Anterior,
            AnatomicalView::Posterior,
            AnatomicalView::Left,
            AnatomicalView::Right,
        ] {
            let mut cam = ViewCamera::new();
            cam.preset_view(view, &bounds);

            assert_eq!(cam.view_up(), vector![0.0, 0.0, 1.0]);
            let offset = cam.position() - bounds.center();
            assert!((offset.norm() - bounds.diagonal()).abs() < 1e-3);
        }
    }

    #[test]
    fn dolly_never_reaches_focal_point() {
        let mut cam = ViewCamera::new();
        cam.reset_to_bounds(&unit_bounds());

        cam.dolly(1e6);

        let dist = (cam.position() - cam.focal_point()).norm();
        assert!(dist >= MIN_FOCAL_DISTANCE * 0.99);
    }

    #[test]
    fn pan_moves_position_and_focal_together() {
        let mut cam = ViewCamera::new();
        cam.reset_to_bounds(&unit_bounds());

        let offset = cam.position() - cam.focal_point();
        cam.pan_in_view_plane(vector![10.0, -4.0]);

        assert!(((cam.position() - cam.focal_point()) - offset).norm() < 1e-4);
    }
}
