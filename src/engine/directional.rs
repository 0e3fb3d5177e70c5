use std::f32::consts::FRAC_PI_2;

use log::{debug, warn};

use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    coords::CoordinateSystem,
    error::{FrustumError, Result},
    frustum::Frustum,
    frustum_id::FrustumId,
    hexahedron::PlaneHexahedron,
    obb::OrientedBox,
    plane::Plane,
    sphere::Sphere,
};

/// A view pyramid cut off at a near and a far distance.
///
/// The planes are never rotated incrementally. Every change of orientation
/// rebuilds the canonical pyramid, looking along the coordinate system's
/// forward axis from the origin, and places it with the stored eye and
/// orientation.
#[derive(Debug, Clone)]
pub struct DirectionalFrustum {
    id: FrustumId,
    hexahedron: PlaneHexahedron,
    eye: nalgebra_glm::Vec3,
    orientation: nalgebra_glm::Qua<f32>,
    near: f32,
    far: f32,
    horizontal_half_angle: f32,
    vertical_half_angle: f32,
    coords: CoordinateSystem,
}

impl DirectionalFrustum {
    /// Half angles are in radians.
    pub fn new(
        eye: nalgebra_glm::Vec3,
        direction: nalgebra_glm::Vec3,
        near: f32,
        far: f32,
        horizontal_half_angle: f32,
        vertical_half_angle: f32,
    ) -> Result<Self> {
        Self::with_coords(
            eye,
            direction,
            near,
            far,
            horizontal_half_angle,
            vertical_half_angle,
            CoordinateSystem::default(),
        )
    }

    pub fn with_coords(
        eye: nalgebra_glm::Vec3,
        direction: nalgebra_glm::Vec3,
        near: f32,
        far: f32,
        horizontal_half_angle: f32,
        vertical_half_angle: f32,
        coords: CoordinateSystem,
    ) -> Result<Self> {
        if !(near > 0.0 && near.is_finite()) {
            return Err(FrustumError::InvalidParameters(format!(
                "near distance must be positive, got {}",
                near
            )));
        }
        if !(far > near && far.is_finite()) {
            return Err(FrustumError::InvalidParameters(format!(
                "far distance {} must exceed near distance {}",
                far, near
            )));
        }
        for (name, angle) in [
            ("horizontal", horizontal_half_angle),
            ("vertical", vertical_half_angle),
        ] {
            if !(angle > 0.0 && angle < FRAC_PI_2) {
                return Err(FrustumError::InvalidParameters(format!(
                    "{} half angle must lie strictly between 0 and pi/2, got {}",
                    name, angle
                )));
            }
        }
        let orientation = coords.look_at(&direction, &coords.up()).ok_or_else(|| {
            FrustumError::InvalidParameters("view direction must not be zero".to_string())
        })?;

        let mut frustum = Self {
            id: FrustumId::new(),
            hexahedron: PlaneHexahedron::new(
                Self::canonical_planes(
                    near,
                    far,
                    horizontal_half_angle,
                    vertical_half_angle,
                    coords,
                ),
                coords,
            ),
            eye,
            orientation,
            near,
            far,
            horizontal_half_angle,
            vertical_half_angle,
            coords,
        };
        frustum.rebuild();
        debug!(
            "created directional frustum {} at {:?} looking along {:?}",
            frustum.id,
            frustum.eye,
            frustum.view_direction()
        );
        Ok(frustum)
    }

    /// The pyramid at the origin looking along `coords.forward()`.
    fn canonical_planes(
        near: f32,
        far: f32,
        horizontal_half_angle: f32,
        vertical_half_angle: f32,
        coords: CoordinateSystem,
    ) -> [Plane; 6] {
        let origin = nalgebra_glm::Vec3::zeros();
        let forward = coords.forward();
        let left = coords.left();
        let up = coords.up();
        let (sin_h, cos_h) = horizontal_half_angle.sin_cos();
        let (sin_v, cos_v) = vertical_half_angle.sin_cos();

        [
            Plane::from_center_normal(origin, forward * sin_h - left * cos_h),
            Plane::from_center_normal(origin, forward * sin_h + left * cos_h),
            Plane::from_center_normal(origin, forward * sin_v - up * cos_v),
            Plane::from_center_normal(origin, forward * sin_v + up * cos_v),
            Plane::from_center_normal(forward * near, forward),
            Plane::from_center_normal(forward * far, -forward),
        ]
    }

    fn rebuild(&mut self) {
        let mut hexahedron = PlaneHexahedron::new(
            Self::canonical_planes(
                self.near,
                self.far,
                self.horizontal_half_angle,
                self.vertical_half_angle,
                self.coords,
            ),
            self.coords,
        );
        let placement =
            nalgebra_glm::translation(&self.eye) * nalgebra_glm::quat_to_mat4(&self.orientation);
        hexahedron.transform(&placement, None);
        self.hexahedron = hexahedron;
    }

    pub fn hexahedron(&self) -> &PlaneHexahedron {
        &self.hexahedron
    }

    pub fn orientation(&self) -> nalgebra_glm::Qua<f32> {
        self.orientation
    }

    pub fn coords(&self) -> CoordinateSystem {
        self.coords
    }

    pub fn view_direction(&self) -> nalgebra_glm::Vec3 {
        nalgebra_glm::quat_rotate_vec3(&self.orientation, &self.coords.forward())
    }

    pub fn left(&self) -> nalgebra_glm::Vec3 {
        nalgebra_glm::quat_rotate_vec3(&self.orientation, &self.coords.left())
    }

    pub fn up(&self) -> nalgebra_glm::Vec3 {
        nalgebra_glm::quat_rotate_vec3(&self.orientation, &self.coords.up())
    }

    pub fn horizontal_half_angle(&self) -> f32 {
        self.horizontal_half_angle
    }

    pub fn vertical_half_angle(&self) -> f32 {
        self.vertical_half_angle
    }

    /// Turns the frustum to look along `direction`, dropping any roll.
    pub fn look_along(&mut self, direction: &nalgebra_glm::Vec3) -> Result<()> {
        self.orientation = self
            .coords
            .look_at(direction, &self.coords.up())
            .ok_or_else(|| {
                FrustumError::InvalidParameters("view direction must not be zero".to_string())
            })?;
        self.rebuild();
        Ok(())
    }

    pub fn clone_with_new_identity(&self) -> Self {
        Self {
            id: FrustumId::new(),
            ..self.clone()
        }
    }
}

impl Frustum for DirectionalFrustum {
    fn id(&self) -> FrustumId {
        self.id
    }

    fn eye(&self) -> nalgebra_glm::Vec3 {
        self.eye
    }

    fn near_distance(&self) -> f32 {
        self.near
    }

    fn far_distance(&self) -> f32 {
        self.far
    }

    fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.eye += v;
        self.hexahedron.translate(v);
    }

    /// Rotates about the eye.
    fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        self.orientation = nalgebra_glm::quat_normalize(&(rotation * self.orientation));
        self.rebuild();
    }

    fn set_rotation(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        self.orientation = nalgebra_glm::quat_normalize(rotation);
        self.rebuild();
    }

    /// Moves the eye by `matrix` and re-derives the orientation from the
    /// transformed view and up directions. Scale and shear are discarded.
    fn transform(&mut self, matrix: &nalgebra_glm::Mat4) {
        let direction = self.view_direction();
        let up = self.up();
        let eye = matrix * nalgebra_glm::vec4(self.eye.x, self.eye.y, self.eye.z, 1.0);
        let direction = matrix * nalgebra_glm::vec4(direction.x, direction.y, direction.z, 0.0);
        let up = matrix * nalgebra_glm::vec4(up.x, up.y, up.z, 0.0);

        match self.coords.look_at(&direction.xyz(), &up.xyz()) {
            Some(orientation) => self.orientation = orientation,
            None => warn!(
                "transform of frustum {} collapses its view direction, keeping orientation",
                self.id
            ),
        }
        self.eye = eye.xyz();
        self.rebuild();
    }

    fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        self.hexahedron.classify_point(point)
    }

    fn classify_sphere(&self, sphere: &Sphere) -> Result<IntersectionType> {
        self.hexahedron.classify_sphere(&sphere.center, sphere.radius)
    }

    fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType> {
        self.hexahedron.classify_aabb(aabb)
    }

    fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType> {
        self.hexahedron.classify_obb(obb)
    }

    fn classify_plane(&self, plane: &Plane) -> Result<PlaneClassification> {
        self.hexahedron.classify_plane(plane)
    }

    fn intersects_obb(&self, obb: &OrientedBox) -> Result<bool> {
        self.hexahedron.intersects_obb(obb)
    }

    fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        self.hexahedron.distance_squared(point)
    }

    fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        self.hexahedron.nearest_point(point)
    }

    fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        self.hexahedron.distance_max_squared(point)
    }

    fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        self.hexahedron.farthest_point(point)
    }

    fn bounding_box(&self) -> Result<AABB> {
        self.hexahedron.bounding_box()
    }
}
