use log::{debug, warn};

use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    coords::CoordinateSystem,
    error::{FrustumError, Result},
    frustum::Frustum,
    frustum_id::FrustumId,
    obb::OrientedBox,
    plane::Plane,
    sphere::Sphere,
};

/// A box reaching `far` ahead of the eye, for sensors with a flat field of
/// view. The eye sits at the middle of the box's back face.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBoxFrustum {
    id: FrustumId,
    obb: OrientedBox,
    eye: nalgebra_glm::Vec3,
    coords: CoordinateSystem,
}

impl OrientedBoxFrustum {
    pub fn new(
        eye: nalgebra_glm::Vec3,
        direction: nalgebra_glm::Vec3,
        far: f32,
        side_size: f32,
        vertical_size: f32,
    ) -> Result<Self> {
        Self::with_coords(
            eye,
            direction,
            far,
            side_size,
            vertical_size,
            CoordinateSystem::default(),
        )
    }

    pub fn with_coords(
        eye: nalgebra_glm::Vec3,
        direction: nalgebra_glm::Vec3,
        far: f32,
        side_size: f32,
        vertical_size: f32,
        coords: CoordinateSystem,
    ) -> Result<Self> {
        for (name, size) in [
            ("far distance", far),
            ("side size", side_size),
            ("vertical size", vertical_size),
        ] {
            if !(size > 0.0 && size.is_finite()) {
                return Err(FrustumError::InvalidParameters(format!(
                    "{} must be positive, got {}",
                    name, size
                )));
            }
        }
        let orientation = coords.look_at(&direction, &coords.up()).ok_or_else(|| {
            FrustumError::InvalidParameters("view direction must not be zero".to_string())
        })?;
        let forward = nalgebra_glm::quat_rotate_vec3(&orientation, &coords.forward());
        let side = nalgebra_glm::quat_rotate_vec3(&orientation, &coords.left());

        let frustum = Self {
            id: FrustumId::new(),
            obb: OrientedBox::new(
                eye + forward * (far * 0.5),
                forward,
                side,
                nalgebra_glm::vec3(far * 0.5, side_size * 0.5, vertical_size * 0.5),
            ),
            eye,
            coords,
        };
        debug!(
            "created box frustum {} at {:?} looking along {:?}",
            frustum.id, eye, forward
        );
        Ok(frustum)
    }

    pub fn oriented_box(&self) -> &OrientedBox {
        &self.obb
    }

    pub fn coords(&self) -> CoordinateSystem {
        self.coords
    }

    pub fn view_direction(&self) -> nalgebra_glm::Vec3 {
        self.obb.forward()
    }

    pub fn clone_with_new_identity(&self) -> Self {
        Self {
            id: FrustumId::new(),
            ..self.clone()
        }
    }

    fn update_eye(&mut self) {
        self.eye = self.obb.center - self.obb.forward() * self.obb.extents.x;
    }
}

impl Frustum for OrientedBoxFrustum {
    fn id(&self) -> FrustumId {
        self.id
    }

    fn eye(&self) -> nalgebra_glm::Vec3 {
        self.eye
    }

    fn near_distance(&self) -> f32 {
        0.0
    }

    fn far_distance(&self) -> f32 {
        self.obb.extents.x * 2.0
    }

    fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.obb.translate(v);
        self.update_eye();
    }

    /// Rotates about the box center; the eye is moved to the new back face.
    fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        let center = self.obb.center;
        self.obb.rotate(rotation, &center);
        self.update_eye();
    }

    fn set_rotation(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        let forward = nalgebra_glm::quat_rotate_vec3(rotation, &self.coords.forward());
        let side = nalgebra_glm::quat_rotate_vec3(rotation, &self.coords.left());
        self.obb.set_axes(forward, side);
        self.update_eye();
    }

    fn transform(&mut self, matrix: &nalgebra_glm::Mat4) {
        let center = self.obb.center;
        let forward = self.obb.forward();
        let side = self.obb.side();
        let forward = (matrix * nalgebra_glm::vec4(forward.x, forward.y, forward.z, 0.0)).xyz();
        let side = (matrix * nalgebra_glm::vec4(side.x, side.y, side.z, 0.0)).xyz();
        if nalgebra_glm::length2(&forward.cross(&side)) < super::tolerance::PARALLEL_EPSILON {
            warn!("transform of frustum {} collapses its axes, keeping orientation", self.id);
        } else {
            self.obb.set_axes(forward, side);
        }
        self.obb.center = (matrix * nalgebra_glm::vec4(center.x, center.y, center.z, 1.0)).xyz();
        self.update_eye();
    }

    fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        self.obb.classify_point(point)
    }

    fn classify_sphere(&self, sphere: &Sphere) -> Result<IntersectionType> {
        Ok(self.obb.classify_sphere(&sphere.center, sphere.radius))
    }

    fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType> {
        Ok(self.obb.classify_aabb(aabb))
    }

    fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType> {
        Ok(self.obb.classify_obb(obb))
    }

    fn classify_plane(&self, plane: &Plane) -> Result<PlaneClassification> {
        Ok(self.obb.classify_plane(plane))
    }

    fn intersects_obb(&self, obb: &OrientedBox) -> Result<bool> {
        Ok(self.obb.intersects_obb(obb))
    }

    fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self.obb.distance_squared(point))
    }

    fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        Ok(self.obb.nearest_point(point))
    }

    fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self.obb.distance_max_squared(point))
    }

    fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        Ok(self.obb.farthest_point(point))
    }

    fn bounding_box(&self) -> Result<AABB> {
        Ok(self.obb.bounding_box())
    }
}
