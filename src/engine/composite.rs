use log::{debug, trace};
use once_cell::unsync::OnceCell;

use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    coords::CoordinateSystem,
    directional::DirectionalFrustum,
    error::{FrustumError, Result},
    frustum::Frustum,
    frustum_id::FrustumId,
    obb::OrientedBox,
    plane::Plane,
    sphere::Sphere,
    sphere_frustum::SphereFrustum,
};

/// A small sphere of close awareness around the eye, united with a view
/// pyramid reaching further out.
///
/// Both parts are owned and always move together, so they describe the same
/// observer. Only the union's bounding box is cached.
#[derive(Debug, Clone)]
pub struct CompositeFrustum {
    id: FrustumId,
    near_field: SphereFrustum,
    far_field: DirectionalFrustum,
    bounding_box: OnceCell<AABB>,
}

impl CompositeFrustum {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        eye: nalgebra_glm::Vec3,
        direction: nalgebra_glm::Vec3,
        near_radius: f32,
        near: f32,
        far: f32,
        horizontal_half_angle: f32,
        vertical_half_angle: f32,
    ) -> Result<Self> {
        Self::with_coords(
            eye,
            direction,
            near_radius,
            near,
            far,
            horizontal_half_angle,
            vertical_half_angle,
            CoordinateSystem::default(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_coords(
        eye: nalgebra_glm::Vec3,
        direction: nalgebra_glm::Vec3,
        near_radius: f32,
        near: f32,
        far: f32,
        horizontal_half_angle: f32,
        vertical_half_angle: f32,
        coords: CoordinateSystem,
    ) -> Result<Self> {
        let near_field = SphereFrustum::new(eye, near_radius)?;
        let far_field = DirectionalFrustum::with_coords(
            eye,
            direction,
            near,
            far,
            horizontal_half_angle,
            vertical_half_angle,
            coords,
        )?;
        Ok(Self::from_parts(near_field, far_field))
    }

    /// Joins two existing shapes. The sphere is moved onto the pyramid's eye.
    pub fn from_parts(mut near_field: SphereFrustum, far_field: DirectionalFrustum) -> Self {
        let offset = far_field.eye() - near_field.eye();
        near_field.translate(&offset);
        let composite = Self {
            id: FrustumId::new(),
            near_field,
            far_field,
            bounding_box: OnceCell::new(),
        };
        debug!(
            "created composite frustum {} from sphere {} and pyramid {}",
            composite.id,
            composite.near_field.id(),
            composite.far_field.id()
        );
        composite
    }

    pub fn near_field(&self) -> &SphereFrustum {
        &self.near_field
    }

    pub fn far_field(&self) -> &DirectionalFrustum {
        &self.far_field
    }

    pub fn clone_with_new_identity(&self) -> Self {
        Self {
            id: FrustumId::new(),
            near_field: self.near_field.clone_with_new_identity(),
            far_field: self.far_field.clone_with_new_identity(),
            bounding_box: self.bounding_box.clone(),
        }
    }

    fn invalidate(&mut self) {
        self.bounding_box = OnceCell::new();
    }

    /// Classification against the union. A region inside either part is
    /// inside the union, so the far field is skipped in that case.
    fn union<F>(&self, classify: F) -> Result<IntersectionType>
    where
        F: Fn(&dyn Frustum) -> Result<IntersectionType>,
    {
        let near = classify(&self.near_field)?;
        if near == IntersectionType::Inside {
            return Ok(near);
        }
        Ok(near.or(classify(&self.far_field)?))
    }

    /// Nearest or farthest candidate of the two parts, keyed by squared
    /// distance to `point`.
    fn pick<F>(
        &self,
        point: &nalgebra_glm::Vec3,
        locate: F,
        farthest: bool,
    ) -> Result<nalgebra_glm::Vec3>
    where
        F: Fn(&dyn Frustum) -> Result<nalgebra_glm::Vec3>,
    {
        let a = locate(&self.near_field)?;
        let b = locate(&self.far_field)?;
        let closer_a = nalgebra_glm::distance2(&a, point) <= nalgebra_glm::distance2(&b, point);
        Ok(if closer_a != farthest { a } else { b })
    }
}

impl Frustum for CompositeFrustum {
    fn id(&self) -> FrustumId {
        self.id
    }

    fn eye(&self) -> nalgebra_glm::Vec3 {
        self.far_field.eye()
    }

    fn near_distance(&self) -> f32 {
        self.near_field.near_distance()
    }

    fn far_distance(&self) -> f32 {
        self.near_field.far_distance().max(self.far_field.far_distance())
    }

    fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.near_field.translate(v);
        self.far_field.translate(v);
        self.invalidate();
    }

    /// Rotates about the shared eye, which leaves the sphere in place.
    fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        self.near_field.rotate(rotation);
        self.far_field.rotate(rotation);
        self.invalidate();
    }

    fn set_rotation(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        self.near_field.set_rotation(rotation);
        self.far_field.set_rotation(rotation);
        self.invalidate();
    }

    fn transform(&mut self, matrix: &nalgebra_glm::Mat4) {
        self.near_field.transform(matrix);
        self.far_field.transform(matrix);
        self.invalidate();
    }

    fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        let near = self.near_field.classify_point(point);
        if near == IntersectionType::Inside {
            return near;
        }
        near.or(self.far_field.classify_point(point))
    }

    fn classify_sphere(&self, sphere: &Sphere) -> Result<IntersectionType> {
        self.union(|part| part.classify_sphere(sphere))
    }

    fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType> {
        self.union(|part| part.classify_aabb(aabb))
    }

    fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType> {
        self.union(|part| part.classify_obb(obb))
    }

    fn classify_plane(&self, _plane: &Plane) -> Result<PlaneClassification> {
        Err(FrustumError::Unsupported("plane classification of a composite frustum"))
    }

    fn intersects_point(&self, point: &nalgebra_glm::Vec3) -> bool {
        self.near_field.intersects_point(point) || self.far_field.intersects_point(point)
    }

    fn intersects_sphere(&self, sphere: &Sphere) -> Result<bool> {
        Ok(self.near_field.intersects_sphere(sphere)? || self.far_field.intersects_sphere(sphere)?)
    }

    fn intersects_aabb(&self, aabb: &AABB) -> Result<bool> {
        Ok(self.near_field.intersects_aabb(aabb)? || self.far_field.intersects_aabb(aabb)?)
    }

    fn intersects_obb(&self, obb: &OrientedBox) -> Result<bool> {
        Ok(self.near_field.intersects_obb(obb)? || self.far_field.intersects_obb(obb)?)
    }

    fn intersects_plane(&self, plane: &Plane) -> Result<bool> {
        Ok(self.near_field.intersects_plane(plane)? || self.far_field.intersects_plane(plane)?)
    }

    fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self
            .near_field
            .distance_squared(point)?
            .min(self.far_field.distance_squared(point)?))
    }

    fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        self.pick(point, |part| part.nearest_point(point), false)
    }

    fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self
            .near_field
            .distance_max_squared(point)?
            .max(self.far_field.distance_max_squared(point)?))
    }

    fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        self.pick(point, |part| part.farthest_point(point), true)
    }

    fn bounding_box(&self) -> Result<AABB> {
        self.bounding_box
            .get_or_try_init(|| {
                trace!("recomputing composite bounding box");
                Ok(self
                    .near_field
                    .bounding_box()?
                    .union(self.far_field.bounding_box()?))
            })
            .copied()
    }
}
