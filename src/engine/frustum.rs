use super::{
    aabb::AABB,
    box_frustum::OrientedBoxFrustum,
    classification::{IntersectionType, PlaneClassification},
    composite::CompositeFrustum,
    directional::DirectionalFrustum,
    error::{FrustumError, Result},
    frustum_id::FrustumId,
    obb::OrientedBox,
    plane::Plane,
    sphere::Sphere,
    sphere_frustum::SphereFrustum,
};

/// A perception volume anchored at an observer's eye.
///
/// Queries that need derived geometry return `Result`, since a malformed
/// volume has no meaningful answer. Point classification only looks at the
/// defining shape and never fails.
pub trait Frustum {
    fn id(&self) -> FrustumId;
    fn eye(&self) -> nalgebra_glm::Vec3;
    fn near_distance(&self) -> f32;
    fn far_distance(&self) -> f32;

    fn translate(&mut self, v: &nalgebra_glm::Vec3);
    /// Rotates the volume by `rotation` on top of its current orientation.
    fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>);
    /// Replaces the current orientation with `rotation`.
    fn set_rotation(&mut self, rotation: &nalgebra_glm::Qua<f32>);
    fn transform(&mut self, matrix: &nalgebra_glm::Mat4);

    fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType;
    fn classify_sphere(&self, sphere: &Sphere) -> Result<IntersectionType>;
    fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType>;
    fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType>;
    /// Which side of `plane` the whole volume lies on.
    fn classify_plane(&self, plane: &Plane) -> Result<PlaneClassification>;

    fn intersects_point(&self, point: &nalgebra_glm::Vec3) -> bool {
        !self.classify_point(point).is_outside()
    }

    fn intersects_sphere(&self, sphere: &Sphere) -> Result<bool> {
        Ok(!self.classify_sphere(sphere)?.is_outside())
    }

    fn intersects_aabb(&self, aabb: &AABB) -> Result<bool> {
        Ok(!self.classify_aabb(aabb)?.is_outside())
    }

    fn intersects_obb(&self, obb: &OrientedBox) -> Result<bool> {
        Ok(!self.classify_obb(obb)?.is_outside())
    }

    fn intersects_plane(&self, plane: &Plane) -> Result<bool> {
        Ok(self.classify_plane(plane)? == PlaneClassification::Coincident)
    }

    fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32>;
    fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3>;
    fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32>;
    fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3>;

    fn bounding_box(&self) -> Result<AABB>;

    /// Perception volumes are three dimensional; flattening them is left to
    /// callers that know which plane to flatten onto.
    fn to_bounds_2d(&self) -> Result<(nalgebra_glm::Vec2, nalgebra_glm::Vec2)> {
        Err(FrustumError::Unsupported("a 3D frustum has no 2D bounds"))
    }
}

/// Every kind of perception volume.
#[derive(Debug, Clone)]
pub enum FrustumShape {
    Directional(DirectionalFrustum),
    Sphere(SphereFrustum),
    OrientedBox(OrientedBoxFrustum),
    Composite(CompositeFrustum),
}

macro_rules! dispatch {
    ($self:ident, $frustum:ident => $body:expr) => {
        match $self {
            FrustumShape::Directional($frustum) => $body,
            FrustumShape::Sphere($frustum) => $body,
            FrustumShape::OrientedBox($frustum) => $body,
            FrustumShape::Composite($frustum) => $body,
        }
    };
}

impl FrustumShape {
    /// A copy describing a different observer.
    pub fn clone_with_new_identity(&self) -> Self {
        match self {
            FrustumShape::Directional(f) => FrustumShape::Directional(f.clone_with_new_identity()),
            FrustumShape::Sphere(f) => FrustumShape::Sphere(f.clone_with_new_identity()),
            FrustumShape::OrientedBox(f) => FrustumShape::OrientedBox(f.clone_with_new_identity()),
            FrustumShape::Composite(f) => FrustumShape::Composite(f.clone_with_new_identity()),
        }
    }
}

impl Frustum for FrustumShape {
    fn id(&self) -> FrustumId {
        dispatch!(self, f => f.id())
    }

    fn eye(&self) -> nalgebra_glm::Vec3 {
        dispatch!(self, f => f.eye())
    }

    fn near_distance(&self) -> f32 {
        dispatch!(self, f => f.near_distance())
    }

    fn far_distance(&self) -> f32 {
        dispatch!(self, f => f.far_distance())
    }

    fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        dispatch!(self, f => f.translate(v))
    }

    fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        dispatch!(self, f => f.rotate(rotation))
    }

    fn set_rotation(&mut self, rotation: &nalgebra_glm::Qua<f32>) {
        dispatch!(self, f => f.set_rotation(rotation))
    }

    fn transform(&mut self, matrix: &nalgebra_glm::Mat4) {
        dispatch!(self, f => f.transform(matrix))
    }

    fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        dispatch!(self, f => f.classify_point(point))
    }

    fn classify_sphere(&self, sphere: &Sphere) -> Result<IntersectionType> {
        dispatch!(self, f => f.classify_sphere(sphere))
    }

    fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType> {
        dispatch!(self, f => f.classify_aabb(aabb))
    }

    fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType> {
        dispatch!(self, f => f.classify_obb(obb))
    }

    fn classify_plane(&self, plane: &Plane) -> Result<PlaneClassification> {
        dispatch!(self, f => f.classify_plane(plane))
    }

    fn intersects_point(&self, point: &nalgebra_glm::Vec3) -> bool {
        dispatch!(self, f => f.intersects_point(point))
    }

    fn intersects_sphere(&self, sphere: &Sphere) -> Result<bool> {
        dispatch!(self, f => f.intersects_sphere(sphere))
    }

    fn intersects_aabb(&self, aabb: &AABB) -> Result<bool> {
        dispatch!(self, f => f.intersects_aabb(aabb))
    }

    fn intersects_obb(&self, obb: &OrientedBox) -> Result<bool> {
        dispatch!(self, f => f.intersects_obb(obb))
    }

    fn intersects_plane(&self, plane: &Plane) -> Result<bool> {
        dispatch!(self, f => f.intersects_plane(plane))
    }

    fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        dispatch!(self, f => f.distance_squared(point))
    }

    fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        dispatch!(self, f => f.nearest_point(point))
    }

    fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        dispatch!(self, f => f.distance_max_squared(point))
    }

    fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        dispatch!(self, f => f.farthest_point(point))
    }

    fn bounding_box(&self) -> Result<AABB> {
        dispatch!(self, f => f.bounding_box())
    }
}

impl From<DirectionalFrustum> for FrustumShape {
    fn from(frustum: DirectionalFrustum) -> Self {
        FrustumShape::Directional(frustum)
    }
}

impl From<SphereFrustum> for FrustumShape {
    fn from(frustum: SphereFrustum) -> Self {
        FrustumShape::Sphere(frustum)
    }
}

impl From<OrientedBoxFrustum> for FrustumShape {
    fn from(frustum: OrientedBoxFrustum) -> Self {
        FrustumShape::OrientedBox(frustum)
    }
}

impl From<CompositeFrustum> for FrustumShape {
    fn from(frustum: CompositeFrustum) -> Self {
        FrustumShape::Composite(frustum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Vec<FrustumShape> {
        let eye = nalgebra_glm::Vec3::zeros();
        let forward = nalgebra_glm::vec3(1.0, 0.0, 0.0);
        let half = std::f32::consts::FRAC_PI_4;
        vec![
            DirectionalFrustum::new(eye, forward, 1.0, 10.0, half, half).unwrap().into(),
            SphereFrustum::new(eye, 5.0).unwrap().into(),
            OrientedBoxFrustum::new(eye, forward, 10.0, 4.0, 2.0).unwrap().into(),
            CompositeFrustum::new(eye, forward, 2.0, 1.0, 10.0, half, half).unwrap().into(),
        ]
    }

    #[test]
    fn every_shape_sees_a_point_ahead() {
        for shape in shapes() {
            assert!(shape.intersects_point(&nalgebra_glm::vec3(3.0, 0.0, 0.0)), "{:?}", shape);
        }
    }

    #[test]
    fn no_shape_has_2d_bounds() {
        for shape in shapes() {
            assert!(matches!(shape.to_bounds_2d(), Err(FrustumError::Unsupported(_))));
        }
    }

    #[test]
    fn clone_keeps_identity_and_renewal_replaces_it() {
        for shape in shapes() {
            assert_eq!(shape.clone().id(), shape.id());
            assert_ne!(shape.clone_with_new_identity().id(), shape.id());
        }
    }

    #[test]
    fn translating_through_the_enum_moves_the_eye() {
        for mut shape in shapes() {
            let before = shape.eye();
            shape.translate(&nalgebra_glm::vec3(0.0, 0.0, 3.0));
            assert!((shape.eye().z - before.z - 3.0).abs() < 1e-4, "{:?}", shape);
        }
    }
}
