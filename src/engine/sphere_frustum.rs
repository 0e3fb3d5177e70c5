use log::debug;

use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    error::{FrustumError, Result},
    frustum::Frustum,
    frustum_id::FrustumId,
    obb::OrientedBox,
    plane::Plane,
    sphere::Sphere,
};

/// Perception in every direction up to a fixed range. The eye is the
/// sphere's center.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereFrustum {
    id: FrustumId,
    sphere: Sphere,
}

impl SphereFrustum {
    pub fn new(center: nalgebra_glm::Vec3, radius: f32) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(FrustumError::InvalidParameters(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }
        let frustum = Self {
            id: FrustumId::new(),
            sphere: Sphere::new(center, radius),
        };
        debug!("created sphere frustum {} at {:?} with radius {}", frustum.id, center, radius);
        Ok(frustum)
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn radius(&self) -> f32 {
        self.sphere.radius
    }

    pub fn clone_with_new_identity(&self) -> Self {
        Self {
            id: FrustumId::new(),
            ..self.clone()
        }
    }
}

impl Frustum for SphereFrustum {
    fn id(&self) -> FrustumId {
        self.id
    }

    fn eye(&self) -> nalgebra_glm::Vec3 {
        self.sphere.center
    }

    fn near_distance(&self) -> f32 {
        0.0
    }

    fn far_distance(&self) -> f32 {
        self.sphere.radius
    }

    fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.sphere.translate(v);
    }

    // A sphere turning about its own center is unchanged.
    fn rotate(&mut self, _rotation: &nalgebra_glm::Qua<f32>) {}

    fn set_rotation(&mut self, _rotation: &nalgebra_glm::Qua<f32>) {}

    /// Only the center follows `matrix`; the radius is kept.
    fn transform(&mut self, matrix: &nalgebra_glm::Mat4) {
        let center = self.sphere.center;
        self.sphere.center = (matrix * nalgebra_glm::vec4(center.x, center.y, center.z, 1.0)).xyz();
    }

    fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        self.sphere.classify_point(point)
    }

    fn classify_sphere(&self, sphere: &Sphere) -> Result<IntersectionType> {
        Ok(self.sphere.classify_sphere(&sphere.center, sphere.radius))
    }

    fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType> {
        Ok(self.sphere.classify_aabb(aabb))
    }

    fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType> {
        Ok(self.sphere.classify_obb(obb))
    }

    fn classify_plane(&self, plane: &Plane) -> Result<PlaneClassification> {
        Ok(self.sphere.classify_plane(plane))
    }

    fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self.sphere.distance_squared(point))
    }

    fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        Ok(self.sphere.nearest_point(point))
    }

    fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self.sphere.distance_max_squared(point))
    }

    fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        Ok(self.sphere.farthest_point(point))
    }

    fn bounding_box(&self) -> Result<AABB> {
        Ok(self.sphere.bounding_box())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn frustum() -> SphereFrustum {
        SphereFrustum::new(nalgebra_glm::Vec3::zeros(), 5.0).unwrap()
    }

    #[test]
    fn classifies_points_around_the_surface() {
        let frustum = frustum();
        assert_eq!(
            frustum.classify_point(&nalgebra_glm::vec3(4.0, 0.0, 0.0)),
            IntersectionType::Inside
        );
        assert_eq!(
            frustum.classify_point(&nalgebra_glm::vec3(5.0, 0.0, 0.0)),
            IntersectionType::Spanning
        );
        assert_eq!(
            frustum.classify_point(&nalgebra_glm::vec3(6.0, 0.0, 0.0)),
            IntersectionType::Outside
        );
    }

    #[test]
    fn near_is_zero_and_far_is_the_radius() {
        let frustum = frustum();
        assert_eq!(frustum.near_distance(), 0.0);
        assert_eq!(frustum.far_distance(), 5.0);
        assert_eq!(frustum.eye(), nalgebra_glm::Vec3::zeros());
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(SphereFrustum::new(nalgebra_glm::Vec3::zeros(), 0.0).is_err());
        assert!(SphereFrustum::new(nalgebra_glm::Vec3::zeros(), -1.0).is_err());
    }

    #[test]
    fn eye_follows_translation_and_transform() {
        let mut frustum = frustum();
        frustum.translate(&nalgebra_glm::vec3(1.0, 2.0, 3.0));
        assert_eq!(frustum.eye(), nalgebra_glm::vec3(1.0, 2.0, 3.0));

        frustum.rotate(&nalgebra_glm::quat_angle_axis(1.0, &nalgebra_glm::vec3(0.0, 0.0, 1.0)));
        assert_eq!(frustum.eye(), nalgebra_glm::vec3(1.0, 2.0, 3.0));

        frustum.transform(&nalgebra_glm::translation(&nalgebra_glm::vec3(-1.0, 0.0, 0.0)));
        assert_abs_diff_eq!(
            nalgebra_glm::distance(&frustum.eye(), &nalgebra_glm::vec3(0.0, 2.0, 3.0)),
            0.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn delegates_boxes_and_distances() {
        let frustum = frustum();
        let aabb = AABB::from_center_extents(
            nalgebra_glm::vec3(1.0, 0.0, 0.0),
            nalgebra_glm::vec3(0.5, 0.5, 0.5),
        );
        assert_eq!(frustum.classify_aabb(&aabb).unwrap(), IntersectionType::Inside);
        let obb = OrientedBox::from_aabb(&aabb.translate(nalgebra_glm::vec3(20.0, 0.0, 0.0)));
        assert!(!frustum.intersects_obb(&obb).unwrap());
        assert_abs_diff_eq!(
            frustum.distance_squared(&nalgebra_glm::vec3(0.0, 0.0, 7.0)).unwrap(),
            4.0,
            epsilon = 1e-4
        );
    }
}
