/// The ambient axis convention frustums are built in.
///
/// Every frustum is first synthesized looking along `forward()`, with its
/// side along `left()` and its top along `up()`, and then oriented.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CoordinateSystem {
    /// Right handed, x forward, y left, z up
    #[default]
    RightHandZUp,
    /// Right handed, x forward, -z left, y up
    RightHandYUp,
}

impl CoordinateSystem {
    pub fn forward(&self) -> nalgebra_glm::Vec3 {
        nalgebra_glm::vec3(1.0, 0.0, 0.0)
    }

    pub fn left(&self) -> nalgebra_glm::Vec3 {
        match self {
            CoordinateSystem::RightHandZUp => nalgebra_glm::vec3(0.0, 1.0, 0.0),
            CoordinateSystem::RightHandYUp => nalgebra_glm::vec3(0.0, 0.0, -1.0),
        }
    }

    pub fn up(&self) -> nalgebra_glm::Vec3 {
        match self {
            CoordinateSystem::RightHandZUp => nalgebra_glm::vec3(0.0, 0.0, 1.0),
            CoordinateSystem::RightHandYUp => nalgebra_glm::vec3(0.0, 1.0, 0.0),
        }
    }

    /// Rotation taking this convention's (forward, left, up) frame onto the
    /// frame looking along `direction` with the top as close to `up` as
    /// possible. Returns `None` for a zero direction.
    pub fn look_at(
        &self,
        direction: &nalgebra_glm::Vec3,
        up: &nalgebra_glm::Vec3,
    ) -> Option<nalgebra_glm::Qua<f32>> {
        if nalgebra_glm::length2(direction) < super::tolerance::PARALLEL_EPSILON {
            return None;
        }
        let forward = direction.normalize();
        let mut left = up.cross(&forward);
        if nalgebra_glm::length2(&left) < super::tolerance::PARALLEL_EPSILON {
            // Looking straight along the up axis, any side will do
            left = self.left() - forward * self.left().dot(&forward);
            if nalgebra_glm::length2(&left) < super::tolerance::PARALLEL_EPSILON {
                left = self.up() - forward * self.up().dot(&forward);
            }
        }
        let left = left.normalize();
        let top = forward.cross(&left);

        let world = nalgebra_glm::Mat3::from_columns(&[forward, left, top]);
        let canonical = nalgebra_glm::Mat3::from_columns(&[self.forward(), self.left(), self.up()]);
        let rotation = world * canonical.transpose();
        Some(nalgebra_glm::quat_normalize(&nalgebra_glm::mat3_to_quat(
            &rotation,
        )))
    }
}
