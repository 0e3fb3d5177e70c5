//! Separating axis test between a view pyramid and an oriented box.
//!
//! The pyramid is the set of points `eye + s * (near * direction + a * left
//! + b * up)` with `|a| <= half_width`, `|b| <= half_height` and `s` in
//! `[1, far / near]`. Its faces have normals `direction` and the four side
//! normals, and its edges run along `left`, `up` and the four corner rays.
//! Together with the box this gives 26 candidate axes.

use log::debug;

use super::{
    error::Result,
    hexahedron::{
        PlaneHexahedron, BACK_LEFT_BOTTOM, BACK_LEFT_TOP, BACK_RIGHT_BOTTOM, BACK_RIGHT_TOP,
        FRONT_LEFT_BOTTOM, FRONT_LEFT_TOP, FRONT_RIGHT_BOTTOM, FRONT_RIGHT_TOP,
    },
    obb::OrientedBox,
    tolerance::PARALLEL_EPSILON,
};

pub const AXIS_COUNT: usize = 26;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewPyramid {
    pub eye: nalgebra_glm::Vec3,
    pub direction: nalgebra_glm::Vec3,
    pub left: nalgebra_glm::Vec3,
    pub up: nalgebra_glm::Vec3,
    pub near: f32,
    pub far: f32,
    /// Half extents of the near rectangle
    pub half_width: f32,
    pub half_height: f32,
}

impl ViewPyramid {
    pub fn from_hexahedron(hexahedron: &PlaneHexahedron) -> Result<Self> {
        let eye = hexahedron.eye()?;
        let direction = hexahedron.view_direction()?.direction;
        let corners = hexahedron.corners()?;

        let near_center = (corners[FRONT_RIGHT_TOP]
            + corners[FRONT_LEFT_TOP]
            + corners[FRONT_LEFT_BOTTOM]
            + corners[FRONT_RIGHT_BOTTOM])
            * 0.25;
        let far_center = (corners[BACK_RIGHT_TOP]
            + corners[BACK_LEFT_TOP]
            + corners[BACK_LEFT_BOTTOM]
            + corners[BACK_RIGHT_BOTTOM])
            * 0.25;
        let width_edge = corners[FRONT_LEFT_TOP] - corners[FRONT_RIGHT_TOP];
        let height_edge = corners[FRONT_LEFT_TOP] - corners[FRONT_LEFT_BOTTOM];

        Ok(Self {
            eye,
            direction,
            left: width_edge.normalize(),
            up: height_edge.normalize(),
            near: (near_center - eye).dot(&direction),
            far: (far_center - eye).dot(&direction),
            half_width: width_edge.norm() * 0.5,
            half_height: height_edge.norm() * 0.5,
        })
    }

    /// The 26 candidate separating axes against `obb`. Some may be zero when
    /// a box axis is parallel to a pyramid edge.
    pub fn candidate_axes(&self, obb: &OrientedBox) -> Vec<nalgebra_glm::Vec3> {
        let d = self.direction;
        let l = self.left;
        let u = self.up;
        let mut axes = Vec::with_capacity(AXIS_COUNT);

        // Near and far faces
        axes.push(d);

        // Side faces
        axes.push(l * self.near - d * self.half_width);
        axes.push(l * self.near + d * self.half_width);
        axes.push(u * self.near - d * self.half_height);
        axes.push(u * self.near + d * self.half_height);

        // Box faces
        axes.extend_from_slice(obb.axes());

        // Near and far rectangle edges against box edges
        for a in obb.axes() {
            axes.push(l.cross(a));
            axes.push(u.cross(a));
        }

        // Corner rays against box edges
        for (sl, su) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            let ray = l * (sl * self.half_width) + u * (su * self.half_height) + d * self.near;
            for a in obb.axes() {
                axes.push(ray.cross(a));
            }
        }

        axes
    }

    /// Projects both shapes onto `axis` and reports if the intervals are
    /// disjoint.
    pub fn separates(&self, axis: &nalgebra_glm::Vec3, obb: &OrientedBox) -> bool {
        let dd = axis.dot(&(obb.center - self.eye));
        let r = obb.projected_radius(axis);

        let p = self.half_width * axis.dot(&self.left).abs()
            + self.half_height * axis.dot(&self.up).abs();
        let base = self.near * axis.dot(&self.direction);
        let m0 = base - p;
        let m1 = base + p;

        // Stretch the near interval out to the far plane
        let ratio = self.far / self.near;
        let low = if m0 < 0.0 { m0 * ratio } else { m0 };
        let high = if m1 > 0.0 { m1 * ratio } else { m1 };

        dd + r < low || dd - r > high
    }

    pub fn intersects_obb(&self, obb: &OrientedBox) -> bool {
        for (index, axis) in self.candidate_axes(obb).iter().enumerate() {
            if nalgebra_glm::length2(axis) < PARALLEL_EPSILON {
                continue;
            }
            if self.separates(axis, obb) {
                debug!("box at {:?} separated on axis {} ({:?})", obb.center, index, axis);
                return false;
            }
        }
        true
    }
}
