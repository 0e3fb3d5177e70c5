use std::{f32::consts::TAU, fmt};

use log::{trace, warn};
use once_cell::unsync::OnceCell;

use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    coords::CoordinateSystem,
    error::{FrustumError, Result},
    line::{farthest_point_on_segment, nearest_point_on_segment},
    obb::OrientedBox,
    plane::Plane,
    sat::ViewPyramid,
    tolerance::{ANGLE_EPSILON, DISTANCE_EPSILON},
};

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;
pub const TOP: usize = 2;
pub const BOTTOM: usize = 3;
pub const FRONT: usize = 4;
pub const BACK: usize = 5;

const PLANE_NAMES: [&str; 6] = ["left", "right", "top", "bottom", "front", "back"];

pub const FRONT_RIGHT_TOP: usize = 0;
pub const FRONT_LEFT_TOP: usize = 1;
pub const FRONT_LEFT_BOTTOM: usize = 2;
pub const FRONT_RIGHT_BOTTOM: usize = 3;
pub const BACK_RIGHT_TOP: usize = 4;
pub const BACK_LEFT_TOP: usize = 5;
pub const BACK_LEFT_BOTTOM: usize = 6;
pub const BACK_RIGHT_BOTTOM: usize = 7;

/// The three planes meeting at each corner, in corner order.
const CORNER_PLANES: [[usize; 3]; 8] = [
    [FRONT, RIGHT, TOP],
    [FRONT, LEFT, TOP],
    [FRONT, LEFT, BOTTOM],
    [FRONT, RIGHT, BOTTOM],
    [BACK, RIGHT, TOP],
    [BACK, LEFT, TOP],
    [BACK, LEFT, BOTTOM],
    [BACK, RIGHT, BOTTOM],
];

/// Corner loops bounding each face, in plane order.
const FACES: [[usize; 4]; 6] = [
    [FRONT_LEFT_TOP, BACK_LEFT_TOP, BACK_LEFT_BOTTOM, FRONT_LEFT_BOTTOM],
    [FRONT_RIGHT_TOP, FRONT_RIGHT_BOTTOM, BACK_RIGHT_BOTTOM, BACK_RIGHT_TOP],
    [FRONT_RIGHT_TOP, BACK_RIGHT_TOP, BACK_LEFT_TOP, FRONT_LEFT_TOP],
    [FRONT_RIGHT_BOTTOM, FRONT_LEFT_BOTTOM, BACK_LEFT_BOTTOM, BACK_RIGHT_BOTTOM],
    [FRONT_RIGHT_TOP, FRONT_LEFT_TOP, FRONT_LEFT_BOTTOM, FRONT_RIGHT_BOTTOM],
    [BACK_RIGHT_TOP, BACK_RIGHT_BOTTOM, BACK_LEFT_BOTTOM, BACK_LEFT_TOP],
];

/// Where a hexahedron looks, and how far it is rolled about that direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewOrientation {
    pub direction: nalgebra_glm::Vec3,
    pub roll: f32,
}

/// A closed convex region bounded by six inward-facing planes.
///
/// Corners, eye, orientation, bounding box and the pyramid used by the
/// separating axis test are derived from the planes on first use and
/// dropped whenever a plane changes.
#[derive(Debug, Clone)]
pub struct PlaneHexahedron {
    planes: [Plane; 6],
    coords: CoordinateSystem,

    corners: OnceCell<[nalgebra_glm::Vec3; 8]>,
    eye: OnceCell<nalgebra_glm::Vec3>,
    orientation: OnceCell<ViewOrientation>,
    bounding_box: OnceCell<AABB>,
    pyramid: OnceCell<ViewPyramid>,
}

impl PlaneHexahedron {
    /// Planes are given as [left, right, top, bottom, front, back].
    pub fn new(planes: [Plane; 6], coords: CoordinateSystem) -> Self {
        Self {
            planes,
            coords,
            corners: OnceCell::new(),
            eye: OnceCell::new(),
            orientation: OnceCell::new(),
            bounding_box: OnceCell::new(),
            pyramid: OnceCell::new(),
        }
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    pub fn coords(&self) -> CoordinateSystem {
        self.coords
    }

    pub fn set_plane(&mut self, index: usize, plane: Plane) {
        self.planes[index] = plane;
        self.invalidate();
    }

    pub fn set_planes(&mut self, planes: [Plane; 6]) {
        self.planes = planes;
        self.invalidate();
    }

    /// Drops every derived value.
    pub fn invalidate(&mut self) {
        self.corners = OnceCell::new();
        self.eye = OnceCell::new();
        self.orientation = OnceCell::new();
        self.bounding_box = OnceCell::new();
        self.pyramid = OnceCell::new();
    }

    /// The eight corners, in the order front-right-top, front-left-top,
    /// front-left-bottom, front-right-bottom, then the same for the back.
    pub fn corners(&self) -> Result<&[nalgebra_glm::Vec3; 8]> {
        self.corners.get_or_try_init(|| {
            trace!("recomputing hexahedron corners");
            let mut corners = [nalgebra_glm::Vec3::zeros(); 8];
            for (corner, [a, b, c]) in corners.iter_mut().zip(CORNER_PLANES) {
                *corner = self.intersect_three(a, b, c)?;
            }
            Ok(corners)
        })
    }

    /// Apex shared by the left, right and top planes.
    pub fn eye(&self) -> Result<nalgebra_glm::Vec3> {
        self.eye
            .get_or_try_init(|| {
                trace!("recomputing hexahedron eye");
                self.intersect_three(LEFT, RIGHT, TOP)
            })
            .copied()
    }

    pub fn view_direction(&self) -> Result<ViewOrientation> {
        self.orientation
            .get_or_try_init(|| {
                trace!("recomputing hexahedron view orientation");
                let eye = self.eye()?;
                let back = &self.planes[BACK];
                let to_back = back.project(&eye) - eye;
                let direction = if nalgebra_glm::length2(&to_back)
                    > DISTANCE_EPSILON * DISTANCE_EPSILON
                {
                    to_back.normalize()
                } else {
                    -back.normal()
                };

                let bottom = self.planes[BOTTOM].normal();
                let own_up = (bottom - direction * bottom.dot(&direction)).normalize();
                let natural_up = match self.coords.look_at(&direction, &self.coords.up()) {
                    Some(rotation) => nalgebra_glm::quat_rotate_vec3(&rotation, &self.coords.up()),
                    None => self.coords.up(),
                };
                let roll = direction
                    .dot(&natural_up.cross(&own_up))
                    .atan2(natural_up.dot(&own_up));
                Ok(ViewOrientation { direction, roll })
            })
            .copied()
    }

    pub fn bounding_box(&self) -> Result<AABB> {
        self.bounding_box
            .get_or_try_init(|| {
                trace!("recomputing hexahedron bounding box");
                Ok(AABB::from_points(*self.corners()?))
            })
            .copied()
    }

    /// Eye, axes and extents of the pyramid spanned by this hexahedron.
    pub fn view_pyramid(&self) -> Result<ViewPyramid> {
        self.pyramid
            .get_or_try_init(|| {
                trace!("recomputing hexahedron view pyramid");
                ViewPyramid::from_hexahedron(self)
            })
            .copied()
    }

    /// The six faces as corner loops, in plane order.
    pub fn faces(&self) -> Result<[[nalgebra_glm::Vec3; 4]; 6]> {
        let corners = self.corners()?;
        Ok(FACES.map(|face| face.map(|i| corners[i])))
    }

    pub fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        for plane in self.planes.iter_mut() {
            plane.translate(v);
        }
        self.invalidate();
    }

    pub fn transform(&mut self, matrix: &nalgebra_glm::Mat4, pivot: Option<nalgebra_glm::Vec3>) {
        for plane in self.planes.iter_mut() {
            plane.transform(matrix, pivot);
        }
        self.invalidate();
    }

    pub fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>, pivot: Option<nalgebra_glm::Vec3>) {
        self.transform(&nalgebra_glm::quat_to_mat4(rotation), pivot);
    }

    pub fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        let mut on_boundary = false;
        for plane in self.planes.iter() {
            match plane.classify_point(point) {
                PlaneClassification::Behind => return IntersectionType::Outside,
                PlaneClassification::Coincident => on_boundary = true,
                PlaneClassification::InFront => {}
            }
        }
        if on_boundary {
            IntersectionType::Spanning
        } else {
            IntersectionType::Inside
        }
    }

    pub fn classify_aabb(&self, aabb: &AABB) -> Result<IntersectionType> {
        let bounds = self.bounding_box()?;
        if !bounds.intersects(aabb) {
            return Ok(IntersectionType::Outside);
        }

        let mut in_front = 0;
        for plane in self.planes.iter() {
            match plane.classify_aabb(aabb) {
                PlaneClassification::Behind => return Ok(IntersectionType::Outside),
                PlaneClassification::InFront => in_front += 1,
                PlaneClassification::Coincident => {}
            }
        }
        if in_front == self.planes.len() && !bounds.classify_aabb(aabb).is_outside() {
            return Ok(IntersectionType::Inside);
        }

        if self.corners()?.iter().all(|c| aabb.contains_point(c)) {
            Ok(IntersectionType::Enclosing)
        } else {
            Ok(IntersectionType::Spanning)
        }
    }

    /// Plane distances settle Outside and Inside. Enclosing also needs all
    /// eight corners inside the sphere; a sphere crossing every plane can
    /// still leave corners uncovered, and is then Spanning.
    pub fn classify_sphere(
        &self,
        center: &nalgebra_glm::Vec3,
        radius: f32,
    ) -> Result<IntersectionType> {
        let mut in_front = 0;
        for plane in self.planes.iter() {
            let distance = plane.signed_distance(center);
            if distance <= -radius {
                return Ok(IntersectionType::Outside);
            }
            if distance >= radius {
                in_front += 1;
            }
        }
        if in_front == self.planes.len() {
            return Ok(IntersectionType::Inside);
        }
        let radius_squared = radius * radius;
        if in_front == 0
            && self
                .corners()?
                .iter()
                .all(|c| nalgebra_glm::distance2(c, center) <= radius_squared)
        {
            return Ok(IntersectionType::Enclosing);
        }
        Ok(IntersectionType::Spanning)
    }

    /// Overlap is decided by the separating axis test; overlapping boxes are
    /// then told apart by corner containment.
    pub fn classify_obb(&self, obb: &OrientedBox) -> Result<IntersectionType> {
        if !self.intersects_obb(obb)? {
            return Ok(IntersectionType::Outside);
        }
        if obb
            .corners()
            .iter()
            .all(|c| !self.classify_point(c).is_outside())
        {
            return Ok(IntersectionType::Inside);
        }
        if self.corners()?.iter().all(|c| obb.contains_point(c)) {
            return Ok(IntersectionType::Enclosing);
        }
        Ok(IntersectionType::Spanning)
    }

    pub fn intersects_obb(&self, obb: &OrientedBox) -> Result<bool> {
        Ok(self.view_pyramid()?.intersects_obb(obb))
    }

    pub fn classify_plane(&self, plane: &Plane) -> Result<PlaneClassification> {
        let corners = self.corners()?;
        let sides: Vec<PlaneClassification> =
            corners.iter().map(|c| plane.classify_point(c)).collect();
        if sides.iter().all(|s| *s == PlaneClassification::Behind) {
            Ok(PlaneClassification::Behind)
        } else if sides.iter().all(|s| *s == PlaneClassification::InFront) {
            Ok(PlaneClassification::InFront)
        } else {
            Ok(PlaneClassification::Coincident)
        }
    }

    pub fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self.nearest(point)?.0)
    }

    pub fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        Ok(self.nearest(point)?.1)
    }

    pub fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> Result<f32> {
        Ok(self.farthest(point)?.0)
    }

    pub fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> Result<nalgebra_glm::Vec3> {
        Ok(self.farthest(point)?.1)
    }

    /// Squared distance to, and position of, the closest point of the
    /// region. Points inside are their own nearest point.
    fn nearest(&self, point: &nalgebra_glm::Vec3) -> Result<(f32, nalgebra_glm::Vec3)> {
        if !self.classify_point(point).is_outside() {
            return Ok((0.0, *point));
        }

        let mut best = (f32::MAX, *point);
        for (plane, face) in self.planes.iter().zip(self.faces()?) {
            let projection = plane.project(point);
            let candidate = if projection_inside_face(&face, &plane.normal(), &projection) {
                (nalgebra_glm::distance2(&projection, point), projection)
            } else {
                nearest_on_face_edges(&face, point)
            };
            if candidate.0 < best.0 {
                best = candidate;
                if best.0 <= 0.0 {
                    break;
                }
            }
        }
        Ok(best)
    }

    fn farthest(&self, point: &nalgebra_glm::Vec3) -> Result<(f32, nalgebra_glm::Vec3)> {
        let mut best = (f32::MIN, *point);
        for face in self.faces()? {
            for i in 0..face.len() {
                let far = farthest_point_on_segment(&face[i], &face[(i + 1) % face.len()], point);
                let distance = nalgebra_glm::distance2(&far, point);
                if distance > best.0 {
                    best = (distance, far);
                }
            }
        }
        Ok(best)
    }

    fn intersect_three(&self, a: usize, b: usize, c: usize) -> Result<nalgebra_glm::Vec3> {
        self.planes[a]
            .intersect_plane(&self.planes[b])
            .and_then(|line| self.planes[c].intersect_line(&line))
            .ok_or_else(|| {
                warn!(
                    "planes {}, {} and {} do not converge: {}",
                    PLANE_NAMES[a], PLANE_NAMES[b], PLANE_NAMES[c], self
                );
                FrustumError::PlanesDoNotConverge {
                    first: PLANE_NAMES[a],
                    second: PLANE_NAMES[b],
                    third: PLANE_NAMES[c],
                }
            })
    }
}

/// Sums the signed angles the face edges subtend from `projection`. The loop
/// winds once around interior points and not at all around exterior ones.
fn projection_inside_face(
    face: &[nalgebra_glm::Vec3; 4],
    normal: &nalgebra_glm::Vec3,
    projection: &nalgebra_glm::Vec3,
) -> bool {
    let mut sum = 0.0f32;
    for i in 0..face.len() {
        let a = face[i] - projection;
        let b = face[(i + 1) % face.len()] - projection;
        if nalgebra_glm::length2(&a) <= DISTANCE_EPSILON * DISTANCE_EPSILON
            || nalgebra_glm::length2(&b) <= DISTANCE_EPSILON * DISTANCE_EPSILON
        {
            // Sitting on a corner
            return true;
        }
        sum += normal.dot(&a.cross(&b)).atan2(a.dot(&b));
    }
    (sum.abs() - TAU).abs() < ANGLE_EPSILON
}

fn nearest_on_face_edges(
    face: &[nalgebra_glm::Vec3; 4],
    point: &nalgebra_glm::Vec3,
) -> (f32, nalgebra_glm::Vec3) {
    let mut best = (f32::MAX, *point);
    for i in 0..face.len() {
        let nearest = nearest_point_on_segment(&face[i], &face[(i + 1) % face.len()], point);
        let distance = nalgebra_glm::distance2(&nearest, point);
        if distance < best.0 {
            best = (distance, nearest);
        }
    }
    best
}

impl fmt::Display for PlaneHexahedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaneHexahedron {{")?;
        for (name, plane) in PLANE_NAMES.iter().zip(self.planes.iter()) {
            write!(f, " {}: {}", name, plane)?;
        }
        write!(f, " }}")
    }
}
