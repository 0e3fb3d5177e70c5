//! Perception volumes for agents and sensors.
//!
//! A perception volume ("frustum") is anchored at an observer's eye and
//! classifies points, spheres, axis-aligned boxes and oriented boxes
//! against the region the observer can perceive. Four shapes are provided:
//! a six-plane view pyramid, a sphere, an oriented box and a composite of
//! a near sphere with a far pyramid.

pub mod engine;

pub use engine::{
    aabb::AABB,
    box_frustum::OrientedBoxFrustum,
    classification::{IntersectionType, PlaneClassification},
    composite::CompositeFrustum,
    coords::CoordinateSystem,
    directional::DirectionalFrustum,
    error::{FrustumError, Result},
    frustum::{Frustum, FrustumShape},
    frustum_id::FrustumId,
    hexahedron::{PlaneHexahedron, ViewOrientation},
    line::Line,
    obb::OrientedBox,
    plane::Plane,
    sphere::Sphere,
    sphere_frustum::SphereFrustum,
};
