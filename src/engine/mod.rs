pub mod aabb;
pub mod box_frustum;
pub mod classification;
pub mod composite;
pub mod coords;
pub mod directional;
pub mod error;
pub mod frustum;
pub mod frustum_id;
pub mod hexahedron;
pub mod line;
pub mod obb;
pub mod plane;
pub mod sat;
pub mod sphere;
pub mod sphere_frustum;
pub mod tolerance;
