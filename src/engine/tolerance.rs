/// Signed distances within this band of zero count as "on the plane".
pub const DISTANCE_EPSILON: f32 = 1e-4;

/// Slack on the angle-sum test that decides if a projection is inside a face.
pub const ANGLE_EPSILON: f32 = 1e-3;

/// Squared length under which a cross product counts as zero (parallel).
pub const PARALLEL_EPSILON: f32 = 1e-8;
