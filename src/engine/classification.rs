/// How a tested region relates to a shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// No overlap at all
    Outside,
    /// The tested region lies wholly inside the shape
    Inside,
    /// The shape lies wholly inside the tested region
    Enclosing,
    /// Partial overlap, or contact on the boundary
    Spanning,
    /// The tested region and the shape are the same
    Same,
}

/// Which side of a plane something lies on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneClassification {
    Behind,
    Coincident,
    InFront,
}

impl IntersectionType {
    /// Combines the classifications of one region against two shapes into
    /// the classification against their union.
    ///
    /// `Inside` against either shape means inside the union. A region equal
    /// to one shape stays `Same` only when the other shape adds nothing to
    /// it. Two enclosed shapes keep the union enclosed, two misses stay a
    /// miss, and every other pair overlaps only partially.
    pub fn or(self, other: IntersectionType) -> IntersectionType {
        use IntersectionType::*;
        match (self, other) {
            (Inside, _) | (_, Inside) => Inside,
            (Same, Same) | (Same, Enclosing) | (Enclosing, Same) => Same,
            (Same, _) | (_, Same) => Inside,
            (Enclosing, Enclosing) => Enclosing,
            (Outside, Outside) => Outside,
            _ => Spanning,
        }
    }

    /// Swaps the roles of region and shape.
    pub fn invert(self) -> IntersectionType {
        match self {
            IntersectionType::Inside => IntersectionType::Enclosing,
            IntersectionType::Enclosing => IntersectionType::Inside,
            other => other,
        }
    }

    pub fn is_outside(self) -> bool {
        self == IntersectionType::Outside
    }
}
