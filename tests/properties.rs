use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use approx::assert_abs_diff_eq;
use perception::{
    CompositeFrustum, DirectionalFrustum, Frustum, FrustumShape, IntersectionType, OrientedBox,
    OrientedBoxFrustum, Plane, PlaneHexahedron, SphereFrustum,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_vec(rng: &mut StdRng, range: f32) -> nalgebra_glm::Vec3 {
    nalgebra_glm::vec3(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

fn random_direction(rng: &mut StdRng) -> nalgebra_glm::Vec3 {
    loop {
        let v = random_vec(rng, 1.0);
        if v.norm() > 0.1 {
            return v.normalize();
        }
    }
}

fn random_rotation(rng: &mut StdRng) -> nalgebra_glm::Qua<f32> {
    nalgebra_glm::quat_angle_axis(rng.gen_range(-3.0..3.0), &random_direction(rng))
}

fn random_directional(rng: &mut StdRng) -> DirectionalFrustum {
    let near = rng.gen_range(0.1..2.0);
    DirectionalFrustum::new(
        random_vec(rng, 50.0),
        random_direction(rng),
        near,
        near + rng.gen_range(1.0..50.0),
        rng.gen_range(0.2..1.3),
        rng.gen_range(0.2..1.3),
    )
    .unwrap()
}

fn assert_vec_eq(a: nalgebra_glm::Vec3, b: nalgebra_glm::Vec3, epsilon: f32) {
    assert!(
        nalgebra_glm::distance(&a, &b) <= epsilon,
        "{:?} and {:?} differ by more than {}",
        a,
        b,
        epsilon
    );
}

#[test]
fn pyramid_scenario() {
    init_logger();
    let frustum = DirectionalFrustum::new(
        nalgebra_glm::Vec3::zeros(),
        nalgebra_glm::vec3(1.0, 0.0, 0.0),
        1.0,
        10.0,
        FRAC_PI_4,
        FRAC_PI_6,
    )
    .unwrap();
    assert_eq!(
        frustum.classify_point(&nalgebra_glm::vec3(5.0, 0.0, 0.0)),
        IntersectionType::Inside
    );
    assert_eq!(
        frustum.classify_point(&nalgebra_glm::vec3(-1.0, 0.0, 0.0)),
        IntersectionType::Outside
    );
    assert_eq!(
        frustum.classify_point(&nalgebra_glm::vec3(20.0, 0.0, 0.0)),
        IntersectionType::Outside
    );
}

#[test]
fn sphere_scenario() {
    init_logger();
    let frustum = SphereFrustum::new(nalgebra_glm::Vec3::zeros(), 5.0).unwrap();
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
fn plane_intersection_is_symmetric() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let a = Plane::new(random_direction(&mut rng), rng.gen_range(-10.0..10.0));
        let b = Plane::new(random_direction(&mut rng), rng.gen_range(-10.0..10.0));
        if a.normal().cross(&b.normal()).norm() < 0.1 {
            // Nearly parallel planes meet too far out for a tight comparison
            continue;
        }
        let (Some(ab), Some(ba)) = (a.intersect_plane(&b), b.intersect_plane(&a)) else {
            continue;
        };
        assert_abs_diff_eq!(ab.dir.dot(&ba.dir).abs(), 1.0, epsilon = 1e-4);
        // Each line's origin lies on the other line
        assert!(ba.distance_squared(&ab.origin) < 1e-3, "{} vs {}", a, b);
        assert!(ab.distance_squared(&ba.origin) < 1e-3, "{} vs {}", a, b);
    }
}

#[test]
fn caches_match_a_fresh_computation() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let frustum = random_directional(&mut rng);
        let mut hexahedron = frustum.hexahedron().clone();

        let first = *hexahedron.corners().unwrap();
        assert_eq!(&first, hexahedron.corners().unwrap());
        let _ = hexahedron.eye().unwrap();
        let _ = hexahedron.view_direction().unwrap();
        let _ = hexahedron.bounding_box().unwrap();

        hexahedron.translate(&random_vec(&mut rng, 10.0));
        hexahedron.rotate(&random_rotation(&mut rng), Some(random_vec(&mut rng, 10.0)));

        let fresh = PlaneHexahedron::new(*hexahedron.planes(), hexahedron.coords());
        let corners = hexahedron.corners().unwrap();
        for (cached, expected) in corners.iter().zip(fresh.corners().unwrap()) {
            assert_vec_eq(*cached, *expected, 1e-3);
        }
        assert_vec_eq(hexahedron.eye().unwrap(), fresh.eye().unwrap(), 1e-3);
        assert_vec_eq(
            hexahedron.view_direction().unwrap().direction,
            fresh.view_direction().unwrap().direction,
            1e-4,
        );
        let (cached, expected) = (
            hexahedron.bounding_box().unwrap(),
            fresh.bounding_box().unwrap(),
        );
        assert_vec_eq(cached.min, expected.min, 1e-3);
        assert_vec_eq(cached.max, expected.max, 1e-3);
    }
}

#[test]
fn construction_round_trips() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let eye = random_vec(&mut rng, 50.0);
        let direction = random_direction(&mut rng);
        let near = rng.gen_range(0.1..2.0);
        let far = near + rng.gen_range(1.0..50.0);
        let frustum = DirectionalFrustum::new(
            eye,
            direction,
            near,
            far,
            rng.gen_range(0.2..1.3),
            rng.gen_range(0.2..1.3),
        )
        .unwrap();

        assert_eq!(frustum.eye(), eye);
        assert_eq!(frustum.far_distance(), far);
        assert_eq!(frustum.near_distance(), near);
        assert_vec_eq(frustum.hexahedron().eye().unwrap(), eye, 1e-2);
        assert_vec_eq(frustum.hexahedron().view_direction().unwrap().direction, direction, 1e-3);
    }
}

#[test]
fn inside_points_are_their_own_nearest_point() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(17);
    let eye = nalgebra_glm::Vec3::zeros();
    let forward = nalgebra_glm::vec3(1.0, 0.0, 0.0);
    let shapes: Vec<FrustumShape> = vec![
        DirectionalFrustum::new(eye, forward, 1.0, 10.0, FRAC_PI_4, FRAC_PI_6).unwrap().into(),
        SphereFrustum::new(eye, 5.0).unwrap().into(),
        OrientedBoxFrustum::new(eye, nalgebra_glm::vec3(1.0, 1.0, 0.0), 10.0, 4.0, 2.0)
            .unwrap()
            .into(),
        CompositeFrustum::new(eye, forward, 2.0, 1.0, 10.0, FRAC_PI_4, FRAC_PI_6).unwrap().into(),
    ];

    for shape in shapes.iter() {
        let mut inside = 0;
        for _ in 0..2000 {
            let point = random_vec(&mut rng, 10.0);
            if shape.classify_point(&point) == IntersectionType::Inside {
                inside += 1;
                assert_eq!(shape.distance_squared(&point).unwrap(), 0.0, "{:?}", shape);
                assert_eq!(shape.nearest_point(&point).unwrap(), point, "{:?}", shape);
            } else if shape.classify_point(&point) == IntersectionType::Outside {
                assert!(
                    shape.distance_squared(&point).unwrap() > 0.0,
                    "{:?} at {:?}",
                    shape,
                    point
                );
            }
        }
        assert!(inside > 0, "no sample landed inside {:?}", shape);
    }
}

#[test]
fn boxes_beyond_the_far_plane_never_intersect() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..200 {
        let frustum = random_directional(&mut rng);
        let extents = nalgebra_glm::vec3(
            rng.gen_range(0.1..5.0),
            rng.gen_range(0.1..5.0),
            rng.gen_range(0.1..5.0),
        );
        let reach = frustum.far_distance() + extents.norm() + rng.gen_range(0.1..20.0);
        let sideways = random_vec(&mut rng, 30.0);
        let sideways =
            sideways - frustum.view_direction() * sideways.dot(&frustum.view_direction());
        let obb = OrientedBox::new(
            frustum.eye() + frustum.view_direction() * reach + sideways,
            random_direction(&mut rng),
            random_direction(&mut rng),
            extents,
        );

        assert!(!frustum.intersects_obb(&obb).unwrap(), "{:?} against {:?}", frustum, obb);
        assert_eq!(frustum.classify_obb(&obb).unwrap(), IntersectionType::Outside);
    }
}

#[test]
fn boxes_around_an_inside_point_always_intersect() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let frustum = random_directional(&mut rng);
        // A point on the view axis between near and far is inside
        let depth = rng.gen_range(frustum.near_distance() + 0.01..frustum.far_distance() - 0.01);
        let center = frustum.eye() + frustum.view_direction() * depth;
        let obb = OrientedBox::new(
            center,
            random_direction(&mut rng),
            random_direction(&mut rng),
            nalgebra_glm::vec3(
                rng.gen_range(0.1..5.0),
                rng.gen_range(0.1..5.0),
                rng.gen_range(0.1..5.0),
            ),
        );
        assert!(frustum.intersects_obb(&obb).unwrap(), "{:?} against {:?}", frustum, obb);
    }
}

#[test]
fn composite_is_the_union_of_its_parts() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..20 {
        let mut composite = CompositeFrustum::new(
            random_vec(&mut rng, 20.0),
            random_direction(&mut rng),
            rng.gen_range(0.5..4.0),
            rng.gen_range(0.1..1.0),
            rng.gen_range(5.0..30.0),
            rng.gen_range(0.2..1.3),
            rng.gen_range(0.2..1.3),
        )
        .unwrap();
        composite.rotate(&random_rotation(&mut rng));

        for _ in 0..200 {
            let point = composite.eye() + random_vec(&mut rng, 30.0);
            let in_sphere =
                composite.near_field().classify_point(&point) == IntersectionType::Inside;
            let in_pyramid =
                composite.far_field().classify_point(&point) == IntersectionType::Inside;
            assert_eq!(
                composite.classify_point(&point) == IntersectionType::Inside,
                in_sphere || in_pyramid
            );
        }
    }
}

#[test]
fn moved_frustums_classify_like_fresh_ones() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..20 {
        let mut moved = random_directional(&mut rng);
        moved.translate(&random_vec(&mut rng, 10.0));
        moved.rotate(&random_rotation(&mut rng));

        let fresh = DirectionalFrustum::new(
            moved.eye(),
            moved.view_direction(),
            moved.near_distance(),
            moved.far_distance(),
            moved.horizontal_half_angle(),
            moved.vertical_half_angle(),
        )
        .unwrap();
        // Roll aside, both look the same way from the same eye
        for _ in 0..100 {
            let depth = rng.gen_range(moved.near_distance() + 0.01..moved.far_distance() - 0.01);
            let point = moved.eye() + moved.view_direction() * depth;
            assert_eq!(moved.classify_point(&point), IntersectionType::Inside);
            assert_eq!(fresh.classify_point(&point), IntersectionType::Inside);
        }
    }
}
