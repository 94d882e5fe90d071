mod support;

use polycut::{Solid, bsp::Node, float_types::Real};
use nalgebra::{Point3, Vector3};

fn unit_cube() -> Solid<()> {
    Solid::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), None)
}

#[test]
fn build_then_flatten_preserves_split_free_input() {
    // A cube's faces never straddle each other's planes, so building a
    // tree and flattening it back must keep all six quads intact.
    let cube = unit_cube();
    let node = Node::from_polygons(&cube.polygons);

    let flattened = node.all_polygons();
    assert_eq!(flattened.len(), 6);
    for poly in &flattened {
        assert_eq!(poly.vertices.len(), 4);
    }

    // The set of face planes survives the round trip.
    let mut offsets: Vec<(Real, Real, Real, Real)> = flattened
        .iter()
        .map(|p| {
            let n = p.plane.normal();
            (n.x, n.y, n.z, p.plane.offset())
        })
        .collect();
    offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());
    offsets.dedup();
    assert_eq!(offsets.len(), 6);
}

#[test]
fn build_splits_spanning_polygons_into_subtrees() {
    let cube = unit_cube();
    let node = Node::from_polygons(&cube.polygons);

    // First face adopted the root plane; the rest distribute below it.
    assert!(node.plane.is_some());
    assert!(node.front.is_some() || node.back.is_some());
}

#[test]
fn invert_twice_restores_the_tree() {
    let cube = unit_cube();
    let mut node = Node::from_polygons(&cube.polygons);

    node.invert();
    for poly in node.all_polygons() {
        // Every cube face normal is axis-aligned; inversion points them
        // all inward.
        let n = poly.vertices[0].normal;
        let centroid = poly
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / poly.vertices.len() as Real;
        assert!(n.dot(&centroid) < 0.0, "normal should point inward");
    }

    node.invert();
    let restored = node.all_polygons();
    assert_eq!(restored.len(), 6);
    for poly in &restored {
        let n = poly.vertices[0].normal;
        let centroid = poly
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / poly.vertices.len() as Real;
        assert!(n.dot(&centroid) > 0.0, "normal should point outward again");
    }
}

#[test]
fn clip_polygons_drops_geometry_inside_the_solid() {
    let cube = unit_cube();
    let node = Node::from_polygons(&cube.polygons);

    // A small square hovering inside the cube is swallowed whole.
    let inside = Solid::<()>::cube(Point3::origin(), Vector3::new(0.2, 0.2, 0.2), None);
    let kept = node.clip_polygons(&inside.polygons);
    assert!(kept.is_empty());

    // The same square well outside survives untouched.
    let outside =
        Solid::<()>::cube(Point3::new(5.0, 0.0, 0.0), Vector3::new(0.2, 0.2, 0.2), None);
    let kept = node.clip_polygons(&outside.polygons);
    assert_eq!(kept.len(), 6);
}

#[test]
fn clip_polygons_trims_straddling_geometry() {
    let cube = unit_cube();
    let node = Node::from_polygons(&cube.polygons);

    // A cube half in, half out: the clipped polygons all stay outside.
    let straddling =
        Solid::<()>::cube(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5), None);
    let kept = node.clip_polygons(&straddling.polygons);
    assert!(!kept.is_empty());
    for poly in &kept {
        for v in &poly.vertices {
            assert!(v.pos.x >= 1.0 - 1e-9, "{} is inside the clip solid", v.pos);
        }
    }
}

#[test]
fn clip_to_clips_every_node_of_the_tree() {
    let a = unit_cube();
    let b = Solid::<()>::cube(Point3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0), None);

    let mut a_tree = Node::from_polygons(&a.polygons);
    let b_tree = Node::from_polygons(&b.polygons);
    a_tree.clip_to(&b_tree);

    // No surviving polygon may sit strictly inside b's open interior
    // (x in (0, 2), |y| < 1, |z| < 1). Faces coplanar with b's boundary
    // legitimately survive through the coplanar-front channel.
    for poly in a_tree.all_polygons() {
        let centroid = poly
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / poly.vertices.len() as Real;
        let strictly_inside = centroid.x > 1e-9
            && centroid.x < 2.0 - 1e-9
            && centroid.y.abs() < 1.0 - 1e-9
            && centroid.z.abs() < 1.0 - 1e-9;
        assert!(
            !strictly_inside,
            "clip_to left a polygon inside the other solid at {}",
            centroid
        );
    }
}
