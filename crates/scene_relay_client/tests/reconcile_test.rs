//! Reconciler properties against the headless backend.

use std::collections::BTreeSet;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_relay_client::{HeadlessBackend, SceneReconciler, ShapeGeometry};
use scene_relay_shared::{Color, Part, PartType, Vec3};

fn random_snapshot(rng: &mut StdRng) -> Vec<Part> {
    let count = rng.gen_range(0..24);
    (0..count)
        .map(|_| {
            // Small id space so duplicates and overlap between rounds are common.
            let id = format!("part-{}", rng.gen_range(0..16));
            let shape = PartType::ALL[rng.gen_range(0..PartType::ALL.len())];
            let size = Vec3::new(
                rng.gen_range(1..4) as f32,
                rng.gen_range(1..4) as f32,
                rng.gen_range(1..4) as f32,
            );
            let mut part = Part::new(id)
                .with_shape(shape, size)
                .at(Vec3::new(rng.gen(), rng.gen(), rng.gen()));
            if rng.gen_bool(0.2) {
                part = part.player();
            }
            part
        })
        .collect()
}

fn tracked(scene: &SceneReconciler) -> BTreeSet<String> {
    scene.ids().map(str::to_owned).collect()
}

fn distinct_ids(parts: &[Part]) -> BTreeSet<String> {
    parts.iter().map(|part| part.id.clone()).collect()
}

#[test]
fn test_tracked_set_matches_snapshot() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();

    for _ in 0..200 {
        let snapshot = random_snapshot(&mut rng);
        scene.reconcile(&snapshot, &mut backend);

        assert_eq!(tracked(&scene), distinct_ids(&snapshot));
        assert_eq!(backend.live_meshes(), scene.len());

        let players = scene.iter().filter(|object| object.label().is_some()).count();
        assert_eq!(backend.live_labels(), players);
    }

    scene.clear(&mut backend);
    let stats = backend.stats();
    assert_eq!(backend.live_meshes(), 0);
    assert_eq!(backend.live_labels(), 0);
    assert_eq!(stats.meshes_created, stats.meshes_removed);
    assert_eq!(stats.geometry_builds, stats.geometry_releases);
    assert_eq!(stats.labels_created, stats.labels_removed);
}

#[test]
fn test_repeat_reconcile_has_no_churn() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();

    for _ in 0..50 {
        let snapshot = random_snapshot(&mut rng);
        scene.reconcile(&snapshot, &mut backend);
        let before = *backend.stats();

        let stats = scene.reconcile(&snapshot, &mut backend);

        assert_eq!(stats.created, 0);
        assert_eq!(stats.removed, 0);
        assert_eq!(stats.rebuilt, 0);
        let after = backend.stats();
        assert_eq!(after.geometry_builds, before.geometry_builds);
        assert_eq!(after.meshes_created, before.meshes_created);
        assert_eq!(after.labels_created, before.labels_created);
        assert_eq!(after.labels_removed, before.labels_removed);
    }
}

#[test]
fn test_vanished_ids_are_released() {
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();
    scene.reconcile(
        &[Part::new("A").player(), Part::new("B"), Part::new("C")],
        &mut backend,
    );
    let mesh_a = scene.get("A").unwrap().mesh();

    let stats = scene.reconcile(&[Part::new("B"), Part::new("C")], &mut backend);

    assert_eq!(stats.removed, 1);
    assert_eq!(tracked(&scene), BTreeSet::from(["B".to_owned(), "C".to_owned()]));
    assert!(backend.mesh(mesh_a).is_none());
    assert_eq!(backend.live_labels(), 0);
}

#[test]
fn test_size_change_replaces_geometry() {
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();
    let unit = Vec3::new(1.0, 1.0, 1.0);
    scene.reconcile(&[Part::new("a").with_shape(PartType::Block, unit)], &mut backend);
    let mesh = scene.get("a").unwrap().mesh();

    let stats = scene.reconcile(
        &[Part::new("a").with_shape(PartType::Block, Vec3::new(2.0, 1.0, 1.0))],
        &mut backend,
    );

    assert_eq!(stats.rebuilt, 1);
    assert_eq!(stats.created, 0);
    assert_eq!(scene.get("a").unwrap().mesh(), mesh);
    assert_eq!(
        backend.mesh(mesh).unwrap().geometry,
        ShapeGeometry::Box {
            width: 2.0,
            height: 1.0,
            depth: 1.0
        }
    );
}

#[test]
fn test_type_change_replaces_geometry() {
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();
    let size = Vec3::new(2.0, 2.0, 2.0);
    scene.reconcile(&[Part::new("a").with_shape(PartType::Block, size)], &mut backend);
    let mesh = scene.get("a").unwrap().mesh();

    let stats = scene.reconcile(&[Part::new("a").with_shape(PartType::Ball, size)], &mut backend);

    assert_eq!(stats.rebuilt, 1);
    assert_eq!(stats.created, 0);
    let object = scene.get("a").unwrap();
    assert_eq!(object.mesh(), mesh);
    assert_eq!(object.part_type(), PartType::Ball);
    assert_eq!(
        backend.mesh(mesh).unwrap().geometry,
        ShapeGeometry::Sphere { radius: 1.0 }
    );
    assert_eq!(backend.stats().meshes_created, 1);
}

#[test]
fn test_rotation_update_in_radians() {
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();
    scene.reconcile(&[Part::new("a")], &mut backend);

    scene.reconcile(
        &[Part::new("a").rotated(Vec3::new(90.0, -180.0, 45.0))],
        &mut backend,
    );

    let object = scene.get("a").unwrap();
    let rotation = object.target().rotation;
    assert!((rotation.x - FRAC_PI_2).abs() < 1e-6);
    assert!((rotation.y + PI).abs() < 1e-6);
    assert!((rotation.z - FRAC_PI_4).abs() < 1e-6);
    // Only the target moves until a frame runs.
    assert_eq!(object.current().rotation, Vec3::ZERO);
}

#[test]
fn test_material_refreshed_without_rebuild() {
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();
    scene.reconcile(&[Part::new("a")], &mut backend);
    let mesh = scene.get("a").unwrap().mesh();
    let builds = backend.stats().geometry_builds;

    let mut part = Part::new("a");
    part.color = Color::new(1.0, 0.0, 0.0);
    part.transparency = 0.25;
    let stats = scene.reconcile(&[part], &mut backend);

    assert_eq!(stats.rebuilt, 0);
    assert_eq!(backend.stats().geometry_builds, builds);
    let material = backend.mesh(mesh).unwrap().material;
    assert_eq!(material.color, Color::new(1.0, 0.0, 0.0));
    assert!((material.opacity - 0.75).abs() < 1e-6);
    assert!(material.transparent);
    assert_eq!(scene.get("a").unwrap().material().color, material.color);
}

#[test]
fn test_duplicate_ids_last_wins() {
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();

    scene.reconcile(
        &[
            Part::new("dup").at(Vec3::new(1.0, 0.0, 0.0)),
            Part::new("dup").at(Vec3::new(5.0, 0.0, 0.0)),
        ],
        &mut backend,
    );

    assert_eq!(scene.len(), 1);
    assert_eq!(backend.live_meshes(), 1);
    assert_eq!(
        scene.get("dup").unwrap().target().position,
        Vec3::new(5.0, 0.0, 0.0)
    );
}
