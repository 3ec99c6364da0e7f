use ohi_rs::palette::Rgb;
use ohi_rs::scene::{Geom, ShapeKey, ShapeSpec, ShapeStore};

fn spec(country: &str, year: i32, value: f64) -> ShapeSpec {
    ShapeSpec {
        key: ShapeKey::Point(country.to_string(), year),
        geom: Geom::Circle {
            x: year as f64,
            y: value,
            radius: 3,
        },
        color: Rgb(31, 119, 180),
        opacity: 1.0,
    }
}

#[test]
fn unchanged_scene_preserves_identities() {
    let mut store = ShapeStore::new();
    let first = store.reconcile(vec![spec("Austria", 2018, 1.0), spec("Belgium", 2018, 2.0)]);
    assert_eq!(first.created, 2);

    let id_a = store
        .get(&ShapeKey::Point("Austria".into(), 2018))
        .unwrap()
        .id;

    let second = store.reconcile(vec![spec("Austria", 2018, 1.0), spec("Belgium", 2018, 2.0)]);
    assert_eq!(second.created, 0);
    assert_eq!(second.removed, 0);
    assert_eq!(second.updated, 2);
    assert_eq!(
        store
            .get(&ShapeKey::Point("Austria".into(), 2018))
            .unwrap()
            .id,
        id_a
    );
}

#[test]
fn updates_keep_id_but_take_new_geometry() {
    let mut store = ShapeStore::new();
    store.reconcile(vec![spec("Austria", 2018, 1.0)]);
    let id = store
        .get(&ShapeKey::Point("Austria".into(), 2018))
        .unwrap()
        .id;

    store.reconcile(vec![spec("Austria", 2018, 9.0)]);
    let shape = store.get(&ShapeKey::Point("Austria".into(), 2018)).unwrap();
    assert_eq!(shape.id, id);
    assert_eq!(
        shape.geom,
        Geom::Circle {
            x: 2018.0,
            y: 9.0,
            radius: 3
        }
    );
}

#[test]
fn removed_keys_leave_and_new_keys_enter() {
    let mut store = ShapeStore::new();
    store.reconcile(vec![spec("Austria", 2018, 1.0), spec("Belgium", 2018, 2.0)]);

    let stats = store.reconcile(vec![spec("Belgium", 2018, 2.0), spec("Chile", 2018, 3.0)]);
    assert_eq!(stats.created, 1);
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.removed, 1);
    assert!(store.get(&ShapeKey::Point("Austria".into(), 2018)).is_none());
    assert!(store.get(&ShapeKey::Point("Chile".into(), 2018)).is_some());
}

#[test]
fn draw_order_follows_scene_order() {
    let mut store = ShapeStore::new();
    store.reconcile(vec![spec("B", 2018, 1.0), spec("A", 2018, 2.0)]);
    let keys: Vec<_> = store.shapes().map(|s| s.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            ShapeKey::Point("B".into(), 2018),
            ShapeKey::Point("A".into(), 2018)
        ]
    );
}
