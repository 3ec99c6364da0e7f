use ohi_rs::scene::{LegendSpec, ShapeKey};
use ohi_rs::{ChartKind, EventQueue, Session, UiEvent};
use ohi_rs::models::Record;

fn mortality() -> Vec<Record> {
    vec![
        Record::new("Austria", 2018, Some(120.0)),
        Record::new("Belgium", 2018, Some(150.0)),
        Record::new("Austria", 2019, Some(118.0)),
        Record::new("Belgium", 2019, Some(149.0)),
        Record::new("Chile", 2019, Some(200.0)),
        Record::new("Chile", 2020, None),
    ]
}

#[test]
fn empty_dataset_is_fatal() {
    assert!(Session::new(Vec::new(), ChartKind::Line).is_err());
}

#[test]
fn each_event_triggers_exactly_one_redraw() {
    let mut session = Session::new(mortality(), ChartKind::Line).unwrap();
    assert_eq!(session.redraw_count(), 1);

    let mut queue = EventQueue::new();
    queue.push(UiEvent::YearSlider(2019));
    queue.push(UiEvent::CountrySelected(Some("Austria".into())));
    queue.push(UiEvent::ClearSort);
    queue.drain_into(&mut session);

    assert!(queue.is_empty());
    assert_eq!(session.redraw_count(), 4);
}

#[test]
fn slider_clamps_to_dataset_bounds() {
    let mut session = Session::new(mortality(), ChartKind::Line).unwrap();
    session.dispatch(UiEvent::YearSlider(1800));
    assert_eq!(session.state().year_ceiling, Some(2018));
    session.dispatch(UiEvent::YearSlider(3000));
    assert_eq!(session.state().year_ceiling, Some(2020));
}

#[test]
fn repeated_identical_filter_changes_nothing() {
    let mut session = Session::new(mortality(), ChartKind::Line).unwrap();
    session.dispatch(UiEvent::CountrySelected(Some("Austria".into())));
    let stats = session.dispatch(UiEvent::CountrySelected(Some("Austria".into())));
    assert_eq!(stats.created, 0);
    assert_eq!(stats.removed, 0);
}

#[test]
fn country_filter_drops_other_series() {
    let mut session = Session::new(mortality(), ChartKind::Line).unwrap();
    session.dispatch(UiEvent::CountrySelected(Some("Austria".into())));
    let store = session.store();
    assert!(store.get(&ShapeKey::Series("Austria".into())).is_some());
    assert!(store.get(&ShapeKey::Series("Belgium".into())).is_none());

    session.dispatch(UiEvent::CountrySelected(None));
    assert!(
        session
            .store()
            .get(&ShapeKey::Series("Belgium".into()))
            .is_some()
    );
}

#[test]
fn legend_toggle_only_touches_opacity() {
    let mut session = Session::new(mortality(), ChartKind::Line).unwrap();
    let before = session.store().len();

    let stats = session.dispatch(UiEvent::LegendToggle("Belgium".into()));
    assert_eq!(stats.created, 0);
    assert_eq!(stats.removed, 0);
    assert_eq!(session.store().len(), before);
    let series = session
        .store()
        .get(&ShapeKey::Series("Belgium".into()))
        .unwrap();
    assert_eq!(series.opacity, 0.0);

    session.dispatch(UiEvent::LegendToggle("Belgium".into()));
    let series = session
        .store()
        .get(&ShapeKey::Series("Belgium".into()))
        .unwrap();
    assert_eq!(series.opacity, 1.0);
}

#[test]
fn top_n_keeps_largest_bars() {
    let data = vec![
        Record::new("A", 2020, Some(10.0)),
        Record::new("B", 2020, Some(30.0)),
        Record::new("C", 2020, Some(20.0)),
    ];
    let mut session = Session::new(data, ChartKind::Bar).unwrap();
    session.dispatch(UiEvent::TopN(2));

    let store = session.store();
    assert!(store.get(&ShapeKey::Bar("B".into())).is_some());
    assert!(store.get(&ShapeKey::Bar("C".into())).is_some());
    assert!(store.get(&ShapeKey::Bar("A".into())).is_none());
}

#[test]
fn bars_and_cells_center_on_their_category_slot() {
    let data = vec![
        Record::new("A", 2020, Some(10.0)),
        Record::new("B", 2020, Some(30.0)),
    ];

    // Tick labels for a categorical axis land on integer positions, so the
    // band geometry must be centered there.
    let session = Session::new(data.clone(), ChartKind::Bar).unwrap();
    let bar = session.store().get(&ShapeKey::Bar("B".into())).unwrap();
    match &bar.geom {
        ohi_rs::scene::Geom::Rect { x0, x1, .. } => {
            assert!(((x0 + x1) / 2.0 - 1.0).abs() < 1e-9);
        }
        other => panic!("expected rect geometry, got {:?}", other),
    }

    let session = Session::new(data, ChartKind::Heatmap).unwrap();
    let cell = session
        .store()
        .get(&ShapeKey::Cell("A".into(), 2020))
        .unwrap();
    match &cell.geom {
        ohi_rs::scene::Geom::Rect { x0, y0, x1, y1 } => {
            assert!(((x0 + x1) / 2.0).abs() < 1e-9);
            assert!(((y0 + y1) / 2.0).abs() < 1e-9);
        }
        other => panic!("expected rect geometry, got {:?}", other),
    }
}

#[test]
fn heatmap_color_domain_is_filter_independent() {
    let mut session = Session::new(mortality(), ChartKind::Heatmap).unwrap();
    let max_before = match session.legend() {
        LegendSpec::ColorBar { max, .. } => *max,
        other => panic!("expected color bar, got {:?}", other),
    };
    assert_eq!(max_before, 200.0);

    session.dispatch(UiEvent::CountrySelected(Some("Austria".into())));
    session.dispatch(UiEvent::YearSlider(2018));
    match session.legend() {
        LegendSpec::ColorBar { max, .. } => assert_eq!(*max, max_before),
        other => panic!("expected color bar, got {:?}", other),
    }
}

#[test]
fn missing_values_never_become_shapes() {
    let session = Session::new(mortality(), ChartKind::Line).unwrap();
    // Chile's 2020 row has no value.
    assert!(
        session
            .store()
            .get(&ShapeKey::Point("Chile".into(), 2020))
            .is_none()
    );
}

#[test]
fn labels_sit_on_each_countrys_own_last_point() {
    let session = Session::new(mortality(), ChartKind::Line).unwrap();
    // Austria's last usable record is 2019 even though the dataset runs to
    // 2020; its label follows its own series end.
    let label = session
        .store()
        .get(&ShapeKey::Label("Austria".into()))
        .unwrap();
    match &label.geom {
        ohi_rs::scene::Geom::Text { x, y, text } => {
            assert_eq!(*x, 2019.0);
            assert_eq!(*y, 118.0);
            assert_eq!(text, "Austria");
        }
        other => panic!("expected text geometry, got {:?}", other),
    }
}

#[test]
fn tooltip_reads_the_bound_record() {
    let mut session = Session::new(mortality(), ChartKind::Line).unwrap();
    let tip = session.tooltip("Chile", 2019).unwrap();
    assert_eq!(tip, "Country: Chile\nYear: 2019\nValue: 200");

    // Missing value: no rendered shape, no tooltip.
    assert!(session.tooltip("Chile", 2020).is_none());

    // Filtered-out records lose their shapes and their tooltips.
    session.dispatch(UiEvent::CountrySelected(Some("Austria".into())));
    assert!(session.tooltip("Chile", 2019).is_none());
}
