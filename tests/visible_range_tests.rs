use chartcore::core::{DataSet, Entry, SeriesKind, VisibleBounds, VisibleRangeResolver};

fn hundred_points() -> DataSet {
    let entries = (0..100).map(|x| Entry::new(f64::from(x), f64::from(x))).collect();
    DataSet::new("hundred", SeriesKind::Line, entries).expect("sorted entries")
}

#[test]
fn window_on_entry_x_values_maps_exactly() {
    let set = hundred_points();
    let bounds = VisibleRangeResolver::new(10.0, 20.0, 1.0).compute_bounds(&set);

    assert_eq!(bounds, VisibleBounds { min: 10, max: 20, range: 10 });
    assert_eq!(bounds.indices(), 10..=20);
    assert_eq!(bounds.last_revealed(), 20);
}

#[test]
fn half_phase_halves_the_revealed_span() {
    let set = hundred_points();
    let bounds = VisibleRangeResolver::new(10.0, 20.0, 0.5).compute_bounds(&set);

    assert_eq!((bounds.min, bounds.max, bounds.range), (10, 20, 5));
    assert_eq!(bounds.last_revealed(), 15);
}

#[test]
fn fractional_window_rounds_outward() {
    let set = hundred_points();
    let bounds = VisibleRangeResolver::new(9.5, 20.5, 1.0).compute_bounds(&set);

    assert_eq!(bounds.min, 9);
    assert_eq!(bounds.max, 21);
    assert_eq!(bounds.range, 12);
}

#[test]
fn window_beyond_data_clamps_to_first_and_last() {
    let set = hundred_points();
    let bounds = VisibleRangeResolver::new(-50.0, 500.0, 1.0).compute_bounds(&set);

    assert_eq!((bounds.min, bounds.max, bounds.range), (0, 99, 99));
}

#[test]
fn empty_data_set_has_default_bounds() {
    let set = DataSet::new("empty", SeriesKind::Line, Vec::new()).expect("empty is valid");
    let bounds = VisibleRangeResolver::new(0.0, 10.0, 1.0).compute_bounds(&set);

    assert_eq!(bounds, VisibleBounds::default());
    assert!(bounds.is_single());
}

#[test]
fn duplicate_x_values_resolve_to_outer_duplicates() {
    let entries = vec![
        Entry::new(0.0, 1.0),
        Entry::new(1.0, 1.0),
        Entry::new(1.0, 2.0),
        Entry::new(2.0, 1.0),
    ];
    let set = DataSet::new("dupes", SeriesKind::Scatter, entries).expect("sorted entries");

    assert_eq!(VisibleRangeResolver::entry_index_at_or_before(&set, 1.5), 2);
    assert_eq!(VisibleRangeResolver::entry_index_at_or_after(&set, 1.5), 3);
    assert_eq!(VisibleRangeResolver::entry_index_at_or_before(&set, -1.0), 0);
}

#[test]
fn unsorted_entries_are_rejected_but_can_be_sorted_first() {
    let entries = vec![Entry::new(2.0, 0.0), Entry::new(1.0, 0.0)];
    assert!(DataSet::new("bad", SeriesKind::Line, entries.clone()).is_err());

    let set = DataSet::from_unsorted("sorted", SeriesKind::Line, entries).expect("sorted copy");
    let bounds = VisibleRangeResolver::new(0.0, 3.0, 1.0).compute_bounds(&set);
    assert_eq!((bounds.min, bounds.max), (0, 1));
}
