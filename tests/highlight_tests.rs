use chartcore::core::{
    AxisDependency, DataSet, Entry, Rounding, SeriesKind, ValueTransformer, ViewportState,
};
use chartcore::interaction::{
    BarHighlighter, CartesianView, ChartHighlighter, CombinedHighlighter, Highlighter,
    HorizontalBarHighlighter, build_highlights, group_by_kind,
};

fn flat_viewport() -> ViewportState {
    let mut viewport = ViewportState::new(1000.0, 500.0).with_min_offset(0.0);
    viewport.restrain_viewport(0.0, 0.0, 0.0, 0.0);
    viewport
}

// x 0..100 at 10 px per unit, y 0..200 at 2.5 px per unit.
fn vertical(viewport: &ViewportState) -> ValueTransformer {
    let mut transformer = ValueTransformer::vertical();
    transformer.prepare_matrix_offset(viewport, false);
    transformer.prepare_matrix_value_px(viewport, 0.0, 100.0, 200.0, 0.0);
    transformer
}

// x 0..100 upward, y 0..200 rightward, both at 5 px per unit.
fn horizontal(viewport: &ViewportState) -> ValueTransformer {
    let mut transformer = ValueTransformer::horizontal();
    transformer.prepare_matrix_offset(viewport, false);
    transformer.prepare_matrix_value_px(viewport, 0.0, 100.0, 200.0, 0.0);
    transformer
}

fn diagonal(kind: SeriesKind) -> DataSet {
    let entries = (0..=100).map(|x| Entry::new(f64::from(x), f64::from(x))).collect();
    DataSet::new("diagonal", kind, entries).expect("sorted entries")
}

fn flat_bars(y: f64) -> DataSet {
    let entries = (0..=100).map(|x| Entry::new(f64::from(x), y)).collect();
    DataSet::new("bars", SeriesKind::Bar, entries).expect("sorted entries")
}

#[test]
fn nearest_entry_is_highlighted() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let data = [diagonal(SeriesKind::Line)];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    let high = ChartHighlighter.highlight(&view, 146.0, 462.5).expect("highlight");
    assert_eq!(high.entry_index, 15);
    assert_eq!(high.data_set_index, 0);
    assert_eq!((high.x, high.y), (15.0, 15.0));
    assert!((high.x_px - 150.0).abs() < 1e-9);
    assert!((high.y_px - 462.5).abs() < 1e-9);
    assert_eq!(high.axis, AxisDependency::Left);
    assert_eq!(high.data_index, None);
    assert_eq!(high.stack_index, None);
}

#[test]
fn touches_beyond_max_distance_select_nothing() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let data = [diagonal(SeriesKind::Line)];
    let view =
        CartesianView::new(&data, &viewport, &transformer, &transformer).with_max_highlight_distance(1.0);

    assert!(ChartHighlighter.highlight(&view, 146.0, 462.5).is_none());
}

#[test]
fn disabled_data_sets_are_skipped() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let data = [diagonal(SeriesKind::Line).with_highlight_enabled(false)];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    assert!(ChartHighlighter.highlight(&view, 146.0, 462.5).is_none());
}

#[test]
fn entries_sharing_x_all_become_candidates() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let entries = vec![
        Entry::new(1.0, 10.0),
        Entry::new(2.0, 20.0),
        Entry::new(2.0, 80.0),
        Entry::new(3.0, 30.0),
    ];
    let set = DataSet::new("scatter", SeriesKind::Scatter, entries).expect("sorted entries");
    let data = [set];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    let exact = build_highlights(&view, &data[0], 0, 2.0, Rounding::Closest);
    assert_eq!(exact.iter().map(|high| high.entry_index).collect::<Vec<_>>(), vec![1, 2]);

    let nearest = build_highlights(&view, &data[0], 0, 2.2, Rounding::Closest);
    assert_eq!(nearest.len(), 2);

    // y = 80 sits at 300 px.
    let high = ChartHighlighter.highlight(&view, 20.0, 310.0).expect("highlight");
    assert_eq!(high.entry_index, 2);
}

#[test]
fn closer_axis_wins_between_left_and_right_sets() {
    let viewport = flat_viewport();
    let left = vertical(&viewport);
    let mut right = ValueTransformer::vertical();
    right.prepare_matrix_offset(&viewport, false);
    right.prepare_matrix_value_px(&viewport, 0.0, 100.0, 100.0, 0.0);

    let data = [
        flat_bars(20.0),
        flat_bars(20.0).with_axis_dependency(AxisDependency::Right),
    ];
    let view = CartesianView::new(&data, &viewport, &left, &right);

    // Left bar tops sit at 450 px, right ones at 400 px.
    let high = ChartHighlighter.highlight(&view, 300.0, 405.0).expect("highlight");
    assert_eq!(high.axis, AxisDependency::Right);
    assert_eq!(high.data_set_index, 1);

    let high = ChartHighlighter.highlight(&view, 300.0, 445.0).expect("highlight");
    assert_eq!(high.axis, AxisDependency::Left);
    assert_eq!(high.data_set_index, 0);
}

#[test]
fn stacked_bar_resolves_touched_segment() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let entries = (0..=100)
        .map(|x| Entry::stacked(f64::from(x), &[10.0, 20.0, 30.0]))
        .collect();
    let set = DataSet::new("stacked", SeriesKind::Bar, entries).expect("sorted entries");
    let data = [set];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    let high = BarHighlighter.highlight(&view, 50.0, 437.5).expect("highlight");
    assert_eq!(high.entry_index, 5);
    assert_eq!(high.stack_index, Some(1));
    assert_eq!(high.y, 60.0);
    assert!((high.y_px - 425.0).abs() < 1e-9);

    let above = BarHighlighter.highlight(&view, 50.0, 200.0).expect("highlight");
    assert_eq!(above.stack_index, Some(2));
    assert!((above.y_px - 350.0).abs() < 1e-9);
}

#[test]
fn plain_bars_keep_chart_highlight() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let data = [flat_bars(50.0)];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    let bar = BarHighlighter.highlight(&view, 146.0, 380.0).expect("highlight");
    let chart = ChartHighlighter.highlight(&view, 146.0, 380.0).expect("highlight");
    assert_eq!(bar, chart);
    assert_eq!(bar.stack_index, None);
}

#[test]
fn horizontal_bars_measure_along_category_axis() {
    let viewport = flat_viewport();
    let transformer = horizontal(&viewport);
    let data = [diagonal(SeriesKind::Bar)];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    let high = HorizontalBarHighlighter.highlight(&view, 100.0, 427.0).expect("highlight");
    assert_eq!(high.entry_index, 15);
    assert!((high.x_px - 75.0).abs() < 1e-9);
    assert!((high.y_px - 425.0).abs() < 1e-9);

    // Far right of the bar end still selects it; only the category distance counts.
    let far = HorizontalBarHighlighter.highlight(&view, 900.0, 427.0).expect("highlight");
    assert_eq!(far.entry_index, 15);
}

#[test]
fn combined_highlighter_tags_series_group() {
    let viewport = flat_viewport();
    let transformer = vertical(&viewport);
    let data = [diagonal(SeriesKind::Line), flat_bars(50.0)];
    let view = CartesianView::new(&data, &viewport, &transformer, &transformer);

    let bar = CombinedHighlighter.highlight(&view, 146.0, 375.0).expect("highlight");
    assert_eq!(bar.data_set_index, 1);
    assert_eq!(bar.data_index, Some(1));
    assert_eq!(bar.entry_index, 15);

    let line = CombinedHighlighter.highlight(&view, 146.0, 460.0).expect("highlight");
    assert_eq!(line.data_set_index, 0);
    assert_eq!(line.data_index, Some(0));
    assert!(!line.is_same_selection(&bar));
}

#[test]
fn groups_follow_first_appearance() {
    let data = [
        diagonal(SeriesKind::Line),
        diagonal(SeriesKind::Bar),
        diagonal(SeriesKind::Line),
    ];
    let groups = group_by_kind(&data);

    let kinds: Vec<_> = groups.keys().copied().collect();
    assert_eq!(kinds, vec![SeriesKind::Line, SeriesKind::Bar]);
    assert_eq!(groups[&SeriesKind::Line], vec![0, 2]);
    assert_eq!(groups[&SeriesKind::Bar], vec![1]);
}
