use specificity_graph::api::{ChartConfig, SpecificityChart};
use specificity_graph::css::SelectorRecord;
use specificity_graph::interaction::{HoverState, nearest_index};
use specificity_graph::render::NullRenderer;

fn record(index: u32, specificity: u32) -> SelectorRecord {
    SelectorRecord {
        index,
        line: index,
        specificity,
        selector: format!(".s{index}"),
        important: Vec::new(),
    }
}

fn records(indices: &[u32]) -> Vec<SelectorRecord> {
    indices.iter().map(|&index| record(index, 10)).collect()
}

fn chart_with(indices: &[u32]) -> SpecificityChart<NullRenderer> {
    let mut chart =
        SpecificityChart::new(NullRenderer::default(), ChartConfig::default()).expect("chart init");
    chart.add(records(indices), Some("a")).expect("add series");
    chart
}

fn hover_at(chart: &mut SpecificityChart<NullRenderer>, data_x: f64) {
    let pixel_x = chart.x_scale().map(data_x);
    chart.pointer_move(pixel_x, chart.plot_area().top + 10.0);
}

#[test]
fn pointer_resolves_to_nearest_record() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);

    hover_at(&mut chart, 3.0);
    assert_eq!(chart.hover_state(), HoverState::Focused);
    assert_eq!(chart.focus_state().index, Some(2));
    assert_eq!(chart.focus_state().x_value, Some(2.0));

    hover_at(&mut chart, 4.0);
    assert_eq!(chart.focus_state().x_value, Some(5.0));
}

#[test]
fn equal_distance_prefers_the_left_record() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    hover_at(&mut chart, 3.5);
    assert_eq!(chart.focus_state().x_value, Some(2.0));
}

#[test]
fn pointer_outside_the_data_clamps_to_the_ends() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);

    chart.pointer_move(0.0, 0.0);
    assert_eq!(chart.focus_state().index, Some(0));

    let far_right = f64::from(chart.viewport().width);
    chart.pointer_move(far_right, 0.0);
    assert_eq!(chart.focus_state().index, Some(4));
}

#[test]
fn hovering_does_not_touch_scales() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    let x_scale = chart.x_scale();
    let y_scale = chart.y_scale();
    hover_at(&mut chart, 5.0);
    assert_eq!(chart.x_scale(), x_scale);
    assert_eq!(chart.y_scale(), y_scale);
}

#[test]
fn focused_records_share_an_x_and_are_sorted_by_series_id() {
    let mut chart =
        SpecificityChart::new(NullRenderer::default(), ChartConfig::default()).expect("chart init");
    chart.add(records(&[1, 2, 3]), Some("b")).expect("add b");
    chart
        .add(vec![record(2, 110), record(4, 10)], Some("a"))
        .expect("add a");

    hover_at(&mut chart, 2.0);
    let focused = chart.focused_records();
    let ids: Vec<&str> = focused.iter().map(|record| record.series_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(focused.iter().all(|record| record.x == 2.0));

    assert_eq!(
        chart.info_lines(),
        vec!["a(110): .s2".to_owned(), "b(10): .s2".to_owned()]
    );
}

#[test]
fn leaving_hides_focus_but_remembers_the_index() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    hover_at(&mut chart, 5.0);
    chart.pointer_leave();

    assert_eq!(chart.hover_state(), HoverState::Idle);
    let focus = chart.focus_state();
    assert!(!focus.visible);
    assert_eq!(focus.index, Some(3));
    assert!(chart.focused_records().is_empty());
    assert!(chart.info_lines().is_empty());
}

#[test]
fn keyboard_stepping_moves_one_record_and_clamps() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    hover_at(&mut chart, 2.0);

    chart.next_info();
    assert_eq!(chart.focus_state().x_value, Some(5.0));
    chart.next_info();
    chart.next_info();
    assert_eq!(chart.focus_state().index, Some(4));

    chart.prev_info();
    assert_eq!(chart.focus_state().index, Some(3));
    assert_eq!(chart.hover_state(), HoverState::Focused);
}

#[test]
fn stepping_resumes_after_pointer_leave() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    hover_at(&mut chart, 1.0);
    chart.pointer_leave();

    chart.next_info();
    assert_eq!(chart.focus_state().index, Some(2));
    assert!(chart.focus_state().visible);
}

#[test]
fn stepping_without_prior_focus_starts_at_zero() {
    let mut chart = chart_with(&[0, 1, 2]);
    chart.prev_info();
    assert_eq!(chart.focus_state().index, Some(0));

    let mut chart = chart_with(&[0, 1, 2]);
    chart.next_info();
    assert_eq!(chart.focus_state().index, Some(1));
}

#[test]
fn update_info_clamps_out_of_range_indices() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    chart.update_info(100);
    assert_eq!(chart.focus_state().index, Some(4));
    assert_eq!(chart.focus_state().x_value, Some(8.0));
}

#[test]
fn empty_chart_stays_idle() {
    let mut chart =
        SpecificityChart::new(NullRenderer::default(), ChartConfig::default()).expect("chart init");
    chart.pointer_move(300.0, 100.0);
    assert_eq!(chart.hover_state(), HoverState::Idle);
    chart.next_info();
    assert_eq!(chart.hover_state(), HoverState::Idle);
    assert!(chart.info_lines().is_empty());
}

#[test]
fn removing_a_series_keeps_focus_in_bounds() {
    let mut chart = chart_with(&[0, 1, 2, 5, 8]);
    chart.add(records(&[20, 21]), Some("b")).expect("add b");
    chart.update_info(6);
    assert_eq!(chart.focus_state().x_value, Some(21.0));

    assert!(chart.remove("b"));
    assert_eq!(chart.focus_state().index, Some(4));
    assert_eq!(chart.focus_state().x_value, Some(8.0));

    assert!(chart.remove("a"));
    assert_eq!(chart.focus_state().index, None);
    assert_eq!(chart.hover_state(), HoverState::Idle);
}

#[test]
fn nearest_index_handles_edges() {
    let xs = [0.0, 1.0, 2.0, 5.0, 8.0];
    assert_eq!(nearest_index(&xs, -4.0), Some(0));
    assert_eq!(nearest_index(&xs, 100.0), Some(4));
    assert_eq!(nearest_index(&xs, 6.4), Some(3));
    assert_eq!(nearest_index(&xs, 6.6), Some(4));
    assert_eq!(nearest_index(&[], 1.0), None);
    assert_eq!(nearest_index(&xs, f64::NAN), None);
}
