use std::cell::RefCell;
use std::rc::Rc;

use specificity_graph::ChartError;
use specificity_graph::api::{ChartConfig, SpecificityChart};
use specificity_graph::extensions::{ChartPlugin, PluginContext, PluginEvent};
use specificity_graph::render::{Easing, NullRenderer};

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<PluginEvent>>>,
    contexts: Rc<RefCell<Vec<PluginContext>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<PluginEvent>>>) -> Self {
        Self {
            id: id.into(),
            events,
            contexts: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PluginEvent, context: PluginContext) {
        self.events.borrow_mut().push(event.clone());
        self.contexts.borrow_mut().push(context);
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::SeriesAdded { .. } => "added",
        PluginEvent::SeriesRemoved { .. } => "removed",
        PluginEvent::SeriesReplaced { .. } => "replaced",
        PluginEvent::Drawn { .. } => "drawn",
        PluginEvent::FocusChanged { .. } => "focus",
        PluginEvent::PointerLeft => "pointer_leave",
        PluginEvent::Resized { .. } => "resized",
        PluginEvent::Rendered => "rendered",
    }
}

fn chart() -> SpecificityChart<NullRenderer> {
    SpecificityChart::new(NullRenderer::default(), ChartConfig::default()).expect("chart init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("recorder", Rc::clone(&events))))
        .expect("register plugin");

    chart.add(".a{color:red} .b .c{color:red}", Some("a")).expect("add");
    let x = chart.x_scale().map(1.0);
    chart.pointer_move(x, 100.0);
    chart.pointer_leave();
    chart.draw(300.0, Easing::Linear);
    chart.resize(900, 300).expect("resize");
    chart.render().expect("render");
    assert!(chart.remove("a"));

    let kinds: Vec<&str> = events.borrow().iter().map(event_kind).collect();
    assert_eq!(
        kinds,
        vec![
            "added",
            "focus",
            "pointer_leave",
            "drawn",
            "resized",
            "rendered",
            "removed"
        ]
    );
    assert_eq!(
        events.borrow()[0],
        PluginEvent::SeriesAdded {
            id: "a".to_owned(),
            records_len: 2
        }
    );
    assert_eq!(
        events.borrow()[1],
        PluginEvent::FocusChanged {
            index: 0,
            series_ids: vec!["a".to_owned()]
        }
    );
}

#[test]
fn plugin_context_reflects_state_at_emit_time() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    let plugin = RecordingPlugin::new("ctx", Rc::clone(&events));
    let contexts = Rc::clone(&plugin.contexts);
    chart.register_plugin(Box::new(plugin)).expect("register plugin");

    chart.add(".a{color:red}", Some("one")).expect("add one");
    chart.add("#b{color:red}", Some("two")).expect("add two");

    let contexts = contexts.borrow();
    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0].series_count, 1);
    assert_eq!(contexts[1].series_count, 2);
    assert_eq!(contexts[1].flattened_len, 2);
    assert_eq!(contexts[1].y_domain, chart.y_domain());
}

#[test]
fn replace_reports_dropped_series_before_the_replacement() {
    let mut chart = chart();
    chart.add(".a{color:red}", Some("a")).expect("add a");
    chart.add(".b{color:red}", Some("b")).expect("add b");

    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("recorder", Rc::clone(&events))))
        .expect("register plugin");
    chart.replace_with(".c{color:red}", None, 500.0).expect("replace");

    assert_eq!(
        *events.borrow(),
        vec![
            PluginEvent::SeriesRemoved { id: "a".to_owned() },
            PluginEvent::SeriesReplaced {
                id: "b".to_owned(),
                records_len: 1
            },
        ]
    );
}

#[test]
fn duplicate_add_emits_nothing() {
    let mut chart = chart();
    chart.add(".a{color:red}", Some("a")).expect("add");
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("recorder", Rc::clone(&events))))
        .expect("register plugin");

    chart.add(".x{color:red}", Some("a")).expect("duplicate add");
    assert!(events.borrow().is_empty());
}

#[test]
fn duplicate_plugin_id_is_rejected() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("dup", Rc::clone(&events))))
        .expect("first registration");
    let err = chart
        .register_plugin(Box::new(RecordingPlugin::new("dup", events)))
        .expect_err("duplicate id must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(chart.plugin_count(), 1);
}

#[test]
fn unregistered_plugin_stops_receiving_events() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("temp", Rc::clone(&events))))
        .expect("register plugin");
    assert!(chart.has_plugin("temp"));
    assert!(chart.unregister_plugin("temp"));
    assert!(!chart.has_plugin("temp"));
    assert!(!chart.unregister_plugin("temp"));

    chart.render().expect("render");
    assert!(events.borrow().is_empty());
}
