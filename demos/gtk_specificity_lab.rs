use specificity_graph::api::{ChartConfig, SeriesSource, SpecificityChart};
use specificity_graph::core::Interpolation;
use specificity_graph::platform_gtk::GtkChartAdapter;
use specificity_graph::render::{CairoRenderer, Easing};
use gtk4 as gtk;
use gtk4::prelude::*;

const BASE_CSS: &str = r#"
html, body { margin: 0; }
.nav { display: flex; }
.nav > li a:hover { color: red; }
#header .logo img { width: 120px !important; }
@media (min-width: 800px) {
    .grid .col-6 { width: 50%; }
    #sidebar ul li.active::before { content: ">"; }
}
footer p { font-size: 12px; }
"#;

const THEME_CSS: &str = r#"
.btn { padding: 4px; }
.btn.btn-primary:focus { outline: none; }
#app .panel .panel-body table tr td { border: 0; }
input[type="text"]:not(.plain) { border: 1px solid; }
.card { box-shadow: none !important; }
"#;

const REFACTORED_CSS: &str = r#"
.nav { display: flex; }
.nav__link:hover { color: red; }
.logo { width: 120px; }
.col { width: 50%; }
.footer-text { font-size: 12px; }
"#;

fn main() {
    let _ = specificity_graph::telemetry::init_default_tracing();
    let app = gtk::Application::builder()
        .application_id("rs.specificity_graph.demos.gtk_specificity_lab")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_chart() -> specificity_graph::ChartResult<SpecificityChart<CairoRenderer>> {
    let config = ChartConfig::new(1000, 400)
        .with_dots(true)
        .with_ticks(true)
        .with_important(true)
        .with_selector("#specificity-lab")
        .with_linetype(Interpolation::Monotone);
    let renderer = CairoRenderer::new(1000, 400)?;
    let mut chart = SpecificityChart::new(renderer, config)?;
    chart.add(
        SeriesSource::named([("base", BASE_CSS), ("theme", THEME_CSS)]),
        None,
    )?;
    Ok(chart)
}

fn build_ui(app: &gtk::Application) {
    let chart = match build_chart() {
        Ok(chart) => chart,
        Err(err) => {
            eprintln!("failed to initialize specificity lab chart: {err}");
            return;
        }
    };

    let adapter = GtkChartAdapter::new(chart);
    let info_label = gtk::Label::new(Some("hover the chart or step with prev/next"));
    info_label.set_xalign(0.0);

    let controls = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let toggle_theme = gtk::Button::with_label("Toggle Theme");
    let replace = gtk::Button::with_label("Replace With Refactor");
    let redraw = gtk::Button::with_label("Redraw");
    let prev = gtk::Button::with_label("Prev");
    let next = gtk::Button::with_label("Next");
    for button in [&toggle_theme, &replace, &redraw, &prev, &next] {
        controls.append(button);
    }

    let refresh_info = {
        let chart = adapter.chart();
        let info_label = info_label.clone();
        move || {
            let lines = chart.borrow().info_lines();
            if lines.is_empty() {
                info_label.set_text("no focus");
            } else {
                info_label.set_text(&lines.join("   "));
            }
        }
    };

    toggle_theme.connect_clicked({
        let chart = adapter.chart();
        let area = adapter.widget().clone();
        move |_| {
            if let Err(err) = chart.borrow_mut().toggle("theme", THEME_CSS) {
                eprintln!("toggle failed: {err}");
            }
            area.queue_draw();
        }
    });

    replace.connect_clicked({
        let chart = adapter.chart();
        let area = adapter.widget().clone();
        move |_| {
            if let Err(err) = chart
                .borrow_mut()
                .replace_with(REFACTORED_CSS, Some("refactor"), 900.0)
            {
                eprintln!("replace failed: {err}");
            }
            area.queue_draw();
        }
    });

    redraw.connect_clicked({
        let chart = adapter.chart();
        let area = adapter.widget().clone();
        move |_| {
            chart.borrow_mut().draw(800.0, Easing::Elastic);
            area.queue_draw();
        }
    });

    prev.connect_clicked({
        let chart = adapter.chart();
        let area = adapter.widget().clone();
        let refresh_info = refresh_info.clone();
        move |_| {
            chart.borrow_mut().prev_info();
            refresh_info();
            area.queue_draw();
        }
    });

    next.connect_clicked({
        let chart = adapter.chart();
        let area = adapter.widget().clone();
        move |_| {
            chart.borrow_mut().next_info();
            refresh_info();
            area.queue_draw();
        }
    });

    let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
    root.append(&controls);
    root.append(adapter.widget());
    root.append(&info_label);
    adapter.widget().set_vexpand(true);
    adapter.widget().set_hexpand(true);

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("specificity-graph: specificity lab")
        .default_width(1040)
        .default_height(520)
        .child(&root)
        .build();
    window.present();
}
