use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk::glib;
use gtk::prelude::*;
use tracing::{debug, warn};

use crate::api::{MountPoint, SpecificityChart};
use crate::render::{CairoContextRenderer, Renderer};

/// Binds a chart to a GTK `DrawingArea`.
///
/// The area is tagged from the config's `selector`: `.name` adds a style
/// class, `#name` sets the widget name.
///
/// Pointer motion and leave, resizes and frame-clock ticks are forwarded to
/// the chart's explicit handler methods; drawing goes through
/// [`SpecificityChart::render_on_cairo_context`].
pub struct GtkChartAdapter<R: Renderer> {
    chart: Rc<RefCell<SpecificityChart<R>>>,
    area: gtk::DrawingArea,
}

impl<R> GtkChartAdapter<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    #[must_use]
    pub fn new(chart: SpecificityChart<R>) -> Self {
        let viewport = chart.viewport();
        let area = gtk::DrawingArea::new();
        match chart.config().mount_point() {
            Some(MountPoint::Class(class)) => area.add_css_class(&class),
            Some(MountPoint::Id(name)) => area.set_widget_name(&name),
            None => debug!(
                selector = %chart.config().selector,
                "selector is not a single class or id; widget left untagged"
            ),
        }
        let chart = Rc::new(RefCell::new(chart));
        area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        let draw_chart = Rc::clone(&chart);
        area.set_draw_func(move |_, context, _, _| {
            if let Err(err) = draw_chart.borrow_mut().render_on_cairo_context(context) {
                warn!(error = %err, "chart draw failed");
            }
        });

        let motion = gtk::EventControllerMotion::new();
        let motion_chart = Rc::clone(&chart);
        motion.connect_motion(move |controller, x, y| {
            motion_chart.borrow_mut().pointer_move(x, y);
            if let Some(widget) = controller.widget() {
                widget.queue_draw();
            }
        });
        let leave_chart = Rc::clone(&chart);
        motion.connect_leave(move |controller| {
            leave_chart.borrow_mut().pointer_leave();
            if let Some(widget) = controller.widget() {
                widget.queue_draw();
            }
        });
        area.add_controller(motion);

        let resize_chart = Rc::clone(&chart);
        area.connect_resize(move |area, width, height| {
            let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                return;
            };
            if let Err(err) = resize_chart.borrow_mut().resize(width, height) {
                warn!(error = %err, width, height, "ignoring chart resize");
            }
            area.queue_draw();
        });

        let tick_chart = Rc::clone(&chart);
        let last_frame_us: Cell<Option<i64>> = Cell::new(None);
        area.add_tick_callback(move |area, clock| {
            let frame_us = clock.frame_time();
            let delta_ms = last_frame_us
                .replace(Some(frame_us))
                .map_or(0.0, |last| (frame_us - last) as f64 / 1000.0);
            let mut chart = tick_chart.borrow_mut();
            let was_animating = chart.is_animating();
            chart.advance(delta_ms);
            if was_animating {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        Self { chart, area }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    /// Shared handle for mutating the chart (add/remove series, stepping
    /// focus) from other callbacks. Call [`GtkChartAdapter::queue_draw`]
    /// afterwards.
    #[must_use]
    pub fn chart(&self) -> Rc<RefCell<SpecificityChart<R>>> {
        Rc::clone(&self.chart)
    }

    pub fn queue_draw(&self) {
        self.area.queue_draw();
    }
}
