use crate::extensions::ChartPlugin;
use crate::render::AnimationClock;

/// Host-facing runtime state: registered observers and the animation clock.
#[derive(Default)]
pub(super) struct ChartRuntimeState {
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) clock: AnimationClock,
}
