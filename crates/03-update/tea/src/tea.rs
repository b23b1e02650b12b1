use dispatch::Dispatcher;
use parking_lot::Mutex;
use tracing::trace;

use crate::render::Render;
use crate::update::Update;

/// Boxed reducer function.
pub type Reducer<Model, Msg> = Box<dyn Fn(&Model, Msg) -> Model + Send + Sync>;

struct TeaState<Model> {
    model: Model,
    render: Box<dyn Render<Model>>,
}

/// Holds the current model and drives reduce-then-render for each message.
///
/// The lock is never contended when every producer goes through the loop; it
/// exists so the engine is `Sync` and can be captured by queued actions.
/// Dispatching back into the same `Tea` from inside `render` deadlocks: render
/// sinks that produce messages must post them through the loop instead.
pub struct Tea<Model, Msg> {
    reducer: Reducer<Model, Msg>,
    state: Mutex<TeaState<Model>>,
}

impl<Model, Msg> Tea<Model, Msg>
where
    Model: Update<Msg> + 'static,
    Msg: 'static,
{
    /// Creates an engine that reduces with [`Update::update`].
    pub fn new<R>(init: Model, render: R) -> Self
    where
        R: Render<Model> + 'static,
    {
        Self::with_reducer(init, |model: &Model, msg: Msg| model.update(msg), render)
    }
}

impl<Model, Msg> Tea<Model, Msg> {
    /// Creates an engine around an explicit reducer function.
    pub fn with_reducer<F, R>(init: Model, reducer: F, render: R) -> Self
    where
        F: Fn(&Model, Msg) -> Model + Send + Sync + 'static,
        R: Render<Model> + 'static,
    {
        Self {
            reducer: Box::new(reducer),
            state: Mutex::new(TeaState {
                model: init,
                render: Box::new(render),
            }),
        }
    }

    /// Renders the current model without reducing anything.
    ///
    /// Used once at start-up so render sinks observe the initial model.
    pub fn render_current(&self) {
        let mut state = self.state.lock();
        let TeaState { model, render } = &mut *state;
        render.render(model);
    }
}

impl<Model: Clone, Msg> Tea<Model, Msg> {
    /// Returns a copy of the current model.
    pub fn model(&self) -> Model {
        self.state.lock().model.clone()
    }
}

impl<Model, Msg> Dispatcher<Msg> for Tea<Model, Msg>
where
    Model: Send,
{
    fn dispatch(&self, msg: Msg) {
        let mut state = self.state.lock();
        let next = (self.reducer)(&state.model, msg);
        state.model = next;
        trace!("model replaced; rendering");
        let TeaState { model, render } = &mut *state;
        render.render(model);
    }
}
