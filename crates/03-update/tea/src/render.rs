use std::fmt;

/// Consumer of every newly reduced model.
///
/// Render is called after each message even when the model did not change, so
/// implementations must be cheap and idempotent.
pub trait Render<Model>: Send {
    /// Reacts to `model`.
    fn render(&mut self, model: &Model);
}

impl<Model, R> Render<Model> for Box<R>
where
    R: Render<Model> + ?Sized,
{
    fn render(&mut self, model: &Model) {
        (**self).render(model)
    }
}

/// Render sink that ignores every model.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoneRender;

impl<Model> Render<Model> for NoneRender {
    fn render(&mut self, _model: &Model) {}
}

/// Render sink backed by a closure. Built with [`render_fn`].
pub struct FnRender<F> {
    f: F,
}

/// Adapts a closure into a [`Render`] sink.
pub fn render_fn<Model, F>(f: F) -> FnRender<F>
where
    F: FnMut(&Model) + Send,
{
    FnRender { f }
}

impl<Model, F> Render<Model> for FnRender<F>
where
    F: FnMut(&Model) + Send,
{
    fn render(&mut self, model: &Model) {
        (self.f)(model)
    }
}

impl<F> fmt::Debug for FnRender<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnRender")
    }
}
