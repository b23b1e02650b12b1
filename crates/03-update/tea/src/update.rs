/// Pure, total reduction of a model by a message.
///
/// `update` must not panic and must return a model equal to `self` for
/// messages that do not apply to it.
pub trait Update<Msg> {
    /// Returns the model that results from applying `msg`.
    fn update(&self, msg: Msg) -> Self
    where
        Self: Sized;
}
