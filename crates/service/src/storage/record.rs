/// A value that can live in a [`Store`](super::Store).
///
/// The store only needs to read and assign the integer identifier; the rest
/// of the shape is opaque to it.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}
