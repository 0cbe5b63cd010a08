/// A stored record: a coordinate vector plus an opaque payload that is
/// carried through search results unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<T> {
    pub coords: Vec<f64>,
    pub data: T,
}

impl<T> Point<T> {
    #[must_use]
    pub fn new(coords: Vec<f64>, data: T) -> Point<T> {
        Point { coords, data }
    }
}
