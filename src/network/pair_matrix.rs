/// A dense square matrix holding one value per ordered site pair.
///
/// Entry (i, j) describes the directed relation from site i to site j.
/// Storage is row-major, so entry (i, j) lives at flat index `i * n + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMatrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> PairMatrix<T> {
    /// Creates an n-by-n matrix filled with the default value.
    pub fn new(n: usize) -> Self {
        PairMatrix {
            n,
            data: vec![T::default(); n * n],
        }
    }
}

impl<T: Copy> PairMatrix<T> {
    /// Creates a matrix from row-major flat data.
    pub fn from_flat(n: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            n * n,
            "Pair matrix data length {} does not match {}x{} sites",
            data.len(),
            n,
            n
        );
        PairMatrix { n, data }
    }

    /// Number of sites this matrix relates.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the entry for the ordered pair (i, j).
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.n && j < self.n, "Pair index out of bounds");
        self.data[i * self.n + j]
    }

    /// Sets the entry for the ordered pair (i, j).
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        assert!(i < self.n && j < self.n, "Pair index out of bounds");
        self.data[i * self.n + j] = value;
    }

    /// Read-only view of the row-major flat storage.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the row-major flat storage.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Converts a flat storage index back to its ordered pair (i, j).
    pub fn flat_to_pair(&self, index: usize) -> (usize, usize) {
        assert!(index < self.n * self.n, "Flat index out of bounds");
        (index / self.n, index % self.n)
    }
}
