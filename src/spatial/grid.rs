//! Generic row-major grid for spatial data
//!
//! Rows run along `x` (outer scan order), columns along `y`, and the flat
//! index of `(x, y)` is `x * height + y`. Iterating the backing vector is
//! therefore the same row-major order every pass over the city uses.

use crate::core::types::Coord;

/// Generic 2D grid
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Wrap a row-major vector; `None` if the length does not match
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self { width, height, data })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index / self.height, index % self.height)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(&self.data[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if let Some(cell) = self.get_mut(x, y) {
            *cell = value;
        }
    }

    #[inline]
    pub fn at(&self, index: usize) -> &T {
        &self.data[index]
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[T] {
        &self.data
    }

    /// Cells with their coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.coord(i), cell))
    }

    /// Coordinates of the `(2r+1)²` box around `(x, y)` clipped to the grid,
    /// centre included, in row-major order
    pub fn box_coords(&self, x: usize, y: usize, radius: usize) -> impl Iterator<Item = Coord> {
        let x_lo = x.saturating_sub(radius);
        let x_hi = x.saturating_add(radius).min(self.width.saturating_sub(1));
        let y_lo = y.saturating_sub(radius);
        let y_hi = y.saturating_add(radius).min(self.height.saturating_sub(1));
        (x_lo..=x_hi).flat_map(move |i| (y_lo..=y_hi).map(move |j| Coord::new(i, j)))
    }

    /// In-bounds orthogonal neighbors (up, left, right, down)
    pub fn orthogonal(&self, x: usize, y: usize) -> impl Iterator<Item = Coord> + '_ {
        let candidates = [
            x.checked_sub(1).map(|nx| (nx, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            Some((x, y + 1)),
            Some((x + 1, y)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |&(i, j)| self.in_bounds(i, j))
            .map(|(i, j)| Coord::new(i, j))
    }
}
