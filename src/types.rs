use ndarray::Array2;

/// Single coordinate axis used for row and column positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional board coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    a as CellCount * b as CellCount
}

pub trait NeighborIterExt {
    /// All 8 surrounding positions, used for adjacency risk counting.
    fn iter_ring(&self, index: Coord2) -> NeighborIter;

    /// The 4 orthogonal positions, used for flood-fill expansion.
    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_ring(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, dim_to_bounds(self.dim()), &RING)
    }

    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, dim_to_bounds(self.dim()), &ORTHOGONAL)
    }
}

fn dim_to_bounds(dim: (usize, usize)) -> Coord2 {
    (
        dim.0.try_into().expect("board dimension exceeds Coord"),
        dim.1.try_into().expect("board dimension exceeds Coord"),
    )
}

const RING: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i32, i32), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Bounds-checked walk over a fixed displacement table around one cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: &'static [(i32, i32)],
    index: usize,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, deltas: &'static [(i32, i32)]) -> Self {
        Self {
            center,
            bounds,
            deltas,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.deltas.get(self.index)?;
            self.index += 1;

            let next_item = apply_delta(self.center, delta, self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_clipped_at_corners_and_edges() {
        let grid: Array2<u8> = Array2::default((3, 3));

        let corner: Vec<_> = grid.iter_ring((0, 0)).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

        let edge: Vec<_> = grid.iter_ring((0, 1)).collect();
        assert_eq!(edge.len(), 5);

        let center: Vec<_> = grid.iter_ring((1, 1)).collect();
        assert_eq!(center.len(), 8);
    }

    #[test]
    fn orthogonal_excludes_diagonals() {
        let grid: Array2<u8> = Array2::default((3, 3));

        let center: Vec<_> = grid.iter_orthogonal((1, 1)).collect();
        assert_eq!(center, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);

        let corner: Vec<_> = grid.iter_orthogonal((2, 2)).collect();
        assert_eq!(corner, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn mult_covers_full_coord_range() {
        assert_eq!(mult(Coord::MAX, Coord::MAX), 4_294_836_225);
        assert_eq!(mult(0, 5), 0);
    }
}
