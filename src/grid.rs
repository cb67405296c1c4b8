use crate::{
  catalog::Catalog,
  cell::Cell,
  err::{Error, Result},
  util::{Dims, Pos},
};

/// A `W×D×H` array of cells, indexed `[x,z,y]` via [`Dims::index`].
#[derive(Debug)]
pub struct Grid {
  pub dims: Dims,
  pub cells: Vec<Cell>,
}

impl Grid {
  /// Allocates one cell per position, each starting with the catalog's full
  /// domain.
  pub fn allocate<T>(catalog: &Catalog<T>, dims: Dims) -> Result<Self> {
    if dims.is_empty() {
      return Err(Error::InvalidInput(format!(
        "grid dimensions must all be >= 1, got {}x{}x{}",
        dims.w, dims.d, dims.h
      )));
    }

    let cells = (0..dims.len())
      .map(|i| {
        let pos = dims.from_index(i);
        Cell::new(
          catalog,
          catalog.full_domain(),
          pos.x as usize,
          pos.z as usize,
          pos.y as usize,
        )
      })
      .collect();

    Ok(Self { dims, cells })
  }

  pub fn get(&self, pos: Pos) -> &Cell {
    &self.cells[self.dims.index(pos)]
  }

  pub fn get_mut(&mut self, pos: Pos) -> &mut Cell {
    &mut self.cells[self.dims.index(pos)]
  }

  pub fn is_finished(&self) -> bool {
    self.cells.iter().all(Cell::collapsed)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Cell> {
    self.cells.iter()
  }

  /// Recomputes every cell's entropy and neighbor union from its current
  /// domain. Called once after a boundary hook has mutated `cells` in
  /// place, re-establishing invariants I4/I5 (§3).
  ///
  /// # Errors
  /// [`Error::InvalidInput`] if the hook emptied any cell's domain — a
  /// malformed hook is a construction-time error, not a mid-solve
  /// contradiction.
  pub fn recompute_all<T>(&mut self, catalog: &Catalog<T>) -> Result<()> {
    for cell in &mut self.cells {
      if cell.domain.count_ones(..) == 0 {
        return Err(Error::InvalidInput(format!(
          "boundary hook left cell ({}, {}, {}) with an empty domain",
          cell.x, cell.z, cell.y
        )));
      }
      // a no-op removal still forces entropy/neighbor_union to recompute
      let empty = fixedbitset::FixedBitSet::with_capacity(cell.domain.len());
      cell
        .remove_probabilities(catalog, &empty)
        .expect("removing nothing cannot empty a non-empty domain");
    }
    Ok(())
  }
}

/// A boundary hook mutates the freshly allocated cell array in place before
/// solving starts. It is the only supported mechanism for restricting
/// boundary cells (§4.D); the solver invokes it exactly once.
pub trait BoundaryHook<T> {
  fn apply(&mut self, catalog: &Catalog<T>, cells: &mut [Cell], dims: Dims);
}

impl<T, F> BoundaryHook<T> for F
where
  F: FnMut(&Catalog<T>, &mut [Cell], Dims),
{
  fn apply(&mut self, catalog: &Catalog<T>, cells: &mut [Cell], dims: Dims) {
    self(catalog, cells, dims)
  }
}

/// A declarative per-cell, per-prototype restriction, as an alternative to
/// a full [`BoundaryHook`] closure for hooks that don't need whole-array
/// access.
pub trait BoundaryPredicate<T> {
  fn keep(&self, pos: Pos, dims: Dims, catalog: &Catalog<T>, id: crate::util::PrototypeId)
    -> bool;
}

impl<T, F> BoundaryPredicate<T> for F
where
  F: Fn(Pos, Dims, &Catalog<T>, crate::util::PrototypeId) -> bool,
{
  fn keep(
    &self,
    pos: Pos,
    dims: Dims,
    catalog: &Catalog<T>,
    id: crate::util::PrototypeId,
  ) -> bool {
    self(pos, dims, catalog, id)
  }
}

/// Applies a [`BoundaryPredicate`] to every cell: a prototype survives in a
/// cell's domain only if the predicate returns `true` for it there.
pub fn apply_predicate<T>(
  catalog: &Catalog<T>,
  cells: &mut [Cell],
  dims: Dims,
  predicate: &impl BoundaryPredicate<T>,
) {
  for cell in cells {
    let pos = Pos::new(cell.x as isize, cell.z as isize, cell.y as isize);
    for id in catalog.ids() {
      if !predicate.keep(pos, dims, catalog, id) {
        cell.domain.set(id.index(), false);
      }
    }
  }
}
