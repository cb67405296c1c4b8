use crate::{
  catalog::{Catalog, Prototype},
  cell::Cell,
  util::{Dims, Direction},
};

/// The reference boundary hook (§4.D): strips vertical-only tiles from the
/// interior, pins the top layer to the "no-neighbor-above" sentinel, and
/// pins each side face (and, by independent application, each vertical
/// edge) to its own "no-neighbor-beyond" sentinel.
///
/// Suitable as a [`crate::grid::BoundaryHook`] directly, since any
/// `FnMut(&Catalog<T>, &mut [Cell], Dims)` implements that trait.
pub fn canonical_boundary_hook<T>(catalog: &Catalog<T>, cells: &mut [Cell], dims: Dims) {
  for cell in cells.iter_mut() {
    let (x, z, y) = (cell.x, cell.z, cell.y);
    let interior_x = x >= 1 && x + 1 < dims.w;
    let interior_z = z >= 1 && z + 1 < dims.d;
    let top = y + 1 == dims.h;

    if interior_x && interior_z {
      if top {
        retain(cell, catalog, |p| p.socket(Direction::PosY) == "-1");
      } else {
        retain(cell, catalog, |p| !p.description().contains("Vertical"));
      }
    }

    if z + 1 == dims.d {
      retain(cell, catalog, |p| p.socket(Direction::PosZ) == "-1");
    }
    if z == 0 {
      retain(cell, catalog, |p| p.socket(Direction::NegZ) == "-1");
    }
    if x + 1 == dims.w {
      retain(cell, catalog, |p| p.socket(Direction::PosX) == "-1");
    }
    if x == 0 {
      retain(cell, catalog, |p| p.socket(Direction::NegX) == "-1");
    }
  }
}

fn retain<T>(
  cell: &mut Cell,
  catalog: &Catalog<T>,
  keep: impl Fn(&Prototype<T>) -> bool,
) {
  for id in catalog.ids() {
    if !keep(catalog.get(id)) {
      cell.domain.set(id.index(), false);
    }
  }
}

/// The same top-layer sentinel rule as [`canonical_boundary_hook`], expressed
/// as a [`crate::grid::BoundaryPredicate`] for callers that only need a
/// per-cell/per-prototype test rather than whole-array access.
pub fn top_layer_sentinel_predicate<T>(
  pos: crate::util::Pos,
  dims: Dims,
  catalog: &Catalog<T>,
  id: crate::util::PrototypeId,
) -> bool {
  if pos.y as usize + 1 != dims.h {
    return true;
  }
  catalog.get(id).socket(Direction::PosY) == "-1"
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grid::Grid;

  /// Side faces are all tagged "-1" on both prototypes, so the side-face
  /// rule never empties a domain; only `pos_y` distinguishes them, isolating
  /// the top-layer-interior rule under test.
  fn catalog_with_sentinel() -> Catalog<()> {
    Catalog::build(vec![
      Prototype::new(
        "Interior".into(),
        (),
        1,
        0,
        "-1".into(),
        "-1".into(),
        "-1".into(),
        "-1".into(),
        "-1".into(),
        "open".into(),
      ),
      Prototype::new(
        "Sky".into(),
        (),
        1,
        0,
        "-1".into(),
        "-1".into(),
        "-1".into(),
        "-1".into(),
        "-1".into(),
        "-1".into(),
      ),
    ])
    .unwrap()
  }

  #[test]
  fn top_layer_interior_is_restricted_to_the_sentinel_prototype() {
    let catalog = catalog_with_sentinel();
    let mut grid = Grid::allocate(&catalog, Dims::new(3, 3, 2)).unwrap();
    canonical_boundary_hook(&catalog, &mut grid.cells, grid.dims);
    grid.recompute_all(&catalog).unwrap();

    let top_interior = grid.get(crate::util::Pos::new(1, 1, 1));
    assert!(!top_interior.domain.contains(0), "non-sentinel prototype must be excluded");
    assert!(top_interior.domain.contains(1), "sentinel prototype must remain");

    let top_edge = grid.get(crate::util::Pos::new(0, 1, 1));
    assert!(top_edge.domain.contains(0) && top_edge.domain.contains(1));
  }
}
