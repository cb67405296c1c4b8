use crate::{grid::Grid, util::Dims, util::Pos, util::PrototypeId};

/// The flattened result of a successful solve: `[x,z,y] → (prototype, rotation)`.
/// No processing beyond the walk — mesh combination, transform composition,
/// and rendering are the engine integration's job, not the core's (§1).
#[derive(Debug, Clone)]
pub struct GridOutput {
  dims: Dims,
  cells: Vec<(PrototypeId, u8)>,
}

impl GridOutput {
  /// Walks a fully collapsed grid and extracts each cell's sole surviving
  /// prototype and rotation. Panics if any cell is not collapsed; the
  /// solver only ever calls this once `Grid::is_finished` holds.
  pub(crate) fn extract<T>(grid: &Grid, catalog: &crate::catalog::Catalog<T>) -> Self {
    let cells = grid
      .iter()
      .map(|cell| {
        let id = cell
          .collapsed_prototype()
          .expect("extract called on a non-finished grid");
        let rotation = catalog.get(id).rotation();
        (id, rotation)
      })
      .collect();

    Self {
      dims: grid.dims,
      cells,
    }
  }

  pub fn dims(&self) -> Dims {
    self.dims
  }

  pub fn get(&self, x: usize, z: usize, y: usize) -> (PrototypeId, u8) {
    let pos = Pos::new(x as isize, z as isize, y as isize);
    self.cells[self.dims.index(pos)]
  }

  pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, PrototypeId, u8)> + '_ {
    self.cells.iter().enumerate().map(move |(i, &(id, rot))| {
      let pos = self.dims.from_index(i);
      (pos.x as usize, pos.z as usize, pos.y as usize, id, rot)
    })
  }
}
