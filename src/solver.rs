use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fixedbitset::FixedBitSet;
use tracing::{debug, info, warn};

use crate::{
  catalog::Catalog,
  err::{Error, Result},
  grid::{BoundaryHook, Grid},
  result::GridOutput,
  rng::SolverRng,
  util::{Direction, Dims, Pos},
};

/// Named, defaulted configuration surface for a [`Solver`], in the teacher's
/// builder style.
pub struct SolverBuilder<T> {
  catalog: Catalog<T>,
  dims: Dims,
  propagation_depth: i64,
  retry_count: i64,
  seed: Option<u64>,
  hook: Option<Box<dyn FnMut(&Catalog<T>, &mut [crate::cell::Cell], Dims)>>,
}

impl<T> SolverBuilder<T> {
  pub fn new(catalog: Catalog<T>, dims: Dims) -> Self {
    Self {
      catalog,
      dims,
      propagation_depth: -1,
      retry_count: -1,
      seed: None,
      hook: None,
    }
  }

  pub fn propagation_depth(mut self, propagation_depth: i64) -> Self {
    self.propagation_depth = propagation_depth;
    self
  }

  pub fn retry_count(mut self, retry_count: i64) -> Self {
    self.retry_count = retry_count;
    self
  }

  pub fn seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  pub fn boundary_hook(
    mut self,
    hook: impl FnMut(&Catalog<T>, &mut [crate::cell::Cell], Dims) + 'static,
  ) -> Self {
    self.hook = Some(Box::new(hook));
    self
  }

  /// Validates the configuration and produces a ready-to-run [`Solver`].
  ///
  /// # Errors
  /// [`Error::InvalidInput`] if `propagation_depth` or `retry_count` is an
  /// integer below `-1`, or if `dims` has a zero axis.
  pub fn build(self) -> Result<Solver<T>> {
    if self.propagation_depth < -1 {
      return Err(Error::InvalidInput(format!(
        "propagation_depth must be -1 or >= 0, got {}",
        self.propagation_depth
      )));
    }
    if self.retry_count < -1 {
      return Err(Error::InvalidInput(format!(
        "retry_count must be -1 or >= 0, got {}",
        self.retry_count
      )));
    }
    if self.dims.is_empty() {
      return Err(Error::InvalidInput(format!(
        "grid dimensions must all be >= 1, got {}x{}x{}",
        self.dims.w, self.dims.d, self.dims.h
      )));
    }

    Ok(Solver {
      catalog: self.catalog,
      dims: self.dims,
      propagation_depth: self.propagation_depth,
      retry_count: self.retry_count,
      rng: SolverRng::new(self.seed),
      hook: self.hook,
      cancel: None,
    })
  }
}

/// Runs one or more solve attempts against a fixed catalog and grid shape,
/// restarting on contradiction until either a full collapse or the retry
/// cap is reached.
pub struct Solver<T> {
  catalog: Catalog<T>,
  dims: Dims,
  propagation_depth: i64,
  retry_count: i64,
  rng: SolverRng,
  hook: Option<Box<dyn FnMut(&Catalog<T>, &mut [crate::cell::Cell], Dims)>>,
  cancel: Option<Arc<AtomicBool>>,
}

impl<T> Solver<T> {
  /// Registers a cooperative cancellation flag, checked between observation
  /// steps and at each `propagate` work-stack pop (§5).
  pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
    self.cancel = Some(flag);
    self
  }

  fn is_cancelled(&self) -> bool {
    self
      .cancel
      .as_ref()
      .is_some_and(|flag| flag.load(Ordering::Relaxed))
  }

  /// Runs attempts until the grid fully collapses or `retry_count` is
  /// exhausted.
  #[profiling::function]
  pub fn generate(&mut self) -> Result<GridOutput> {
    let mut retries: u64 = 0;

    loop {
      match self.attempt() {
        Ok(grid) => {
          info!(retries, "grid fully collapsed");
          return Ok(GridOutput::extract(&grid, &self.catalog));
        }
        Err(Error::Contradiction { x, z, y }) => {
          warn!(x, z, y, retries, "contradiction, retrying");
          retries += 1;
          if self.retry_count != -1 && retries as i64 > self.retry_count {
            return Err(Error::RetryCountExceeded(self.retry_count as u64));
          }
        }
        Err(other) => return Err(other),
      }
    }
  }

  #[profiling::function]
  fn attempt(&mut self) -> Result<Grid> {
    if self.is_cancelled() {
      return Err(Error::Cancelled);
    }

    debug!(
      w = self.dims.w,
      d = self.dims.d,
      h = self.dims.h,
      seed = self.rng.seed(),
      "starting solver attempt"
    );

    let mut grid = Grid::allocate(&self.catalog, self.dims)?;

    if let Some(hook) = self.hook.as_mut() {
      hook.apply(&self.catalog, &mut grid.cells, self.dims);
      grid.recompute_all(&self.catalog)?;
    }

    let seed_pos = self.rng.random_pos(self.dims);
    self.collapse_and_propagate(&mut grid, seed_pos)?;

    while !grid.is_finished() {
      if self.is_cancelled() {
        return Err(Error::Cancelled);
      }

      let pos = self
        .select_lowest_entropy(&grid)
        .expect("grid not finished implies an open cell remains");
      self.collapse_and_propagate(&mut grid, pos)?;
    }

    Ok(grid)
  }

  /// Full scan for the smallest entropy among still-open cells, ties broken
  /// by ascending flat index (§4.E step 3a).
  ///
  /// "Open" is decided by domain cardinality, not by `entropy > 0.0`:
  /// `shannon_entropy` (cell.rs) has no singleton special case, so float
  /// rounding can leave a collapsed cell's cached entropy a few ULPs above
  /// zero (e.g. weight 23 yields `entropy ≈ 4.44e-16` for `|domain| == 1`).
  /// Filtering on the float would let that cell win every scan forever,
  /// since its spurious epsilon is always smaller than any genuinely open
  /// cell's real entropy, and `collapse`/`propagate` are no-ops on an
  /// already-collapsed cell — hanging the observation loop.
  fn select_lowest_entropy(&self, grid: &Grid) -> Option<Pos> {
    grid
      .iter()
      .enumerate()
      .filter(|(_, cell)| cell.domain.count_ones(..) > 1)
      .min_by(|(_, a), (_, b)| a.entropy.partial_cmp(&b.entropy).unwrap())
      .map(|(index, _)| grid.dims.from_index(index))
  }

  fn collapse_and_propagate(&mut self, grid: &mut Grid, pos: Pos) -> Result<()> {
    grid.get_mut(pos).collapse(&self.catalog, &mut self.rng);
    self.propagate(grid, pos)
  }

  /// Explicit work stack of `(position, depth)`, rather than recursion, so
  /// large grids with unbounded `propagation_depth` cannot overflow the
  /// call stack (§9).
  #[profiling::function]
  fn propagate(&mut self, grid: &mut Grid, origin: Pos) -> Result<()> {
    let mut stack = vec![(origin, 0i64)];

    while let Some((pos, depth)) = stack.pop() {
      if self.is_cancelled() {
        return Err(Error::Cancelled);
      }

      if self.propagation_depth != -1 && depth >= self.propagation_depth {
        continue;
      }

      let mut invalid = FixedBitSet::with_capacity(self.catalog.len());
      let mut to_push = Vec::new();

      for dir in Direction::all() {
        let neighbor_pos = pos.stepped(dir);
        if !grid.dims.contains(neighbor_pos) {
          continue;
        }

        let origin_cell = grid.get(pos);
        let neighbor_cell = grid.get(neighbor_pos);

        let mut invalid_here = origin_cell.domain.clone();
        invalid_here.difference_with(&neighbor_cell.neighbor_union[dir.opposite().index()]);
        invalid.union_with(&invalid_here);

        let mut shrink_neighbor = neighbor_cell.domain.clone();
        shrink_neighbor.difference_with(&origin_cell.neighbor_union[dir.index()]);
        if shrink_neighbor.count_ones(..) > 0 {
          to_push.push(neighbor_pos);
        }
      }

      if invalid.count_ones(..) > 0 {
        grid.get_mut(pos).remove_probabilities(&self.catalog, &invalid)?;
      }

      for neighbor_pos in to_push {
        stack.push((neighbor_pos, depth + 1));
      }
    }

    Ok(())
  }
}
