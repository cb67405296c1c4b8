pub mod catalog;
pub mod cell;
pub(crate) mod err;
pub mod grid;
#[cfg(feature = "profiling")]
pub mod perf;
pub mod prebuilt;
pub mod result;
pub mod rng;
pub mod solver;
pub(crate) mod util;

pub mod prelude {
  pub use super::{
    catalog::{socket_match, Catalog, Prototype},
    cell::Cell,
    err::{Error, Result},
    grid::{apply_predicate, BoundaryHook, BoundaryPredicate},
    prebuilt,
    result::GridOutput,
    rng::SolverRng,
    solver::{Solver, SolverBuilder},
    util::{Dims, Direction, Pos, PrototypeId},
  };
}

pub use prelude::*;
