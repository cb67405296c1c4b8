use crate::{
  catalog::Catalog,
  err::{Error, Result},
  util::{Direction, PrototypeId},
};
use fixedbitset::FixedBitSet;
use rand::Rng;

/// A grid position's mutable WFC state: the still-possible subset of
/// prototype ids (`domain`), the Shannon entropy of their weights, and,
/// per face direction, the union of `domain`'s neighbor sets — the bound
/// that propagation imposes on the cell across the way.
#[derive(Debug, Clone)]
pub struct Cell {
  pub x: usize,
  pub z: usize,
  pub y: usize,
  pub domain: FixedBitSet,
  pub entropy: f64,
  pub neighbor_union: [FixedBitSet; 6],
}

impl Cell {
  pub fn new<T>(catalog: &Catalog<T>, domain: FixedBitSet, x: usize, z: usize, y: usize) -> Self {
    let entropy = shannon_entropy(&domain, catalog);
    let neighbor_union = neighbor_union(&domain, catalog);
    Self {
      x,
      z,
      y,
      domain,
      entropy,
      neighbor_union,
    }
  }

  /// `|domain| == 1`; by convention `entropy == 0` exactly when this holds.
  pub fn collapsed(&self) -> bool {
    self.domain.count_ones(..) == 1
  }

  pub fn collapsed_prototype(&self) -> Option<PrototypeId> {
    self
      .collapsed()
      .then(|| self.domain.ones().next())
      .flatten()
      .map(|i| PrototypeId(i as u32))
  }

  /// Removes `removed` from `domain`, recomputing entropy and the neighbor
  /// union. Returns `Ok(true)` if the cell is now collapsed.
  ///
  /// # Errors
  /// [`Error::Contradiction`] if the domain would become empty.
  pub fn remove_probabilities<T>(
    &mut self,
    catalog: &Catalog<T>,
    removed: &FixedBitSet,
  ) -> Result<bool> {
    let mut shrunk = self.domain.clone();
    shrunk.difference_with(removed);

    if shrunk.count_ones(..) == 0 {
      return Err(Error::Contradiction {
        x: self.x,
        z: self.z,
        y: self.y,
      });
    }

    self.domain = shrunk;
    self.entropy = shannon_entropy(&self.domain, catalog);
    self.neighbor_union = neighbor_union(&self.domain, catalog);

    Ok(self.collapsed())
  }

  /// Weighted-random collapse to a single prototype. Noop if already
  /// collapsed.
  pub fn collapse<T, R: Rng + ?Sized>(&mut self, catalog: &Catalog<T>, rng: &mut R) {
    if self.collapsed() {
      return;
    }

    let total: u64 = self
      .domain
      .ones()
      .map(|i| catalog.get(PrototypeId(i as u32)).weight() as u64)
      .sum();

    let mut roll = rng.random_range(1..=total);
    let chosen = self
      .domain
      .ones()
      .find(|&i| {
        let w = catalog.get(PrototypeId(i as u32)).weight() as u64;
        if roll <= w {
          true
        } else {
          roll -= w;
          false
        }
      })
      .expect("weighted walk must land on a domain member");

    let mut singleton = FixedBitSet::with_capacity(self.domain.len());
    singleton.insert(chosen);
    self.domain = singleton;
    self.entropy = 0.0;
    self.neighbor_union = neighbor_union(&self.domain, catalog);
  }
}

/// `H = ln(W) - (Σ w·ln(w)) / W` over the weights of `domain`'s members.
/// `0` for a singleton domain, by construction of the formula (not as a
/// special case), and `0` for an empty domain (a state that should never
/// persist — see [`Cell::remove_probabilities`]).
fn shannon_entropy<T>(domain: &FixedBitSet, catalog: &Catalog<T>) -> f64 {
  let weights: Vec<f64> = domain
    .ones()
    .map(|i| catalog.get(PrototypeId(i as u32)).weight() as f64)
    .collect();

  let total: f64 = weights.iter().sum();
  if total <= 0.0 {
    return 0.0;
  }

  let weighted_log_sum: f64 = weights.iter().map(|w| w * w.ln()).sum();
  total.ln() - weighted_log_sum / total
}

fn neighbor_union<T>(domain: &FixedBitSet, catalog: &Catalog<T>) -> [FixedBitSet; 6] {
  let n = catalog.len();
  std::array::from_fn(|dir_idx| {
    let dir = Direction::all()[dir_idx];
    let mut union = FixedBitSet::with_capacity(n);
    for id in domain.ones() {
      union.union_with(catalog.neighbors(PrototypeId(id as u32), dir));
    }
    union
  })
}
