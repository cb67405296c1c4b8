use crate::util::{Dims, Pos};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// The uniform integer source threaded explicitly through collapse and
/// seed-cell selection so that a fixed seed reproduces a fixed run (§8 S3).
///
/// Wraps a deterministic PRNG rather than a thread-local one, unlike the
/// legacy source's process-wide random source (§9).
#[derive(Debug, Clone)]
pub struct SolverRng {
  seed: u64,
  inner: ChaCha20Rng,
}

impl SolverRng {
  pub fn new(seed: Option<u64>) -> Self {
    let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
    Self {
      seed,
      inner: ChaCha20Rng::seed_from_u64(seed),
    }
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }

  /// A uniformly random coordinate over the whole grid, used for the
  /// seed-collapse step regardless of entropy (§4.E step 2).
  pub fn random_pos(&mut self, dims: Dims) -> Pos {
    Pos::new(
      self.inner.random_range(0..dims.w) as isize,
      self.inner.random_range(0..dims.d) as isize,
      self.inner.random_range(0..dims.h) as isize,
    )
  }
}

impl RngCore for SolverRng {
  fn next_u32(&mut self) -> u32 {
    self.inner.next_u32()
  }

  fn next_u64(&mut self) -> u64 {
    self.inner.next_u64()
  }

  fn fill_bytes(&mut self, dest: &mut [u8]) {
    self.inner.fill_bytes(dest)
  }
}
