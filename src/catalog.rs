use crate::{
  err::{Error, Result},
  util::{Direction, PrototypeId},
};
use fixedbitset::FixedBitSet;

/// An immutable tile archetype: a description, an opaque payload handed back
/// to the caller untouched, a collapse weight, a baked-in rotation, and six
/// face sockets.
///
/// `description` and the socket labels are never interpreted beyond what
/// [`socket_match`] inspects; `tile` is never interpreted at all.
#[derive(Debug, Clone, derive_new::new)]
pub struct Prototype<T> {
  description: String,
  tile: T,
  weight: u32,
  rotation: u8,
  neg_x: String,
  pos_x: String,
  neg_z: String,
  pos_z: String,
  neg_y: String,
  pos_y: String,
}

impl<T> Prototype<T> {
  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn tile(&self) -> &T {
    &self.tile
  }

  pub fn weight(&self) -> u32 {
    self.weight
  }

  pub fn rotation(&self) -> u8 {
    self.rotation
  }

  pub fn socket(&self, dir: Direction) -> &str {
    match dir {
      Direction::NegX => &self.neg_x,
      Direction::PosX => &self.pos_x,
      Direction::NegZ => &self.neg_z,
      Direction::PosZ => &self.pos_z,
      Direction::NegY => &self.neg_y,
      Direction::PosY => &self.pos_y,
    }
  }
}

impl<T> Prototype<T> {
  /// Builds a prototype from a sparse socket map, defaulting any direction
  /// not present to `default_socket`. Convenient for the 2D case (§11): give
  /// only the four horizontal sockets and default the vertical pair to a
  /// symmetrical label such as `"S"`.
  pub fn from_sockets(
    description: impl Into<String>,
    tile: T,
    weight: u32,
    rotation: u8,
    sockets: std::collections::HashMap<Direction, String>,
    default_socket: &str,
  ) -> Self {
    let socket = |dir: Direction| {
      sockets
        .get(&dir)
        .cloned()
        .unwrap_or_else(|| default_socket.to_string())
    };
    Self::new(
      description.into(),
      tile,
      weight,
      rotation,
      socket(Direction::NegX),
      socket(Direction::PosX),
      socket(Direction::NegZ),
      socket(Direction::PosZ),
      socket(Direction::NegY),
      socket(Direction::PosY),
    )
  }
}

/// Decides whether socket `a`, read off a prototype's face in direction
/// `dir`, mates with socket `b`, read off the opposing face of the
/// neighboring prototype.
///
/// Horizontal faces (`±X`, `±Z`) use the `F`/`S`/`-` authoring convention;
/// the vertical axis (`±Y`) is plain equality.
pub fn socket_match(a: &str, b: &str, dir: Direction) -> bool {
  if dir.is_vertical() {
    return a == b;
  }

  if a.contains('F') {
    a == format!("{b}F")
  } else if a.contains('S') || a.contains('-') {
    a == b
  } else {
    format!("{a}F") == b
  }
}

/// A frozen catalog of prototypes plus, for every prototype and every face
/// direction, the precomputed bitset of prototype ids that may legally sit
/// across that face.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
  prototypes: Vec<Prototype<T>>,
  neighbor_sets: Vec<[FixedBitSet; 6]>,
}

impl<T> Catalog<T> {
  /// Builds the catalog, deriving every prototype's six neighbor sets from
  /// its authored sockets. `(p, p)` is included where `p`'s own socket
  /// matches itself, since a prototype may be its own neighbor.
  ///
  /// Total except for the input-validity checks in §7: an empty catalog or
  /// any `weight < 1` is rejected as [`Error::InvalidInput`].
  #[profiling::function]
  pub fn build(prototypes: Vec<Prototype<T>>) -> Result<Self> {
    if prototypes.is_empty() {
      return Err(Error::InvalidInput("prototype catalog must not be empty".into()));
    }

    if let Some(bad) = prototypes.iter().position(|p| p.weight < 1) {
      return Err(Error::InvalidInput(format!(
        "prototype {bad} has weight {}; weights must be >= 1",
        prototypes[bad].weight
      )));
    }

    let n = prototypes.len();
    let neighbor_sets: Vec<[FixedBitSet; 6]> = (0..n)
      .map(|p_id| {
        let row: [FixedBitSet; 6] = std::array::from_fn(|dir_idx| {
          let dir = Direction::all()[dir_idx];
          let mut set = FixedBitSet::with_capacity(n);
          for q_id in 0..n {
            if socket_match(
              prototypes[p_id].socket(dir),
              prototypes[q_id].socket(dir.opposite()),
              dir,
            ) {
              set.insert(q_id);
            }
          }
          set
        });
        row
      })
      .collect();

    Ok(Self {
      prototypes,
      neighbor_sets,
    })
  }

  pub fn len(&self) -> usize {
    self.prototypes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.prototypes.is_empty()
  }

  pub fn get(&self, id: PrototypeId) -> &Prototype<T> {
    &self.prototypes[id.index()]
  }

  pub fn ids(&self) -> impl Iterator<Item = PrototypeId> {
    (0..self.prototypes.len() as u32).map(PrototypeId)
  }

  /// The bitset of prototype ids compatible with `id` across `dir`.
  pub fn neighbors(&self, id: PrototypeId, dir: Direction) -> &FixedBitSet {
    &self.neighbor_sets[id.index()][dir.index()]
  }

  /// A bitset with every prototype id in the catalog set, the starting
  /// domain of an unconstrained cell.
  pub fn full_domain(&self) -> FixedBitSet {
    let mut set = FixedBitSet::with_capacity(self.len());
    set.insert_range(..);
    set
  }
}
