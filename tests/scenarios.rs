use wfc::{prebuilt::canonical_boundary_hook, Catalog, Dims, Prototype, SolverBuilder};

fn prototype(description: &str, weight: u32, sockets: [&str; 6]) -> Prototype<()> {
  let [neg_x, pos_x, neg_z, pos_z, neg_y, pos_y] = sockets;
  Prototype::new(
    description.into(),
    (),
    weight,
    0,
    neg_x.into(),
    pos_x.into(),
    neg_z.into(),
    pos_z.into(),
    neg_y.into(),
    pos_y.into(),
  )
}

/// S1 — a single all-symmetrical prototype collapses any grid in zero
/// retries, regardless of shape.
#[test]
fn s1_single_prototype_catalog_always_succeeds() {
  let build_catalog =
    || Catalog::build(vec![prototype("solo", 1, ["S", "S", "S", "S", "S", "S"])]).unwrap();

  for dims in [Dims::new(1, 1, 1), Dims::new(3, 2, 1), Dims::new(2, 2, 2)] {
    let mut solver = SolverBuilder::new(build_catalog(), dims).seed(11).build().unwrap();
    let output = solver.generate().unwrap();
    assert!(output.iter().all(|(_, _, _, id, _)| id.index() == 0));
  }
}

/// S2 — an asymmetric incompatible pair never places two of the same kind
/// side by side.
#[test]
fn s2_incompatible_pair_only_ever_places_mixed_neighbors() {
  let build_catalog = || {
    Catalog::build(vec![
      prototype("a", 1, ["aF", "a", "S", "S", "S", "S"]),
      prototype("b", 1, ["a", "aF", "S", "S", "S", "S"]),
    ])
    .unwrap()
  };

  for seed in 0..30u64 {
    let mut solver = SolverBuilder::new(build_catalog(), Dims::new(2, 1, 1))
      .seed(seed)
      .build()
      .unwrap();
    let output = solver.generate().unwrap();

    let left = output.get(0, 0, 0).0;
    let right = output.get(1, 0, 0).0;
    assert_ne!(left, right, "seed {seed}: (A,A) or (B,B) placed side by side");
  }
}

/// S3 — a prototype that cannot neighbor itself along X guarantees a
/// contradiction on any grid wider than one cell; `retry_count=0` must
/// raise `RetryCountExceeded(0)` rather than looping.
#[test]
fn s3_contradiction_exhausts_zero_retries() {
  let catalog =
    Catalog::build(vec![prototype("lonely", 1, ["p", "p", "S", "S", "S", "S"])]).unwrap();

  let mut solver = SolverBuilder::new(catalog, Dims::new(2, 1, 1))
    .retry_count(0)
    .seed(5)
    .build()
    .unwrap();

  let err = solver.generate().unwrap_err();
  assert!(matches!(err, wfc::Error::RetryCountExceeded(0)));
}

/// S4 — with `propagation_depth=0`, the solver still reaches a fully
/// collapsed, adjacency-correct grid because the observation loop visits
/// every cell regardless of how far a single propagation step reaches.
#[test]
fn s4_propagation_depth_zero_still_completes() {
  let catalog = Catalog::build(vec![
    prototype("solo", 1, ["S", "S", "S", "S", "S", "S"]),
    prototype("lonely", 1, ["L", "LF", "L", "LF", "S", "S"]),
  ])
  .unwrap();

  let mut solver = SolverBuilder::new(catalog.clone(), Dims::new(3, 3, 1))
    .propagation_depth(0)
    .seed(2)
    .build()
    .unwrap();

  let output = solver.generate().unwrap();
  assert_eq!(output.dims().len(), 9);

  for (x, z, y, id, _) in output.iter() {
    if x + 1 < output.dims().w {
      let right = output.get(x + 1, z, y).0;
      let neighbors = catalog.neighbors(id, wfc::Direction::PosX);
      assert!(neighbors.contains(right.index()), "adjacency violated at ({x},{z},{y})");
    }
  }
}

/// S5 — the canonical boundary hook's top-layer sentinel rule forces every
/// interior top-layer cell to the one prototype that satisfies it.
#[test]
fn s5_boundary_sentinel_forces_top_layer_prototype() {
  let catalog = Catalog::build(vec![
    prototype("ground", 1, ["-1", "-1", "-1", "-1", "-1", "open"]),
    prototype("sky", 1, ["-1", "-1", "-1", "-1", "open", "-1"]),
  ])
  .unwrap();

  let mut solver = SolverBuilder::new(catalog, Dims::new(3, 3, 2))
    .seed(19)
    .boundary_hook(canonical_boundary_hook)
    .build()
    .unwrap();

  let output = solver.generate().unwrap();
  for (x, z, y, id, _) in output.iter() {
    if y == 1 && x == 1 && z == 1 {
      assert_eq!(id.index(), 1, "interior top-layer cell must be the sky prototype");
    }
  }
}

/// S6 — a 9:1 weight ratio between two mutually-compatible prototypes
/// produces roughly a 90%/10% split over many independent single-cell runs.
#[test]
fn s6_weight_distribution_is_roughly_proportional() {
  let build_catalog = || {
    Catalog::build(vec![
      prototype("light", 1, ["S", "S", "S", "S", "S", "S"]),
      prototype("heavy", 9, ["S", "S", "S", "S", "S", "S"]),
    ])
    .unwrap()
  };

  let trials = 400u64;
  let mut heavy_count = 0u32;

  for seed in 0..trials {
    let mut solver = SolverBuilder::new(build_catalog(), Dims::new(1, 1, 1))
      .seed(seed)
      .build()
      .unwrap();
    let output = solver.generate().unwrap();
    if output.get(0, 0, 0).0.index() == 1 {
      heavy_count += 1;
    }
  }

  let fraction = f64::from(heavy_count) / trials as f64;
  assert!(
    (0.80..=0.98).contains(&fraction),
    "expected roughly 90% heavy occurrences, got {fraction}"
  );
}
