use criterion::{criterion_group, criterion_main};

criterion_main!(base);

criterion_group!(base, growing_cube::bench, misc::bench);

const SEED: u64 = 123;

mod growing_cube {
  use crate::SEED;
  use criterion::Criterion;
  use wfc::{Catalog, Dims, Prototype, SolverBuilder};

  fn catalog() -> Catalog<()> {
    Catalog::build(vec![
      Prototype::new(
        "open".into(),
        (),
        4,
        0,
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
      Prototype::new(
        "a".into(),
        (),
        1,
        0,
        "aF".into(),
        "a".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
      Prototype::new(
        "b".into(),
        (),
        1,
        0,
        "a".into(),
        "aF".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
    ])
    .unwrap()
  }

  pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("growing-cube");

    for side in [4_usize, 8, 16, 24] {
      let catalog = catalog();
      group.bench_function(format!("{side}x{side}x{side}"), |b| {
        b.iter(|| {
          let mut solver = SolverBuilder::new(catalog(), Dims::new(side, side, side))
            .seed(SEED)
            .build()
            .expect("failed to build solver");
          solver.generate().expect("failed to collapse")
        })
      });
    }

    group.finish();
  }
}

mod misc {
  use crate::SEED;
  use criterion::Criterion;
  use wfc::{Catalog, Dims, Prototype, SolverBuilder};

  fn catalog() -> Catalog<usize> {
    Catalog::build(vec![
      Prototype::new(
        "0".into(),
        0,
        1,
        0,
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
      Prototype::new(
        "1".into(),
        1,
        1,
        0,
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
      Prototype::new(
        "2".into(),
        2,
        1,
        0,
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
      Prototype::new(
        "3".into(),
        3,
        1,
        0,
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
        "S".into(),
      ),
    ])
    .unwrap()
  }

  pub fn bench(c: &mut Criterion) {
    c.benchmark_group("misc")
      .sample_size(10)
      .bench_function("50x50x50", |b| b.iter(|| execute(Dims::new(50, 50, 50))))
      .bench_function("minecraft chunk", |b| {
        b.iter(|| execute(Dims::new(16, 16, 256)))
      });
  }

  fn execute(dims: Dims) {
    let mut solver = SolverBuilder::new(catalog(), dims)
      .seed(SEED)
      .retry_count(4)
      .build()
      .expect("failed to build solver");
    solver.generate().expect("failed to collapse");
  }
}
