pub mod boundary;

pub use boundary::canonical_boundary_hook;
