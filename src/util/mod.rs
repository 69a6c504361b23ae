pub mod fnv;
pub mod rng;
