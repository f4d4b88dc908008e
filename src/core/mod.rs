pub mod collect;
pub mod engine;
pub mod error;
pub mod fasta;
pub mod io;
pub mod metrics;
pub mod model;
