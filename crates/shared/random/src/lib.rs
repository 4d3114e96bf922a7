//! ETS Random Streams
//!
//! Implementations of the [`RandomSource`] port:
//!
//! - [`SeededRandom`]: `StdRng`-backed stream for real runs; a fixed seed
//!   reproduces a run exactly
//! - [`ScriptedRandom`]: fully deterministic stream for tests
//!
//! ## Usage
//!
//! ```ignore
//! use ets_random::{RandomSource, SeededRandom, shuffle};
//!
//! let mut rng = SeededRandom::new(42);
//! let noise = rng.normal(0.0, 0.01);
//! let mut sellers = vec![0, 1, 2];
//! shuffle(&mut sellers, &mut rng);
//! ```

mod scripted;
mod seeded;

pub use scripted::ScriptedRandom;
pub use seeded::SeededRandom;

// Re-export the port for convenience
pub use ets_ports::{RandomSource, shuffle};
