pub mod alphabet;
pub mod analysis;
pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod keys;
pub mod optimizer;
pub mod results;
pub mod scorer;
pub mod search;
pub mod util;

pub use crate::alphabet::Alphabet;
pub use crate::api::{Cracker, Solution};
pub use crate::error::{QbResult, QuadbreakError};
pub use crate::keys::{AffineKey, CipherKey, Key, KeyKind, Neighbor, SubstitutionKey, VigenereKey};
pub use crate::results::{ResultSet, ScoredCandidate};
pub use crate::scorer::Scorer;
