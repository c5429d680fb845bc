//! Latent-factor modelling for recnews.
//!
//! The crate covers the numeric half of the engine:
//! - **Interaction matrix** construction turns `(user, item, score)` rows into
//!   a sparse CSR matrix via `sprs`, summing repeated pairs and assigning
//!   stable dense indices in table order.
//! - **Factorisation** runs an exact truncated SVD through `nalgebra`, giving
//!   user factors `UΣ` and item factors `V`. It happens once per snapshot and
//!   never on the request path.
//! - **Similarity ranking** scores every item against a user's factor vector
//!   by cosine similarity and orders the best candidates by similarity,
//!   recency, then popularity.
//!
//! # Examples
//!
//! ```
//! use recnews_core::{Interaction, Item, ItemCatalogue};
//! use recnews_factors::LatentFactors;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let interactions = [
//!     Interaction::new("u1", "i1", 5.0),
//!     Interaction::new("u1", "i2", 1.0),
//!     Interaction::new("u2", "i1", 1.0),
//!     Interaction::new("u2", "i2", 5.0),
//! ];
//! let catalogue = ItemCatalogue::new(vec![Item::new("i1", 0.1, 0.1), Item::new("i2", 0.9, 0.9)])?;
//! let factors = LatentFactors::fit(&interactions, 2)?;
//! let ranked = factors.rank_by_similarity(&catalogue, "u1", 1, None);
//! assert_eq!(ranked[0].item.id, "i1");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod matrix;
mod model;
mod similarity;

pub use error::FactorError;
pub use matrix::InteractionMatrix;
pub use model::{DEFAULT_RANK, FactorModel};
pub use similarity::{LatentFactors, cosine_similarity, similarity_order};
