//! Domain records for the nutritional psychiatry database.
//!
//! These are the typed shapes predictions are parsed into and the food
//! record they are merged back onto. Every optional measurement is an
//! explicit `Option`, so "not predicted" and "predicted as zero" stay
//! distinct and absent values are skipped on serialization.

mod food;
mod impacts;
pub mod lenient;
mod nutrients;

pub use food::{DataQuality, DataSource, FoodRecord};
pub use impacts::{MentalHealthImpact, NutrientInteraction, ResearchSupport};
pub use nutrients::{BioactiveCompounds, BrainNutrients, Omega3, StandardNutrients};
