pub mod enrichment;
pub mod fallback;
pub mod llm;
pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod recovery;
pub mod title_search;

pub use recommendations::{GenerationSettings, RecommendationSource, Recommender};
