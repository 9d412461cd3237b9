pub mod enricher;
pub mod progress;
pub mod providers;
pub mod recommendations;
pub mod resolver;

pub use enricher::{DisplayFailure, PosterEnricher, PosterLookup};
pub use progress::{EventLog, ProgressSink};
pub use recommendations::{PipelineOutcome, RecommendationPipeline, ResultSet};
pub use resolver::RecommendationResolver;
