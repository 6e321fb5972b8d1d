//! # services
//!
//! The aggregate services of the Fritter core: follow graph, feed
//! materializer, thread tree, the relevance scorer strategies, and the
//! orchestrator that sequences cross-aggregate fan-outs.

pub mod feed;
pub mod follow;
pub mod orchestrator;
pub mod scorer;
pub mod thread;

pub use feed::FeedService;
pub use follow::FollowService;
pub use orchestrator::Orchestrator;
pub use scorer::{ConstantScorer, UniformScorer};
pub use thread::ThreadService;
