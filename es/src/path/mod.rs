//! Learning paths: the document contract, its generation, and the path list

mod collection;
mod generator;
mod schema;
mod topic;

pub use collection::PathCollection;
pub use generator::{GenerationFailure, PathGenerator, parse_learning_path};
pub use schema::{LearningPath, LearningStep, SCHEMA_NAME, learning_path_schema};
pub use topic::{Topic, TopicError};
