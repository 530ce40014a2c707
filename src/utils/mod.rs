pub mod error;

pub use error::ExerciseError;
