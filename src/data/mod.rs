mod loader;

pub use loader::{builtin_courses, builtin_questions, LoadError};
