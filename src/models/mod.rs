mod course;
mod question;

pub use course::Course;
pub use question::{Question, NUM_OPTIONS};
