pub mod dataset;
pub mod labels;

pub use dataset::{read_sample, TrainingSet};
pub use labels::{class_labels, label_vector, label_width};
