pub mod model;
pub mod postprocess;
pub mod preprocess;
