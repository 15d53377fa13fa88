pub mod detection;
pub mod pipeline;
pub mod preprocess;
pub mod shared;
pub mod signal;
