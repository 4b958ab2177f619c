pub mod config;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod risk;
pub mod segmentation;
pub mod training;

pub mod error;
