pub mod autocorrelation;
mod moments;

pub use autocorrelation::{autocorrelation, integrated_time, sokal_tau};
pub use moments::Moments;
