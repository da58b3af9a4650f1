pub mod driver;
pub mod exchanger;
pub mod merger;
pub mod partition;
pub mod partitioner;
pub mod pivot;
pub mod sequential;
