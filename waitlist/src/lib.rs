pub mod domain;
pub mod ports;
pub mod segments;
pub mod submission;
