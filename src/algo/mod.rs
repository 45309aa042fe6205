pub mod oracle;
pub mod reduce;
pub mod sample;
pub mod solver;
