pub mod analysis;
pub mod config;
pub mod error;
pub mod paths;
pub mod report;
pub mod topo;
pub mod traffic;

#[cfg(test)]
mod test;
