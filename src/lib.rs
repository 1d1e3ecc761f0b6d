pub mod addr;
pub mod ctl;
pub mod graph;
pub mod path;
pub mod routing;
pub mod topo;

#[cfg(test)]
mod test;
