//! 拓扑构建模块
//!
//! fat-tree 与 Jellyfish 两种数据中心互连拓扑的构建器。

mod fat_tree;
mod jellyfish;

use thiserror::Error;

pub use fat_tree::{FatTree, Pod, build_fat_tree};
pub use jellyfish::{Jellyfish, JellyfishOpts, build_jellyfish};

#[derive(Debug, Error)]
pub enum TopoError {
    /// 构建前的参数检查失败（不会触碰图）
    #[error("switch port count must be even and >= 2, got {k}")]
    BadPortCount { k: usize },
    /// 构建后的结构校验失败，该拓扑不可用于路由
    #[error("fat-tree invariant violated: {0}")]
    InvariantViolation(String),
    /// Jellyfish 在限定次数内未能生成连通图
    #[error("jellyfish stayed disconnected after {attempts} attempts")]
    Unreachable { attempts: usize },
}
