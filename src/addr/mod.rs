//! 地址类型
//!
//! 点分四段地址（可选前缀长度），例如 `10.0.1.1/24` 或 `10.0.1.1`。
//! 掩码只在作为匹配的右操作数时生效，并且只有 8/16/24 会产生匹配；
//! 其它掩码（包括 `0.0.0.0/0` 的 0）永远不匹配，路由表用这一点实现
//! 兜底行。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddrParseError {
    #[error("expected 4 octets, got {got} in {text:?}")]
    OctetCount { got: usize, text: String },
    #[error("invalid octet {octet:?} in {text:?}")]
    BadOctet { octet: String, text: String },
    #[error("invalid mask {mask:?} in {text:?}")]
    BadMask { mask: String, text: String },
}

/// 匹配方向
///
/// 左手匹配从左往右比较（“指向子网/pod 的路由”），右手匹配从右往左
/// 比较（“指向 pod 内主机偏移的路由”）。两种方向共用一张紧凑表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    LeftHanded,
    RightHanded,
}

/// 点分地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    octets: [u8; 4],
    mask: Option<u8>,
}

impl Address {
    pub fn new(octets: [u8; 4], mask: Option<u8>) -> Self {
        Self { octets, mask }
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    pub fn mask(&self) -> Option<u8> {
        self.mask
    }

    /// 判断本地址是否匹配 `other`，按 `other` 的掩码比较，忽略自身掩码
    ///
    /// `other` 无掩码、或掩码不在 {8, 16, 24} 中时永远不匹配。
    pub fn matches(&self, other: &Address, mode: MatchMode) -> bool {
        let eq = |i: usize| self.octets[i] == other.octets[i];
        match (other.mask, mode) {
            (Some(24), MatchMode::LeftHanded) => eq(0) && eq(1) && eq(2),
            (Some(24), MatchMode::RightHanded) => eq(1) && eq(2) && eq(3),
            (Some(16), MatchMode::LeftHanded) => eq(0) && eq(1),
            (Some(16), MatchMode::RightHanded) => eq(2) && eq(3),
            (Some(8), MatchMode::LeftHanded) => eq(0),
            (Some(8), MatchMode::RightHanded) => eq(3),
            _ => false,
        }
    }

    /// 左手（前缀）匹配
    pub fn matches_prefix(&self, other: &Address) -> bool {
        self.matches(other, MatchMode::LeftHanded)
    }

    /// 右手（后缀）匹配
    pub fn matches_suffix(&self, other: &Address) -> bool {
        self.matches(other, MatchMode::RightHanded)
    }

    /// pod 编号（第二段）
    pub fn pod(&self) -> u8 {
        self.octets[1]
    }

    /// pod 内交换机下标（第三段）
    pub fn switch_index(&self) -> u8 {
        self.octets[2]
    }

    /// 主机偏移（第四段；主机从 2 开始编号）
    pub fn host_offset(&self) -> u8 {
        self.octets[3]
    }

    /// 是否是端口数为 k 的 fat-tree 中的主机地址
    pub fn is_host(&self, k: usize) -> bool {
        self.octets[0] == 10 && (self.octets[1] as usize) < k && self.octets[3] >= 2
    }

    /// 是否是核心交换机地址（10.k.row.col）
    pub fn is_core(&self, k: usize) -> bool {
        self.octets[0] == 10 && self.octets[1] as usize == k
    }

    /// 是否是边缘（下层 pod）交换机地址
    pub fn is_edge_switch(&self, k: usize) -> bool {
        self.octets[0] == 10
            && (self.octets[1] as usize) < k
            && self.octets[3] == 1
            && (self.octets[2] as usize) < k / 2
    }

    /// 是否是汇聚（上层 pod）交换机地址
    pub fn is_aggr_switch(&self, k: usize) -> bool {
        self.octets[0] == 10
            && (self.octets[1] as usize) < k
            && self.octets[3] == 1
            && (k / 2..k).contains(&(self.octets[2] as usize))
    }
}

impl FromStr for Address {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dotted, mask) = match s.split_once('/') {
            Some((left, right)) => {
                let mask = right.parse::<u8>().ok().filter(|m| *m <= 32).ok_or_else(|| {
                    AddrParseError::BadMask {
                        mask: right.to_string(),
                        text: s.to_string(),
                    }
                })?;
                (left, Some(mask))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = dotted.split('.').collect();
        if parts.len() != 4 {
            return Err(AddrParseError::OctetCount {
                got: parts.len(),
                text: s.to_string(),
            });
        }
        let mut octets = [0u8; 4];
        for (slot, part) in octets.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| AddrParseError::BadOctet {
                octet: part.to_string(),
                text: s.to_string(),
            })?;
        }
        Ok(Address { octets, mask })
    }
}

impl TryFrom<String> for Address {
    type Error = AddrParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        match self.mask {
            Some(m) => write!(f, "{a}.{b}.{c}.{d}/{m}"),
            None => write!(f, "{a}.{b}.{c}.{d}"),
        }
    }
}
