//! 两级路由表编译器
//!
//! 为 fat-tree 的每个交换机生成有序前缀表，表尾挂一张后缀表。
//! 前缀行编码“去哪个 pod / 子网”，后缀行按主机偏移做轮转，把上行
//! 流量摊开到不同的核心链路上。表是 k 与交换机位置的纯函数，与
//! 实际发现到的端口号不一致时可以用 [`RoutingTables::sync_ports`]
//! 重新同步。
//!
//! 端口从 1 开始编号：核心交换机第 x+1 号端口指向 pod x，pod 交换机
//! 前 k/2 个端口朝下、后 k/2 个端口朝上。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::addr::Address;
use crate::topo::TopoError;

/// 后缀表行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixEntry {
    pub suffix: Address,
    pub port: u16,
}

/// 前缀表行；只有每张表的最后一行会携带后缀表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixEntry {
    pub prefix: Address,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffix_table: Vec<SuffixEntry>,
}

/// 整个 fat-tree 的转发表集合，按交换机地址索引
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTables {
    k: usize,
    tables: BTreeMap<String, Vec<PrefixEntry>>,
}

impl RoutingTables {
    /// 对给定的 k 编译全套转发表；结果是确定且幂等的
    pub fn compile(k: usize) -> Result<Self, TopoError> {
        if k < 2 || k % 2 != 0 {
            return Err(TopoError::BadPortCount { k });
        }
        let mut tables = Self {
            k,
            tables: BTreeMap::new(),
        };
        tables.compile_core();
        tables.compile_aggregation();
        tables.compile_edge();
        Ok(tables)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn switches(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn table(&self, switch: &str) -> Option<&[PrefixEntry]> {
        self.tables.get(switch).map(Vec::as_slice)
    }

    /// 查询 `src` 交换机发往 `dst` 应走的端口
    ///
    /// 顺序扫描前缀行，首个左手匹配即命中；扫到最后一行（兜底行）
    /// 仍未命中时落入其后缀表做右手匹配。两边都落空返回 `None`，
    /// 由控制器自行决定泛洪还是丢弃。
    pub fn lookup_port(&self, src: &str, dst: &Address) -> Option<u16> {
        let rows = self.tables.get(src)?;
        for (idx, row) in rows.iter().enumerate() {
            if dst.matches_prefix(&row.prefix) {
                return Some(row.port);
            }
            if idx == rows.len() - 1 {
                for entry in &row.suffix_table {
                    if dst.matches_suffix(&entry.suffix) {
                        return Some(entry.port);
                    }
                }
            }
        }
        None
    }

    /// 用发现到的链路三元组 (src, dst, port) 修正表中的端口号
    ///
    /// 目的地址能匹配上的行会被覆盖；解析不了的地址跳过该条记录。
    /// 返回实际更新的行数。
    pub fn sync_ports<'a, I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str, u16)>,
    {
        let mut updates = 0;
        for (src, dst, port) in links {
            let Ok(dst_addr) = dst.parse::<Address>() else {
                debug!(dst, "链路目的地址无法解析，跳过");
                continue;
            };
            let Some(rows) = self.tables.get_mut(src) else {
                continue;
            };
            for row in rows.iter_mut() {
                if dst_addr.matches_prefix(&row.prefix) && row.port != port {
                    row.port = port;
                    updates += 1;
                }
                for entry in row.suffix_table.iter_mut() {
                    if dst_addr.matches_suffix(&entry.suffix) && entry.port != port {
                        entry.port = port;
                        updates += 1;
                    }
                }
            }
        }
        updates
    }

    fn add_prefix(&mut self, switch: String, prefix: Address, port: u16) {
        self.tables.entry(switch).or_default().push(PrefixEntry {
            prefix,
            port,
            suffix_table: Vec::new(),
        });
    }

    fn add_suffix(&mut self, switch: &str, suffix: Address, port: u16) {
        let rows = self
            .tables
            .get_mut(switch)
            .expect("suffix rows attach to an existing prefix table");
        let last = rows
            .last_mut()
            .expect("suffix rows attach to the terminal prefix row");
        last.suffix_table.push(SuffixEntry { suffix, port });
    }

    /// 核心交换机：每个 pod 一行，`10.x.0.0/16 -> x+1`
    fn compile_core(&mut self) {
        let k = self.k;
        let half = k / 2;
        for row in 1..=half {
            for col in 1..=half {
                let switch = format!("10.{k}.{row}.{col}");
                for pod in 0..k {
                    self.add_prefix(
                        switch.clone(),
                        Address::new([10, pod as u8, 0, 0], Some(16)),
                        (pod + 1) as u16,
                    );
                }
            }
        }
    }

    /// 汇聚交换机：本 pod 各子网的 /24 下行行 + 兜底行 + 上行后缀表
    fn compile_aggregation(&mut self) {
        let k = self.k;
        let half = k / 2;
        for pod in 0..k {
            for z in half..k {
                let switch = format!("10.{pod}.{z}.1");
                for subnet in 0..half {
                    self.add_prefix(
                        switch.clone(),
                        Address::new([10, pod as u8, subnet as u8, 0], Some(24)),
                        (subnet + 1) as u16,
                    );
                }
                self.add_prefix(switch.clone(), Address::new([0, 0, 0, 0], Some(0)), 0);
                for host in 2..half + 2 {
                    self.add_suffix(
                        &switch,
                        Address::new([0, 0, 0, host as u8], Some(8)),
                        rotated_uplink(host, z, half),
                    );
                }
            }
        }
    }

    /// 边缘交换机：只有兜底行和上行后缀表
    fn compile_edge(&mut self) {
        let k = self.k;
        let half = k / 2;
        for pod in 0..k {
            for z in 0..half {
                let switch = format!("10.{pod}.{z}.1");
                self.add_prefix(switch.clone(), Address::new([0, 0, 0, 0], Some(0)), 0);
                for host in 0..half + 2 {
                    self.add_suffix(
                        &switch,
                        Address::new([0, 0, 0, host as u8], Some(8)),
                        rotated_uplink(host, z, half),
                    );
                }
            }
        }
    }
}

/// 按交换机位置轮转的上行端口：`1 + ((h - 2 + z) mod (k/2) + k/2)`
///
/// 同一个主机偏移在相邻交换机上选到不同的上行口，流量在核心链路
/// 之间摊开。
fn rotated_uplink(host: usize, z: usize, half: usize) -> u16 {
    let rotated = (host as isize - 2 + z as isize).rem_euclid(half as isize) as usize;
    (1 + rotated + half) as u16
}
