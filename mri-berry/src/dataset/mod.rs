//! 数据集操作.
//!
//! 提供按后缀的文件发现与自然排序, 以及两种配对数据集:
//! [`Brain3dDataset`](brain_3d::Brain3dDataset) (T1 + FLAIR -> DIR) 与
//! [`MriT1T2Dataset`](mri_t1t2::MriT1T2Dataset) (旧式 T1 -> T2).

use itertools::Itertools;
use ndarray::Array4;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

pub mod brain_3d;
pub mod mri_t1t2;

pub use brain_3d::Brain3dDataset;
pub use mri_t1t2::MriT1T2Dataset;

/// 构建数据集错误.
#[derive(Debug)]
pub enum BuildError {
    /// 某一模态目录下没有匹配到任何文件. 参数为模态名.
    EmptyModality(&'static str),

    /// 枚举文件时的底层 I/O 错误 (如目录缺失).
    Io(std::io::Error),
}

impl From<std::io::Error> for BuildError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// 取样错误. 全部原样上抛, 本库不重试; 跳样/终止策略由外部训练框架决定.
#[derive(Debug)]
pub enum FetchError {
    /// 打开体数据文件错误.
    Open(crate::OpenVolumeError),

    /// 模态间体素网格不一致, 堆叠/拼接失败.
    Shape(ndarray::ShapeError),
}

impl From<crate::OpenVolumeError> for FetchError {
    fn from(value: crate::OpenVolumeError) -> Self {
        Self::Open(value)
    }
}

impl From<ndarray::ShapeError> for FetchError {
    fn from(value: ndarray::ShapeError) -> Self {
        Self::Shape(value)
    }
}

/// 一次取样的结果: 输入张量, 目标张量, 及其来源文件路径
/// (路径供调用方日志/调试使用).
#[derive(Debug, Clone)]
pub struct Sample {
    /// 输入张量, 形状 (C, X, Y, Z). 多模态输入时按通道拼接.
    pub a: Array4<f32>,

    /// 目标张量, 形状 (1, X, Y, Z).
    pub b: Array4<f32>,

    /// 输入 (主模态) 文件路径.
    pub a_path: PathBuf,

    /// 目标文件路径.
    pub b_path: PathBuf,
}

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 递归枚举 `dir` 下所有文件名以 `suffix` 结尾的文件, 按自然序返回.
///
/// 目录不可读时返回底层 I/O 错误; 无匹配文件时返回空列表
/// (是否视为错误由数据集构造方决定).
pub fn suffixed_file_paths<P: AsRef<Path>>(dir: P, suffix: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut stack = vec![dir.as_ref().to_owned()];
    let mut ans = Vec::new();

    while let Some(d) = stack.pop() {
        for entry in std::fs::read_dir(&d)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix))
            {
                ans.push(path);
            }
        }
    }

    Ok(ans
        .into_iter()
        .sorted_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()))
        .collect())
}

/// 自然序字符串比较: 数字段按数值比较, 其余按字典序.
/// 例如 `case2 < case10`, 而纯字典序会给出相反结果.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ta = natural_tokens(a);
    let tb = natural_tokens(b);
    for (x, y) in ta.iter().zip(tb.iter()) {
        let ord = match (x, y) {
            (Tok::Num(m), Tok::Num(n)) => cmp_digit_runs(m, n),
            (Tok::Num(_), Tok::Text(_)) => Ordering::Less,
            (Tok::Text(_), Tok::Num(_)) => Ordering::Greater,
            (Tok::Text(m), Tok::Text(n)) => m.cmp(n),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ta.len().cmp(&tb.len())
}

/// 自然序比较的词法单元: 连续数字段或连续非数字段.
#[derive(Debug, PartialEq, Eq)]
enum Tok<'a> {
    Num(&'a str),
    Text(&'a str),
}

/// 按 ascii 数字/非数字切分字符串.
/// 切分点总与 ascii 数字相邻, 必然落在字符边界上.
fn natural_tokens(s: &str) -> Vec<Tok<'_>> {
    let bytes = s.as_bytes();
    let mut ans = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        let digit = bytes[start].is_ascii_digit();
        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() == digit {
            end += 1;
        }
        let piece = &s[start..end];
        ans.push(if digit { Tok::Num(piece) } else { Tok::Text(piece) });
        start = end;
    }
    ans
}

/// 比较两个纯数字串的数值大小. 不解析为整数, 以免超长数字段溢出.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<'a>(mut v: Vec<&'a str>) -> Vec<&'a str> {
        v.sort_by(|a, b| natural_cmp(a, b));
        v
    }

    #[test]
    fn test_natural_cmp_orders_digit_runs_numerically() {
        assert_eq!(
            sorted(vec!["case10_t1.nii.gz", "case2_t1.nii.gz", "case1_t1.nii.gz"]),
            vec!["case1_t1.nii.gz", "case2_t1.nii.gz", "case10_t1.nii.gz"],
        );
    }

    #[test]
    fn test_natural_cmp_ignores_leading_zeros() {
        assert_eq!(natural_cmp("v007", "v7"), Ordering::Equal);
        assert_eq!(natural_cmp("v007", "v08"), Ordering::Less);
    }

    #[test]
    fn test_natural_cmp_mixed_segments() {
        assert_eq!(sorted(vec!["b1", "a2", "a10", "a"]), vec!["a", "a2", "a10", "b1"]);
        assert_eq!(natural_cmp("1a", "aa"), Ordering::Less);
    }

    #[test]
    fn test_huge_digit_runs_do_not_overflow() {
        let small = "x99999999999999999999";
        let big = "x100000000000000000000";
        assert_eq!(natural_cmp(small, big), Ordering::Less);
    }
}
