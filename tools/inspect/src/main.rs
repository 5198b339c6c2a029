//! 数据集检查工具.
//!
//! 按标准目录布局构建脑部三模态数据集, 打印文件规模与首个样本的形状,
//! 用于在训练前确认数据组织是否正确.
//!
//! 数据根目录解析顺序:
//!
//! 1. 若环境变量 `$MRI_DATAROOT` 非空, 则使用其值;
//! 2. 否则, 使用 `$HOME/dataset/mri`.

use mri_berry::prelude::*;
use std::env;
use std::path::PathBuf;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
fn sep() {
    println!("{SEP}");
}

/// 获取数据根目录.
fn dataroot_from_env_or_home() -> PathBuf {
    if let Ok(d) = env::var("MRI_DATAROOT") {
        PathBuf::from(d)
    } else {
        home_dataset_dir_with(["mri"]).unwrap()
    }
}

fn main() {
    let opt = DatasetOptions {
        dataroot: dataroot_from_env_or_home(),
        phase: Phase::Eval,
        paired: true,
        seed: Some(0),
        ..DatasetOptions::default()
    };

    sep();
    println!("dataroot: {}", opt.dataroot.display());

    let mut dataset = Brain3dDataset::new(&opt).unwrap();
    println!("samples: {}", dataset.len());
    sep();

    let sample = dataset.get(0).unwrap();
    println!("A: {:?}  <- {}", sample.a.dim(), sample.a_path.display());
    println!("B: {:?}  <- {}", sample.b.dim(), sample.b_path.display());
    sep();
}
