#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 为配对 3D 脑部 MRI 翻译任务 (如 T1 + FLAIR -> DIR)
//! 提供 nii 数据集加载与空间/灰度增广功能, 供外部图像翻译训练框架取样.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 数据按模态分目录组织 (如 `{dataroot}/t1/train/*t1.nii.gz`).
//!   只要新数据按该模式组织, 即可直接工作.
//! 2. 在非期望情况下 (如裁剪窗口越界), 程序会直接 panic, 而不会导致内存错误.
//!   As what Rust promises. I/O 与形状错误通过 `Result` 原样上抛, 本库不重试.
//! 3. 每次取样都会重新从磁盘读取体数据, 本库不做缓存.
//!   批处理与预取由外部训练框架负责.
//!
//! # 开发计划
//!
//! ### 几何增广原语 ✅
//!
//! 90 度倍数旋转, 轴子集翻转, 尾部补零对齐.
//! 随机参数生成 (`refresh`) 与应用 (`apply`) 分离,
//! 同一样本内的多份体数据共享同一次抽取, 保持空间对应关系.
//!
//! 实现位于 `mri-berry/src/transform`.
//!
//! ### 灰度增广与归一化 ✅
//!
//! 亮度/对比度抖动, 逐体数据 min-max 灰度归一化, 语料级重定中心.
//!
//! 实现位于 `mri-berry/src/transform/{jitter, grayscale}.rs`.
//!
//! ### 三线性重采样 ✅
//!
//! 旧式双模态数据集在裁剪后重采样到固定空间尺寸.
//!
//! 实现位于 `mri-berry/src/transform/resize.rs`.
//!
//! ### 数据集对象 ✅
//!
//! 1. 脑部三模态数据集 (T1 + FLAIR 输入, DIR 目标). ✅
//! 2. 旧式 T1/T2 双模态数据集. ✅
//! 3. 文件发现与自然排序, 索引回绕, 配对/非配对取样策略. ✅
//!
//! 实现位于 `mri-berry/src/dataset`.
//!
//! ### 完善代码文档 ✅
//!
//! 给每个 public API 提供文档, 并视情况给 private
//! API 提供文档.

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 四维 (含通道) 索引.
pub type Idx4d = (usize, usize, usize, usize);

/// 3D MRI nii 文件基础数据结构.
mod data;

pub use data::{MriVolume, OpenVolumeError, VolumeMeta};

pub mod config;
pub mod consts;
pub mod dataset;
pub mod prelude;
pub mod transform;
