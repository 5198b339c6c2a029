//! 数据集构建配置.

use crate::consts::DEFAULT_N_DOWNSAMPLING;
use std::path::PathBuf;

/// 运行阶段. 决定数据子目录与增广管线 (训练期启用随机几何增广).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// 训练阶段.
    Train,
    /// 评估/测试阶段.
    Eval,
}

impl Phase {
    /// 阶段对应的数据子目录名.
    #[inline]
    pub fn dir_name(self) -> &'static str {
        match self {
            Phase::Train => "train",
            Phase::Eval => "test",
        }
    }
}

/// 数据集构建选项.
///
/// 由外部训练框架的配置对象映射而来. 字段均为公开, 可直接构造,
/// 也可从 [`DatasetOptions::default`] 出发修改.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatasetOptions {
    /// 数据根目录.
    pub dataroot: PathBuf,

    /// 运行阶段.
    pub phase: Phase,

    /// 是否按索引锁定输入与目标的配对.
    /// 关闭时, 每次取样为目标模态独立抽取一个随机下标.
    pub paired: bool,

    /// 旧式双模态数据集: 是否按索引顺序 (而非随机) 选取 B.
    pub serial_batches: bool,

    /// 旧式数据集的语料级重定中心参数 `(mean, std)`. `None` 时跳过该步骤.
    pub center: Option<(f32, f32)>,

    /// 网络下采样深度. padding 对齐模数为 `2^n_downsampling`.
    pub n_downsampling: u32,

    /// 随机源种子, 同时作用于增广参数抽取与非配对目标下标抽取.
    /// `None` 时使用系统熵, 每次运行不可复现.
    pub seed: Option<u64>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            dataroot: PathBuf::new(),
            phase: Phase::Train,
            paired: false,
            serial_batches: false,
            center: None,
            n_downsampling: DEFAULT_N_DOWNSAMPLING,
            seed: None,
        }
    }
}
