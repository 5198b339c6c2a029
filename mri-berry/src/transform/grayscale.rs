//! 灰度归一化与语料级重定中心.

use super::VolumeTransform;
use crate::consts::gray::GRAY_MAX;
use ndarray::Array4;

/// 逐体数据 min-max 灰度归一化.
///
/// `x -> (x - min) / max * 255`, 其中 min/max 为该体数据自身的极值
/// (除数为原始最大值). 归一化是逐体数据的, 不保留样本间的绝对强度尺度.
///
/// 输入须非常量且最大值为正 (MRI 原始强度非负), 否则结果含 inf/NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToGrayScale;

impl VolumeTransform for ToGrayScale {
    fn apply(&mut self, mut x: Array4<f32>) -> Array4<f32> {
        let min = x.fold(f32::INFINITY, |m, &v| m.min(v));
        let max = x.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        x.mapv_inplace(|v| (v - min) / max * GRAY_MAX);
        x
    }
}

/// 语料级重定中心 (旧式数据集): `x -> (x - mean) / std`.
///
/// `mean`/`std` 是外部统计好的语料级参数, 与逐体数据归一化不同.
#[derive(Debug, Clone, Copy)]
pub struct Center {
    mean: f32,
    std: f32,
}

impl Center {
    /// 从语料均值与标准差构建.
    ///
    /// # Panic
    ///
    /// `std` 不为正时程序 panic.
    pub fn new(mean: f32, std: f32) -> Self {
        assert!(std > 0.0);
        Self { mean, std }
    }
}

impl VolumeTransform for Center {
    fn apply(&mut self, mut x: Array4<f32>) -> Array4<f32> {
        let (mean, std) = (self.mean, self.std);
        x.mapv_inplace(|v| (v - mean) / std);
        x
    }
}
