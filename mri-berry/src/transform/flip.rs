//! 轴子集随机翻转.

use super::{TransformRng, VolumeTransform};
use ndarray::{Array4, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

/// 随机轴子集翻转.
///
/// 每次 [`refresh`](VolumeTransform::refresh) 先在 `0..N` (N 为候选轴个数,
/// 上界不含) 中均匀抽取子集大小, 再从候选轴中无放回地抽取该数量的轴;
/// [`apply`](VolumeTransform::apply) 沿这些轴反转数据.
///
/// 空子集是合法抽取结果, 表现为 no-op; 由于上界不含 N,
/// 全候选集不会被抽中. 两次 `refresh` 之间参数保持不变.
#[derive(Debug, Clone)]
pub struct SpatialFlip {
    axes: Vec<usize>,
    current: Vec<usize>,
}

impl SpatialFlip {
    /// 从候选轴集构建. 初始参数为空子集 (no-op).
    ///
    /// # Panic
    ///
    /// `axes` 为空时程序 panic.
    pub fn new(axes: Vec<usize>) -> Self {
        assert!(!axes.is_empty());
        Self {
            axes,
            current: Vec::new(),
        }
    }

    /// 当前被选中翻转的轴.
    #[inline]
    pub fn current(&self) -> &[usize] {
        &self.current
    }
}

impl VolumeTransform for SpatialFlip {
    fn refresh(&mut self, rng: &mut TransformRng) {
        let amount = rng.gen_range(0..self.axes.len());
        self.current = self
            .axes
            .choose_multiple(rng, amount)
            .copied()
            .collect();
    }

    fn apply(&mut self, mut x: Array4<f32>) -> Array4<f32> {
        for &axis in &self.current {
            x.invert_axis(Axis(axis));
        }
        x
    }
}
