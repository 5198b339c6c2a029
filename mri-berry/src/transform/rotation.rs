//! 平面内 90 度倍数旋转.

use super::{TransformRng, VolumeTransform};
use ndarray::{Array4, Axis};
use rand::seq::SliceRandom;

/// 旋转平面: 4D 数组中的一对轴.
pub type Plane = (usize, usize);

/// 随机 90 度倍数旋转.
///
/// 每次 [`refresh`](VolumeTransform::refresh) 从候选集中抽取一个旋转次数
/// (允许 0, 即不旋转) 和一个旋转平面; [`apply`](VolumeTransform::apply)
/// 在该平面内旋转 `90° * k`. 两次 `refresh` 之间参数保持不变,
/// 以便同一样本内的多份体数据共享同一次抽取.
#[derive(Debug, Clone)]
pub struct SpatialRotation {
    planes: Vec<Plane>,
    turns: Vec<u8>,
    current: (u8, Plane),
}

impl SpatialRotation {
    /// 从候选平面集与候选旋转次数集构建.
    ///
    /// # Panic
    ///
    /// `planes` 或 `turns` 为空, 或某平面的两轴相同时, 程序 panic.
    /// 初始参数取各候选集的首项, 首次 `refresh` 前 `apply` 即按其旋转
    /// (单元素候选集因此无需 `refresh`, 表现为固定旋转).
    pub fn new(planes: Vec<Plane>, turns: Vec<u8>) -> Self {
        assert!(!planes.is_empty() && !turns.is_empty());
        assert!(planes.iter().all(|(a, b)| a != b));

        let current = (turns[0], planes[0]);
        Self {
            planes,
            turns,
            current,
        }
    }

    /// 当前 (旋转次数, 旋转平面) 参数.
    #[inline]
    pub fn current(&self) -> (u8, Plane) {
        self.current
    }
}

/// 在 (a, b) 平面内旋转 90 度一次: 先转置两轴, 再反转第一轴.
#[inline]
fn rot90_once(mut x: Array4<f32>, (a, b): Plane) -> Array4<f32> {
    x.swap_axes(a, b);
    x.invert_axis(Axis(a));
    x
}

impl VolumeTransform for SpatialRotation {
    fn refresh(&mut self, rng: &mut TransformRng) {
        // 构造时已断言候选集非空, 可直接 unwrap.
        self.current = (
            *self.turns.choose(rng).unwrap(),
            *self.planes.choose(rng).unwrap(),
        );
    }

    fn apply(&mut self, mut x: Array4<f32>) -> Array4<f32> {
        let (turns, plane) = self.current;
        for _ in 0..(turns % 4) {
            x = rot90_once(x, plane);
        }
        x
    }
}
