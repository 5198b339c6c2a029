//! 体数据增广变换.
//!
//! 所有变换统一在带前导通道轴的 4D 数组 (C, X, Y, Z) 上工作.
//! 随机参数的 **生成** ([`VolumeTransform::refresh`]) 与 **应用**
//! ([`VolumeTransform::apply`]) 是两个独立操作: 调用方可以生成一次参数,
//! 然后应用到同一样本内的多份体数据上, 保证输入与目标的空间对应关系不被破坏.
//!
//! [`Compose`] 将若干变换按序组合为一条管线, 并持有可注入种子的随机源.

use ndarray::Array4;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod crop;
mod flip;
mod grayscale;
mod jitter;
mod pad;
mod resize;
mod rotation;

pub use crop::CenterCrop;
pub use flip::SpatialFlip;
pub use grayscale::{Center, ToGrayScale};
pub use jitter::ColorJitter3d;
pub use pad::PadToMultiple;
pub use resize::Resize;
pub use rotation::SpatialRotation;

/// 增广参数抽取所用的随机源类型. 可注入种子以复现抽取序列.
pub type TransformRng = ChaCha8Rng;

/// 从可选种子构建随机源. `None` 时使用系统熵.
pub fn seeded_rng(seed: Option<u64>) -> TransformRng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// 体数据变换.
///
/// 无随机状态的变换只需实现 [`apply`](Self::apply);
/// 带随机参数的变换在 [`refresh`](Self::refresh) 中重新抽取参数,
/// 两次 `refresh` 之间的任意多次 `apply` 使用同一组参数.
pub trait VolumeTransform {
    /// 重新抽取内部随机参数. 无随机状态的变换默认为 no-op.
    fn refresh(&mut self, _rng: &mut TransformRng) {}

    /// 按当前参数变换一份体数据.
    fn apply(&mut self, x: Array4<f32>) -> Array4<f32>;
}

/// 有序变换管线. 持有所有变换步骤与一个随机源.
///
/// [`Compose::refresh`] 为每个步骤抽取一次新参数;
/// 随后的任意多次 [`Compose::apply`] 共享这组参数.
pub struct Compose {
    steps: Vec<Box<dyn VolumeTransform>>,
    rng: TransformRng,
}

impl Compose {
    /// 从变换步骤与可选种子构建管线.
    pub fn new(steps: Vec<Box<dyn VolumeTransform>>, seed: Option<u64>) -> Self {
        Self {
            steps,
            rng: seeded_rng(seed),
        }
    }

    /// 为所有步骤重新抽取随机参数. 每个样本取样前调用一次.
    pub fn refresh(&mut self) {
        for step in self.steps.iter_mut() {
            step.refresh(&mut self.rng);
        }
    }

    /// 将全部步骤按序应用到一份体数据上.
    pub fn apply(&mut self, mut x: Array4<f32>) -> Array4<f32> {
        for step in self.steps.iter_mut() {
            x = step.apply(x);
        }
        x
    }

    /// 步骤个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 管线是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 在管线尾部追加一个步骤.
    #[inline]
    pub fn push(&mut self, step: Box<dyn VolumeTransform>) {
        self.steps.push(step);
    }
}
