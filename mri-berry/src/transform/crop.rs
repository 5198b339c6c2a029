//! 固定窗口裁剪.

use super::VolumeTransform;
use ndarray::{s, Array4};
use std::ops::Range;

/// 固定空间窗口裁剪.
///
/// 按手工调定的 (X, Y, Z) 半开区间选出包含目标解剖结构的子体数据,
/// 丢弃边缘区域. 前导通道轴保留. 无随机状态.
#[derive(Debug, Clone)]
pub struct CenterCrop {
    x: Range<usize>,
    y: Range<usize>,
    z: Range<usize>,
}

impl CenterCrop {
    /// 从三个空间轴的半开区间构建.
    ///
    /// # Panic
    ///
    /// 区间为空时程序 panic.
    pub fn new(x: Range<usize>, y: Range<usize>, z: Range<usize>) -> Self {
        assert!(x.start < x.end && y.start < y.end && z.start < z.end);
        Self { x, y, z }
    }

    /// 从 [`crate::consts::crop`] 形式的窗口表构建.
    pub fn from_windows([x, y, z]: [(usize, usize); 3]) -> Self {
        Self::new(x.0..x.1, y.0..y.1, z.0..z.1)
    }

    /// 裁剪后的空间形状.
    #[inline]
    pub fn output_shape(&self) -> (usize, usize, usize) {
        (self.x.len(), self.y.len(), self.z.len())
    }
}

impl VolumeTransform for CenterCrop {
    fn apply(&mut self, arr: Array4<f32>) -> Array4<f32> {
        let (_, sx, sy, sz) = arr.dim();
        // 窗口是按固定配准网格手工调定的, 不匹配的输入属于使用错误.
        assert!(
            self.x.end <= sx && self.y.end <= sy && self.z.end <= sz,
            "crop window ({:?}, {:?}, {:?}) exceeds input shape {:?}",
            self.x,
            self.y,
            self.z,
            arr.dim(),
        );

        arr.slice(s![.., self.x.clone(), self.y.clone(), self.z.clone()])
            .to_owned()
    }
}
