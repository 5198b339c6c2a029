//! 尾部补零对齐.

use super::VolumeTransform;
use ndarray::{s, Array4};

/// 将每个空间轴尾部补零到模数的整数倍.
///
/// 模数为 `2^n_downsampling`, 与下游网络的下采样深度对应.
/// 已对齐的轴补零量为 0; 前导通道轴不参与补零. 无随机状态.
#[derive(Debug, Clone, Copy)]
pub struct PadToMultiple {
    modulus: usize,
}

impl PadToMultiple {
    /// 从网络下采样深度构建. 模数为 `2^n_downsampling`.
    pub fn new(n_downsampling: u32) -> Self {
        Self {
            modulus: 1usize << n_downsampling,
        }
    }

    /// 对齐模数.
    #[inline]
    pub fn modulus(&self) -> usize {
        self.modulus
    }

    /// 长度为 `len` 的轴需要的尾部补零量.
    #[inline]
    fn margin(&self, len: usize) -> usize {
        (self.modulus - len % self.modulus) % self.modulus
    }
}

impl VolumeTransform for PadToMultiple {
    fn apply(&mut self, x: Array4<f32>) -> Array4<f32> {
        let (c, sx, sy, sz) = x.dim();
        let (mx, my, mz) = (self.margin(sx), self.margin(sy), self.margin(sz));
        if mx == 0 && my == 0 && mz == 0 {
            return x;
        }

        let mut out = Array4::zeros((c, sx + mx, sy + my, sz + mz));
        out.slice_mut(s![.., ..sx, ..sy, ..sz]).assign(&x);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_padded_lengths_are_multiples() {
        let mut p = PadToMultiple::new(3);
        for shape in [(1, 5, 9, 17), (2, 1, 8, 30), (1, 31, 2, 3)] {
            let y = p.apply(Array4::ones(shape));
            let (c, x1, x2, x3) = y.dim();
            assert_eq!(c, shape.0);
            for (orig, padded) in [(shape.1, x1), (shape.2, x2), (shape.3, x3)] {
                assert_eq!(padded % 8, 0);
                assert!(padded - orig < 8);
            }
        }
    }

    #[test]
    fn test_aligned_axes_untouched() {
        let mut p = PadToMultiple::new(2);
        let x = Array4::<f32>::ones((3, 4, 8, 12));
        let y = p.apply(x.clone());
        assert_eq!(y, x);
    }

    #[test]
    fn test_margin_is_zero_filled() {
        let mut p = PadToMultiple::new(1);
        let y = p.apply(Array4::ones((1, 3, 2, 2)));
        assert_eq!(y.dim(), (1, 4, 2, 2));
        assert_eq!(y[(0, 2, 0, 0)], 1.0);
        assert_eq!(y[(0, 3, 0, 0)], 0.0);
        assert_eq!(y[(0, 3, 1, 1)], 0.0);
    }
}
