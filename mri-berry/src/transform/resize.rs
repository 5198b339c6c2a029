//! 三线性重采样.

use super::VolumeTransform;
use ndarray::Array4;

/// 三线性重采样到固定空间尺寸.
///
/// 逐通道对三个空间轴做线性插值, 采样点按像素中心对齐
/// (输出坐标 `i` 对应源坐标 `(i + 0.5) * scale - 0.5`).
/// 输入已是目标尺寸时为 no-op. 无随机状态.
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    target: (usize, usize, usize),
}

/// 一个输出下标对应的源插值参数: (左邻居, 右邻居, 右权重).
type AxisTap = (usize, usize, f32);

/// 预计算一个轴上所有输出下标的插值参数.
fn axis_taps(src: usize, dst: usize) -> Vec<AxisTap> {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|i| {
            let center = ((i as f64 + 0.5) * scale - 0.5).clamp(0.0, (src - 1) as f64);
            let lo = center.floor() as usize;
            let hi = (lo + 1).min(src - 1);
            (lo, hi, (center - lo as f64) as f32)
        })
        .collect()
}

impl Resize {
    /// 从目标空间尺寸构建.
    ///
    /// # Panic
    ///
    /// 目标尺寸含 0 时程序 panic.
    pub fn new(target: (usize, usize, usize)) -> Self {
        assert!(target.0 > 0 && target.1 > 0 && target.2 > 0);
        Self { target }
    }

    /// 目标空间尺寸.
    #[inline]
    pub fn target(&self) -> (usize, usize, usize) {
        self.target
    }
}

impl VolumeTransform for Resize {
    fn apply(&mut self, x: Array4<f32>) -> Array4<f32> {
        let (c, sx, sy, sz) = x.dim();
        let (tx, ty, tz) = self.target;
        if (sx, sy, sz) == self.target {
            return x;
        }

        let xt = axis_taps(sx, tx);
        let yt = axis_taps(sy, ty);
        let zt = axis_taps(sz, tz);

        let mut out = Array4::zeros((c, tx, ty, tz));
        for ci in 0..c {
            for (i, &(x0, x1, fx)) in xt.iter().enumerate() {
                for (j, &(y0, y1, fy)) in yt.iter().enumerate() {
                    for (k, &(z0, z1, fz)) in zt.iter().enumerate() {
                        // 8 个角点的三线性混合.
                        let c000 = x[(ci, x0, y0, z0)];
                        let c001 = x[(ci, x0, y0, z1)];
                        let c010 = x[(ci, x0, y1, z0)];
                        let c011 = x[(ci, x0, y1, z1)];
                        let c100 = x[(ci, x1, y0, z0)];
                        let c101 = x[(ci, x1, y0, z1)];
                        let c110 = x[(ci, x1, y1, z0)];
                        let c111 = x[(ci, x1, y1, z1)];

                        let c00 = c000 + (c100 - c000) * fx;
                        let c01 = c001 + (c101 - c001) * fx;
                        let c10 = c010 + (c110 - c010) * fx;
                        let c11 = c011 + (c111 - c011) * fx;

                        let c0 = c00 + (c10 - c00) * fy;
                        let c1 = c01 + (c11 - c01) * fy;

                        out[(ci, i, j, k)] = c0 + (c1 - c0) * fz;
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_same_size_is_noop() {
        let x = Array4::from_shape_vec((1, 2, 2, 2), (0..8).map(|v| v as f32).collect()).unwrap();
        let mut r = Resize::new((2, 2, 2));
        assert_eq!(r.apply(x.clone()), x);
    }

    #[test]
    fn test_constant_volume_stays_constant() {
        let x = Array4::from_elem((2, 6, 5, 4), 3.5_f32);
        let mut r = Resize::new((3, 3, 3));
        let y = r.apply(x);
        assert_eq!(y.dim(), (2, 3, 3, 3));
        assert!(y.iter().all(|v| (v - 3.5).abs() < 1e-6));
    }

    #[test]
    fn test_halving_a_ramp_averages_neighbours() {
        // 沿 Z 的坡度 [0, 1, 2, 3], 2 倍下采样 (中心对齐) -> [0.5, 2.5].
        let x = Array4::from_shape_vec((1, 1, 1, 4), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let mut r = Resize::new((1, 1, 2));
        let y = r.apply(x);
        assert!((y[(0, 0, 0, 0)] - 0.5).abs() < 1e-6);
        assert!((y[(0, 0, 0, 1)] - 2.5).abs() < 1e-6);
    }
}
