//! 亮度/对比度抖动.

use super::{seeded_rng, TransformRng, VolumeTransform};
use ndarray::Array4;
use rand::Rng;

/// 随机亮度/对比度抖动.
///
/// 两个分量相互独立, 均可选: 配置了亮度区间时, 每次应用均匀抽取一个亮度因子
/// 进行缩放; 配置了对比度区间时, 抽取一个对比度因子, 将每个体素向全体均值插值.
/// 两者结果都截断到归一化区间 [0, 1], 因子 1.0 为 no-op.
///
/// 与几何变换不同, 抖动因子在 **每次** [`apply`](VolumeTransform::apply)
/// 时重抽 (内部持有独立随机源), 不参与样本内的参数共享:
/// 该变换通常按体数据独立施加, 不要求输入与目标强度对应.
pub struct ColorJitter3d {
    brightness: Option<(f32, f32)>,
    contrast: Option<(f32, f32)>,
    rng: TransformRng,
}

impl ColorJitter3d {
    /// 从亮度区间、对比度区间与可选种子构建.
    ///
    /// # Panic
    ///
    /// 区间上下界为负数或上下界颠倒时, 程序 panic.
    pub fn new(
        brightness: Option<(f32, f32)>,
        contrast: Option<(f32, f32)>,
        seed: Option<u64>,
    ) -> Self {
        for (lo, hi) in brightness.iter().chain(contrast.iter()) {
            assert!(0.0 <= *lo && lo <= hi);
        }
        Self {
            brightness,
            contrast,
            rng: seeded_rng(seed),
        }
    }
}

impl VolumeTransform for ColorJitter3d {
    fn apply(&mut self, mut x: Array4<f32>) -> Array4<f32> {
        if let Some((lo, hi)) = self.brightness {
            let factor = self.rng.gen_range(lo..=hi);
            x.mapv_inplace(|v| (factor * v).clamp(0.0, 1.0));
        }
        if let Some((lo, hi)) = self.contrast {
            let factor = self.rng.gen_range(lo..=hi);
            let mean = x.mean().unwrap_or(0.0);
            x.mapv_inplace(|v| (factor * v + (1.0 - factor) * mean).clamp(0.0, 1.0));
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    fn unit_ramp() -> Array4<f32> {
        Array4::from_shape_vec((1, 2, 2, 2), (0..8).map(|v| v as f32 / 7.0).collect()).unwrap()
    }

    #[test]
    fn test_unit_factors_are_noop() {
        // 退化区间 [1, 1] 恒抽取因子 1.0.
        let mut j = ColorJitter3d::new(Some((1.0, 1.0)), Some((1.0, 1.0)), Some(0));
        let x = unit_ramp();
        let y = j.apply(x.clone());
        for (a, b) in x.iter().zip(y.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_brightness_clamps_to_unit_range() {
        let mut j = ColorJitter3d::new(Some((3.0, 3.0)), None, Some(1));
        let y = j.apply(unit_ramp());
        assert!(y.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(y[(0, 1, 1, 1)], 1.0);
    }

    #[test]
    fn test_zero_contrast_collapses_to_mean() {
        // 因子 0: 所有体素都变为均值.
        let mut j = ColorJitter3d::new(None, Some((0.0, 0.0)), Some(2));
        let x = unit_ramp();
        let mean = x.mean().unwrap();
        let y = j.apply(x);
        assert!(y.iter().all(|v| (v - mean).abs() < 1e-6));
    }

    #[test]
    fn test_factors_redraw_on_every_apply() {
        let mut j = ColorJitter3d::new(Some((0.5, 1.5)), None, Some(3));
        let x = unit_ramp();
        let first = j.apply(x.clone());
        let mut differed = false;
        for _ in 0..16 {
            if j.apply(x.clone()) != first {
                differed = true;
                break;
            }
        }
        assert!(differed);
    }
}
