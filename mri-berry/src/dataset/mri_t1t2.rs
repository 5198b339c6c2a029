//! 旧式双模态数据集加载器: T1 输入, T2 目标.
//!
//! 与 [`Brain3dDataset`](super::Brain3dDataset) 不同, 该加载器将两份体数据
//! 堆叠成一个双通道数组后再整体通过增广管线, 几何参数因此在结构上共享,
//! 无需按样本手动刷新共享.

use crate::config::{DatasetOptions, Phase};
use crate::consts::{crop, suffix, MRI_T1T2_RESIZE};
use crate::data::MriVolume;
use crate::dataset::{suffixed_file_paths, BuildError, FetchError, Sample};
use crate::transform::{
    seeded_rng, Center, CenterCrop, Compose, Resize, SpatialFlip, SpatialRotation, ToGrayScale,
    TransformRng, VolumeTransform,
};
use ndarray::{s, stack, Axis};
use rand::Rng;
use std::path::{Path, PathBuf};

/// 旧式 T1 -> T2 双模态数据集.
///
/// 文件布局: `{dataroot}/{phase}T1/` 与 `{dataroot}/{phase}T2/` 下分别存放
/// 以 `t1.nii.gz` / `t2.nii.gz` 结尾的体数据文件.
pub struct MriT1T2Dataset {
    a_paths: Vec<PathBuf>,
    b_paths: Vec<PathBuf>,
    serial_batches: bool,
    transform: Compose,
    rng: TransformRng,
}

impl MriT1T2Dataset {
    /// 按旧式目录布局发现文件并构建数据集.
    pub fn new(opt: &DatasetOptions) -> Result<Self, BuildError> {
        let phase = opt.phase.dir_name();
        let a = suffixed_file_paths(opt.dataroot.join(format!("{phase}T1")), suffix::T1)?;
        let b = suffixed_file_paths(opt.dataroot.join(format!("{phase}T2")), suffix::T2)?;
        Self::from_paths(a, b, opt)
    }

    /// 从显式路径列表构建数据集. 列表须已按期望顺序排好.
    pub fn from_paths(
        a_paths: Vec<PathBuf>,
        b_paths: Vec<PathBuf>,
        opt: &DatasetOptions,
    ) -> Result<Self, BuildError> {
        if a_paths.is_empty() {
            return Err(BuildError::EmptyModality("t1"));
        }
        if b_paths.is_empty() {
            return Err(BuildError::EmptyModality("t2"));
        }

        Ok(Self {
            a_paths,
            b_paths,
            serial_batches: opt.serial_batches,
            transform: build_pipeline(opt),
            // 与增广参数抽取错开的独立随机流.
            rng: seeded_rng(opt.seed.map(|s| s.wrapping_add(1))),
        })
    }

    /// 样本总数: 两个模态文件数的最大值.
    #[inline]
    pub fn len(&self) -> usize {
        self.a_paths.len().max(self.b_paths.len())
    }

    /// 数据集是否为空. 构建成功的数据集恒为非空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 为索引选取 (A, B) 的实际文件下标. A 按自身文件数回绕;
    /// B 在顺序模式下同样回绕, 否则每次独立随机抽取以避免固定配对.
    fn pick_indices(&mut self, index: usize) -> (usize, usize) {
        let a = index % self.a_paths.len();
        let b = if self.serial_batches {
            index % self.b_paths.len()
        } else {
            self.rng.gen_range(0..self.b_paths.len())
        };
        (a, b)
    }

    /// 选出索引对应的两份文件路径, 不触发文件读取.
    /// 随机配对模式下该调用会消耗一次目标下标抽取.
    pub fn sample_paths(&mut self, index: usize) -> (&Path, &Path) {
        let (a, b) = self.pick_indices(index);
        (self.a_paths[a].as_path(), self.b_paths[b].as_path())
    }

    /// 取样: 读取两份体数据, 堆叠为双通道数组, 整体增广后再拆分.
    ///
    /// 两模态体素网格不一致时堆叠失败, 返回 `Err`.
    pub fn get(&mut self, index: usize) -> Result<Sample, FetchError> {
        let (ia, ib) = self.pick_indices(index);
        let a_path = self.a_paths[ia].clone();
        let b_path = self.b_paths[ib].clone();

        let a_vol = MriVolume::open(&a_path)?;
        let b_vol = MriVolume::open(&b_path)?;
        let stacked = stack(Axis(0), &[a_vol.data(), b_vol.data()])?;

        self.transform.refresh();
        let ab = self.transform.apply(stacked);
        let a = ab.slice(s![0..1, .., .., ..]).to_owned();
        let b = ab.slice(s![1..2, .., .., ..]).to_owned();

        Ok(Sample {
            a,
            b,
            a_path,
            b_path,
        })
    }
}

/// 按阶段构建旧式增广管线.
///
/// 裁剪 -> 三线性重采样 -> 灰度归一化 -> (可选) 语料级重定中心 ->
/// 训练期随机旋转与随机翻转 (评估期为固定的四分之一转).
fn build_pipeline(opt: &DatasetOptions) -> Compose {
    let mut steps: Vec<Box<dyn VolumeTransform>> = vec![
        Box::new(CenterCrop::from_windows(crop::MRI_T1T2)),
        Box::new(Resize::new(MRI_T1T2_RESIZE)),
        Box::new(ToGrayScale),
    ];

    if let Some((mean, std)) = opt.center {
        steps.push(Box::new(Center::new(mean, std)));
    }

    match opt.phase {
        Phase::Train => {
            steps.push(Box::new(SpatialRotation::new(
                vec![(1, 2), (1, 3), (2, 3)],
                vec![0, 1, 2, 3],
            )));
            steps.push(Box::new(SpatialFlip::new(vec![2, 3])));
        }
        Phase::Eval => {
            steps.push(Box::new(SpatialRotation::new(vec![(1, 2)], vec![1])));
        }
    }

    Compose::new(steps, opt.seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_paths(prefix: &str, n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| PathBuf::from(format!("{prefix}_{i}.nii.gz")))
            .collect()
    }

    fn serial_dataset(a: usize, b: usize) -> MriT1T2Dataset {
        let opt = DatasetOptions {
            serial_batches: true,
            seed: Some(0),
            ..DatasetOptions::default()
        };
        MriT1T2Dataset::from_paths(fake_paths("t1", a), fake_paths("t2", b), &opt).unwrap()
    }

    #[test]
    fn test_len_is_max_of_modalities() {
        assert_eq!(serial_dataset(4, 2).len(), 4);
        assert_eq!(serial_dataset(1, 6).len(), 6);
    }

    #[test]
    fn test_serial_batches_lock_pairing_with_wraparound() {
        let mut ds = serial_dataset(3, 2);
        assert_eq!(
            ds.sample_paths(0),
            (Path::new("t1_0.nii.gz"), Path::new("t2_0.nii.gz"))
        );
        assert_eq!(
            ds.sample_paths(5),
            (Path::new("t1_2.nii.gz"), Path::new("t2_1.nii.gz"))
        );
    }

    #[test]
    fn test_random_pairing_is_seed_reproducible() {
        let opt = DatasetOptions {
            serial_batches: false,
            seed: Some(23),
            ..DatasetOptions::default()
        };
        let make =
            || MriT1T2Dataset::from_paths(fake_paths("t1", 3), fake_paths("t2", 5), &opt).unwrap();
        let mut d1 = make();
        let mut d2 = make();
        for i in 0..12 {
            assert_eq!(d1.sample_paths(i), d2.sample_paths(i));
        }
    }

    #[test]
    fn test_empty_modality_fails_at_construction() {
        let opt = DatasetOptions::default();
        let err = MriT1T2Dataset::from_paths(Vec::new(), fake_paths("t2", 1), &opt);
        assert!(matches!(err, Err(BuildError::EmptyModality("t1"))));
    }
}
