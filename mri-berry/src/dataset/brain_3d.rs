//! 脑部三模态训练集数据加载器: T1 + FLAIR 输入, DIR 目标.
//!
//! 提供索引风格的数据集取样模式, 索引超出任一模态文件数时按该模态自身计数回绕.

use crate::config::{DatasetOptions, Phase};
use crate::consts::{crop, suffix};
use crate::data::MriVolume;
use crate::dataset::{suffixed_file_paths, BuildError, FetchError, Sample};
use crate::transform::{
    seeded_rng, CenterCrop, Compose, PadToMultiple, SpatialFlip, SpatialRotation, ToGrayScale,
    TransformRng, VolumeTransform,
};
use ndarray::{concatenate, Axis};
use rand::Rng;
use std::path::{Path, PathBuf};

/// 脑部三模态数据集.
///
/// 文件布局: `{dataroot}/{t1, flair, dir}/{phase}/` 下分别存放以
/// `t1.nii.gz` / `flair.nii.gz` / `dir.nii.gz` 结尾的体数据文件.
///
/// 每次取样从磁盘读取三份体数据, 增广管线在一次参数抽取下
/// 分别应用到三者 (保持空间对应关系), 两份输入按通道拼接为 A.
pub struct Brain3dDataset {
    t1_paths: Vec<PathBuf>,
    flair_paths: Vec<PathBuf>,
    dir_paths: Vec<PathBuf>,
    paired: bool,
    transform: Compose,
    rng: TransformRng,
}

impl Brain3dDataset {
    /// 按标准目录布局发现文件并构建数据集.
    ///
    /// 任一模态目录不可读或没有匹配文件时返回 `Err`
    /// (空模态在构建期失败, 而不是在取样期因取模 0 而 panic).
    pub fn new(opt: &DatasetOptions) -> Result<Self, BuildError> {
        let phase = opt.phase.dir_name();
        let t1 = suffixed_file_paths(opt.dataroot.join("t1").join(phase), suffix::T1)?;
        let flair = suffixed_file_paths(opt.dataroot.join("flair").join(phase), suffix::FLAIR)?;
        let dir = suffixed_file_paths(opt.dataroot.join("dir").join(phase), suffix::DIR)?;
        Self::from_paths(t1, flair, dir, opt)
    }

    /// 从显式路径列表构建数据集. 列表须已按期望顺序排好;
    /// 用于非标准目录布局或测试.
    pub fn from_paths(
        t1_paths: Vec<PathBuf>,
        flair_paths: Vec<PathBuf>,
        dir_paths: Vec<PathBuf>,
        opt: &DatasetOptions,
    ) -> Result<Self, BuildError> {
        if t1_paths.is_empty() {
            return Err(BuildError::EmptyModality("t1"));
        }
        if flair_paths.is_empty() {
            return Err(BuildError::EmptyModality("flair"));
        }
        if dir_paths.is_empty() {
            return Err(BuildError::EmptyModality("dir"));
        }

        Ok(Self {
            t1_paths,
            flair_paths,
            dir_paths,
            paired: opt.paired,
            transform: build_pipeline(opt),
            // 与增广参数抽取错开的独立随机流.
            rng: seeded_rng(opt.seed.map(|s| s.wrapping_add(1))),
        })
    }

    /// 样本总数: 各模态文件数的最大值.
    /// 索引超出某一模态的文件数时按该模态计数回绕, 静默重复体数据.
    #[inline]
    pub fn len(&self) -> usize {
        self.t1_paths
            .len()
            .max(self.flair_paths.len())
            .max(self.dir_paths.len())
    }

    /// 数据集是否为空. 构建成功的数据集恒为非空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 为索引选取 (T1, FLAIR, DIR) 的实际文件下标.
    ///
    /// 输入模态按各自文件数回绕; 目标模态在配对模式下同样回绕,
    /// 非配对模式下每次独立随机抽取 (跨 epoch 配对即不确定).
    fn pick_indices(&mut self, index: usize) -> (usize, usize, usize) {
        let t1 = index % self.t1_paths.len();
        let flair = index % self.flair_paths.len();
        let dir = if self.paired {
            index % self.dir_paths.len()
        } else {
            self.rng.gen_range(0..self.dir_paths.len())
        };
        (t1, flair, dir)
    }

    /// 选出索引对应的三份文件路径, 不触发文件读取.
    /// 非配对模式下该调用会消耗一次目标下标抽取.
    pub fn sample_paths(&mut self, index: usize) -> (&Path, &Path, &Path) {
        let (t1, flair, dir) = self.pick_indices(index);
        (
            self.t1_paths[t1].as_path(),
            self.flair_paths[flair].as_path(),
            self.dir_paths[dir].as_path(),
        )
    }

    /// 取样: 读取三份体数据, 共享一次增广参数抽取, 返回样本.
    ///
    /// 文件缺失/损坏或模态体素网格不一致时返回 `Err`, 不重试.
    pub fn get(&mut self, index: usize) -> Result<Sample, FetchError> {
        let (i_t1, i_flair, i_dir) = self.pick_indices(index);
        let a_path = self.t1_paths[i_t1].clone();
        let flair_path = self.flair_paths[i_flair].clone();
        let b_path = self.dir_paths[i_dir].clone();

        let (t1, flair) = load_input_pair(&a_path, &flair_path)?;
        let target = MriVolume::open(&b_path)?;

        self.transform.refresh();
        let a1 = self.transform.apply(t1.into_channels());
        let a2 = self.transform.apply(flair.into_channels());
        let b = self.transform.apply(target.into_channels());
        let a = concatenate(Axis(0), &[a1.view(), a2.view()])?;

        Ok(Sample {
            a,
            b,
            a_path,
            b_path,
        })
    }
}

/// 按阶段构建增广管线.
///
/// 训练期: 裁剪 -> 灰度归一化 -> 补零对齐 -> 随机旋转 -> 随机翻转;
/// 评估期以固定的四分之一转代替随机几何增广.
fn build_pipeline(opt: &DatasetOptions) -> Compose {
    let mut steps: Vec<Box<dyn VolumeTransform>> = vec![
        Box::new(CenterCrop::from_windows(crop::BRAIN_3D)),
        Box::new(ToGrayScale),
        Box::new(PadToMultiple::new(opt.n_downsampling)),
    ];

    match opt.phase {
        Phase::Train => {
            steps.push(Box::new(SpatialRotation::new(
                vec![(1, 2), (1, 3), (2, 3)],
                vec![0, 1, 2, 3],
            )));
            steps.push(Box::new(SpatialFlip::new(vec![1, 2, 3])));
        }
        Phase::Eval => {
            steps.push(Box::new(SpatialRotation::new(vec![(1, 2)], vec![1])));
        }
    }

    Compose::new(steps, opt.seed)
}

#[cfg(feature = "rayon")]
fn load_input_pair(
    t1: &Path,
    flair: &Path,
) -> Result<(MriVolume, MriVolume), crate::OpenVolumeError> {
    let (a, b) = rayon::join(|| MriVolume::open(t1), || MriVolume::open(flair));
    Ok((a?, b?))
}

#[cfg(not(feature = "rayon"))]
fn load_input_pair(
    t1: &Path,
    flair: &Path,
) -> Result<(MriVolume, MriVolume), crate::OpenVolumeError> {
    Ok((MriVolume::open(t1)?, MriVolume::open(flair)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_paths(prefix: &str, n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| PathBuf::from(format!("{prefix}_{i}.nii.gz")))
            .collect()
    }

    fn paired_dataset(t1: usize, flair: usize, dir: usize) -> Brain3dDataset {
        let opt = DatasetOptions {
            paired: true,
            seed: Some(0),
            ..DatasetOptions::default()
        };
        Brain3dDataset::from_paths(
            fake_paths("t1", t1),
            fake_paths("flair", flair),
            fake_paths("dir", dir),
            &opt,
        )
        .unwrap()
    }

    #[test]
    fn test_len_is_max_of_modalities() {
        assert_eq!(paired_dataset(3, 3, 2).len(), 3);
        assert_eq!(paired_dataset(2, 2, 5).len(), 5);
    }

    #[test]
    fn test_paired_scenario_wraps_each_modality() {
        // 3 份 T1/FLAIR, 2 份 DIR, 配对模式:
        // 索引 2 -> DIR 文件 (2 mod 2) = 0; 索引 4 -> T1/FLAIR (4 mod 3) = 1, DIR 0.
        let mut ds = paired_dataset(3, 3, 2);

        let (t1, flair, dir) = ds.sample_paths(2);
        assert_eq!(t1, Path::new("t1_2.nii.gz"));
        assert_eq!(flair, Path::new("flair_2.nii.gz"));
        assert_eq!(dir, Path::new("dir_0.nii.gz"));

        let (t1, flair, dir) = ds.sample_paths(4);
        assert_eq!(t1, Path::new("t1_1.nii.gz"));
        assert_eq!(flair, Path::new("flair_1.nii.gz"));
        assert_eq!(dir, Path::new("dir_0.nii.gz"));
    }

    #[test]
    fn test_index_zero_and_wraparound() {
        let mut ds = paired_dataset(3, 3, 2);
        let (t1, _, dir) = ds.sample_paths(0);
        assert_eq!(t1, Path::new("t1_0.nii.gz"));
        assert_eq!(dir, Path::new("dir_0.nii.gz"));

        // i >= n: 3 mod 3 = 0.
        let (t1, _, _) = ds.sample_paths(3);
        assert_eq!(t1, Path::new("t1_0.nii.gz"));
    }

    #[test]
    fn test_unpaired_target_is_seed_reproducible() {
        let opt = DatasetOptions {
            paired: false,
            seed: Some(17),
            ..DatasetOptions::default()
        };
        let make = || {
            Brain3dDataset::from_paths(
                fake_paths("t1", 4),
                fake_paths("flair", 4),
                fake_paths("dir", 7),
                &opt,
            )
            .unwrap()
        };
        let mut d1 = make();
        let mut d2 = make();
        for i in 0..16 {
            assert_eq!(d1.sample_paths(i), d2.sample_paths(i));
        }
    }

    #[test]
    fn test_empty_modality_fails_at_construction() {
        let opt = DatasetOptions::default();
        let err = Brain3dDataset::from_paths(
            fake_paths("t1", 2),
            fake_paths("flair", 2),
            Vec::new(),
            &opt,
        );
        assert!(matches!(err, Err(BuildError::EmptyModality("dir"))));
    }
}
