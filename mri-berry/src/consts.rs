//! 通用常量.

/// 单通道灰度.
pub mod gray {
    /// 归一化后的灰度下界.
    pub const GRAY_MIN: f32 = 0.0;

    /// 归一化后的灰度上界. 255, not 256.
    pub const GRAY_MAX: f32 = 255.0;
}

/// 各模态 nii 文件名后缀. 文件发现按后缀匹配.
pub mod suffix {
    /// T1 加权像文件后缀.
    pub const T1: &str = "t1.nii.gz";

    /// FLAIR 像文件后缀.
    pub const FLAIR: &str = "flair.nii.gz";

    /// DIR 像文件后缀.
    pub const DIR: &str = "dir.nii.gz";

    /// 旧式数据集 T2 加权像文件后缀.
    pub const T2: &str = "t2.nii.gz";
}

/// 数据集默认裁剪窗口.
///
/// 每项为 `(start, end)` 半开区间, 按空间轴 (X, Y, Z) 排列,
/// 针对各自数据集的配准网格手工调定. 输入网格不同于预期时,
/// 裁剪会直接 panic, 不会静默产生空切片.
pub mod crop {
    /// 脑部三模态数据集的裁剪窗口, 裁剪后空间尺寸 136x172x144.
    pub const BRAIN_3D: [(usize, usize); 3] = [(28, 164), (26, 198), (12, 156)];

    /// 旧式 T1/T2 数据集的裁剪窗口, 裁剪后空间尺寸 192x160x224.
    pub const MRI_T1T2: [(usize, usize); 3] = [(48, 240), (80, 240), (36, 260)];
}

/// 默认网络下采样深度. padding 对齐模数为 `2^DEFAULT_N_DOWNSAMPLING`.
pub const DEFAULT_N_DOWNSAMPLING: u32 = 3;

/// 旧式 T1/T2 数据集重采样后的空间尺寸.
pub const MRI_T1T2_RESIZE: (usize, usize, usize) = (96, 80, 112);
