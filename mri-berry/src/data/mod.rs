//! 3D MRI nii 文件基础数据结构.

use std::ops::{Index, IndexMut};
use std::path::Path;

use ndarray::{Array3, Array4, ArrayView, ArrayViewMut, Axis, Ix3};
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};

use crate::Idx3d;

/// `NiftiHeader` 是栈上大对象, 移动该对象的开销很可观.
/// 因此我们将其分配到堆上.
type BoxedHeader = Box<NiftiHeader>;

/// 打开 MRI 体数据文件错误.
#[derive(Debug)]
pub enum OpenVolumeError {
    /// 底层 nifti 读取错误 (文件缺失, 损坏等).
    Nifti(nifti::NiftiError),

    /// 文件内容不是 3D 体数据.
    NotRank3(ndarray::ShapeError),
}

impl From<nifti::NiftiError> for OpenVolumeError {
    fn from(value: nifti::NiftiError) -> Self {
        Self::Nifti(value)
    }
}

/// nii 格式 3D MRI 扫描, 包括 header 和体素数据. 体素强度以 `f32` 保存.
///
/// 体素数据保持文件轴序 (X, Y, Z), 不做置换:
/// 各数据集的裁剪窗口 ([`crate::consts::crop`]) 均按该轴序定义.
#[derive(Debug, Clone)]
pub struct MriVolume {
    header: BoxedHeader,
    data: Array3<f32>,
}

/// 3D MRI nii 文件 header 的共用属性和部分通用操作.
pub trait VolumeMeta {
    /// 获取 header 部分.
    fn header(&self) -> &NiftiHeader;

    /// 获取体素网格形状, 按文件轴序 (X, Y, Z).
    #[inline]
    fn shape(&self) -> Idx3d {
        let [_, x, y, z, ..] = self.header().dim;
        (x as usize, y as usize, z as usize)
    }

    /// 获取体素总个数.
    #[inline]
    fn size(&self) -> usize {
        let (x, y, z) = self.shape();
        x * y * z
    }

    /// 检查索引是否合法.
    #[inline]
    fn check(&self, (x0, y0, z0): &Idx3d) -> bool {
        let (x, y, z) = self.shape();
        *x0 < x && *y0 < y && *z0 < z
    }

    /// 获取单个体素分辨率, 以毫米为单位, 按 (X, Y, Z) 排列.
    #[inline]
    fn pix_dim(&self) -> [f64; 3] {
        let [_, x, y, z, ..] = self.header().pixdim;
        [x as f64, y as f64, z as f64]
    }

    /// 体素分辨率在三个维度上是否是各向同的?
    #[inline]
    fn is_isotropic(&self) -> bool {
        let [x, y, z] = self.pix_dim();
        x == y && x == z
    }

    /// 获取体素的实际体积值, 以立方毫米为单位.
    #[inline]
    fn voxel(&self) -> f64 {
        self.pix_dim().iter().product()
    }
}

impl VolumeMeta for MriVolume {
    #[inline]
    fn header(&self) -> &NiftiHeader {
        &self.header
    }
}

impl Index<Idx3d> for MriVolume {
    type Output = f32;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx3d> for MriVolume {
    #[inline]
    fn index_mut(&mut self, index: Idx3d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl MriVolume {
    /// 打开 nii (或 nii.gz) 文件格式的 3D MRI 扫描. `path` 为文件的本地路径.
    /// 如果打开成功, 则返回 `Ok(Self)`, 否则返回 `Err`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenVolumeError> {
        let obj = ReaderOptions::new().read_file(path.as_ref())?;
        let header = Box::new(obj.header().clone());

        // 保持 (X, Y, Z) 文件轴序.
        let data = obj
            .into_volume()
            .into_ndarray::<f32>()?
            .into_dimensionality::<Ix3>()
            .map_err(OpenVolumeError::NotRank3)?;

        Ok(Self { header, data })
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView<'_, f32, Ix3> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut<'_, f32, Ix3> {
        self.data.view_mut()
    }

    /// 消费自身, 返回带前导通道轴的 4D 数组, 形状 (1, X, Y, Z).
    /// 增广管线统一在 4D 数组上工作.
    #[inline]
    pub fn into_channels(self) -> Array4<f32> {
        self.data.insert_axis(Axis(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    // 文件读取依赖外部数据, 不在单元测试内; 这里只覆盖内存侧操作.
    fn volume(data: Array3<f32>) -> MriVolume {
        MriVolume {
            header: Box::default(),
            data,
        }
    }

    #[test]
    fn test_into_channels_adds_leading_axis() {
        let v = volume(Array3::from_shape_vec((2, 2, 2), (0..8).map(|n| n as f32).collect()).unwrap());
        let lifted = v.clone().into_channels();
        assert_eq!(lifted.dim(), (1, 2, 2, 2));
        assert_eq!(lifted[(0, 1, 0, 1)], v[(1, 0, 1)]);
    }

    #[test]
    fn test_index_matches_view() {
        let v = volume(Array3::from_elem((3, 4, 5), 7.0));
        assert_eq!(v[(2, 3, 4)], 7.0);
        assert_eq!(v.data()[(0, 0, 0)], 7.0);
    }
}
