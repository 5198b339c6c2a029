//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx3d, Idx4d};

pub use crate::config::{DatasetOptions, Phase};
pub use crate::data::{MriVolume, OpenVolumeError, VolumeMeta};

pub use crate::consts::gray::{GRAY_MAX, GRAY_MIN};
pub use crate::consts::DEFAULT_N_DOWNSAMPLING;

pub use crate::dataset::{home_dataset_dir_with, suffixed_file_paths};
pub use crate::dataset::{
    Brain3dDataset, BuildError, FetchError, MriT1T2Dataset, Sample,
};

pub use crate::transform::{
    CenterCrop, ColorJitter3d, Compose, PadToMultiple, Resize, SpatialFlip, SpatialRotation,
    ToGrayScale, VolumeTransform,
};
