// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, DominanceError>;

/// Errors from the parts of the library that touch the outside world. Color extraction and naming
/// themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum DominanceError {
    #[error("failed to load image {}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: &'static str, value: String },
}

impl DominanceError {
    pub fn image_load(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::ImageLoad {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
