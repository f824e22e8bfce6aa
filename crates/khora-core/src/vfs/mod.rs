// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! File system queries used by the asset importers.
//!
//! Importers never touch `std::fs` directly to decide what a path is; they ask
//! this module, so the rules for engine-native files stay in one place.

use std::path::Path;

/// The file extension of textures serialized in Khora's own format.
pub const ENGINE_TEXTURE_EXTENSION: &str = "ktex";

/// Returns `true` if `path` names an existing regular file.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Returns `true` if `path` names a texture already serialized by the engine.
///
/// The check is purely name based; the content is validated when the file is read.
pub fn is_engine_texture_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ENGINE_TEXTURE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_exists_only_for_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("albedo.png");
        std::fs::write(&file, b"not really a png").unwrap();

        assert!(file_exists(&file));
        assert!(!file_exists(dir.path()));
        assert!(!file_exists(&dir.path().join("missing.png")));
    }

    #[test]
    fn test_engine_texture_detection() {
        assert!(is_engine_texture_file(Path::new("cache/albedo.ktex")));
        assert!(is_engine_texture_file(Path::new("cache/ALBEDO.KTEX")));
        assert!(!is_engine_texture_file(Path::new("cache/albedo.png")));
        assert!(!is_engine_texture_file(Path::new("cache/ktex")));
    }
}
