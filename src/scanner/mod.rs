use crate::error::{CardDexError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// スキャン対象1件（1枚のカードに対応）
#[derive(Debug, Clone)]
pub struct ScanItem {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// フォルダ直下の画像ファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<ScanItem>> {
    if !folder.exists() {
        return Err(CardDexError::FolderNotFound(folder.display().to_string()));
    }

    let mut items = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                items.push(make_item(path));
            }
        }
    }

    // ファイル名でソート
    items.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(items)
}

/// フォルダ直下のラベルJSONファイルを列挙（ファイル名順）
///
/// 隠しファイルと除外名（コレクションファイル等）は対象外。
pub fn scan_label_files(folder: &Path, exclude: &[&str]) -> Result<Vec<ScanItem>> {
    if !folder.exists() {
        return Err(CardDexError::FolderNotFound(folder.display().to_string()));
    }

    let mut items = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_json = path
            .extension()
            .map(|e| e.to_string_lossy() == "json")
            .unwrap_or(false);
        if !is_json {
            continue;
        }

        let item = make_item(path);
        if item.file_name.starts_with('.') || exclude.contains(&item.file_name.as_str()) {
            continue;
        }
        items.push(item);
    }

    items.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(items)
}

fn make_item(path: &Path) -> ScanItem {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    ScanItem {
        path: path.to_path_buf(),
        file_name,
    }
}

#[cfg(test)]
fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}
