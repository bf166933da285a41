use gallery_nav::{FilterBar, scan::scan_gallery};
use gallery_types::GalleryItem;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest io error: {0}")]
    Io(#[from] io::Error),
    #[error("manifest json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no images found under {}", .0.display())]
    Empty(PathBuf),
}

/// Scans `root` into gallery items. An empty gallery is an error.
pub async fn build_manifest(root: &Path, base: &str) -> Result<Vec<GalleryItem>, ManifestError> {
    let items = scan_gallery(root, base).await?;
    if items.is_empty() {
        return Err(ManifestError::Empty(root.to_path_buf()));
    }

    let filters = FilterBar::from_items(&items);
    for tag in filters.tags().iter().filter(|tag| !tag.is_all()) {
        let count = items
            .iter()
            .filter(|item| tag.matches(&item.category))
            .count();
        tracing::info!("{tag}: {count} images");
    }

    Ok(items)
}

pub fn to_json(items: &[GalleryItem]) -> Result<String, ManifestError> {
    Ok(serde_json::to_string_pretty(items)?)
}

pub fn write_manifest(items: &[GalleryItem], out: &Path) -> Result<(), ManifestError> {
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, to_json(items)?)?;
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<GalleryItem>, ManifestError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
