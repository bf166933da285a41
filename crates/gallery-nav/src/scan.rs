use gallery_types::{GalleryItem, ImageRef};
use std::{
    cmp::Ordering,
    fs, io,
    path::{Path, PathBuf},
};
use tokio::task::spawn_blocking;

pub const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif", "svg"];

/// Scans `root/<category>/<image>` into gallery items.
///
/// Categories and files are ordered with natural sort. Hidden entries are
/// skipped. Each `src` is `base/<category>/<file>`.
pub async fn scan_gallery(root: &Path, base: &str) -> io::Result<Vec<GalleryItem>> {
    let root = root.to_path_buf();
    let base = base.trim_end_matches('/').to_string();

    spawn_blocking(move || scan_gallery_sync(&root, &base))
        .await
        .map_err(io::Error::other)?
}

fn scan_gallery_sync(root: &Path, base: &str) -> io::Result<Vec<GalleryItem>> {
    let mut categories: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && !is_hidden(path))
        .collect();
    categories.sort_by(|a, b| human_sort(file_name(a), file_name(b)));

    let mut items = Vec::new();
    for dir in categories {
        let category = file_name(&dir).to_string();
        let mut images: Vec<PathBuf> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| !is_hidden(path) && is_supported_image(path))
                .collect(),
            Err(err) => {
                tracing::warn!("skipping {}: {err}", dir.display());
                continue;
            }
        };
        images.sort_by(|a, b| human_sort(file_name(a), file_name(b)));

        for path in images {
            let name = file_name(&path);
            let src = if base.is_empty() {
                format!("{category}/{name}")
            } else {
                format!("{base}/{category}/{name}")
            };
            items.push(GalleryItem::new(
                category.clone(),
                ImageRef::new(src, alt_from_stem(&path)),
            ));
        }
    }

    tracing::debug!("scanned {} items under {}", items.len(), root.display());
    Ok(items)
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// `team-offsite_02.jpg` becomes `team offsite 02`.
pub fn alt_from_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_hidden(path: &Path) -> bool {
    file_name(path).starts_with('.')
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

/// Natural ordering: digit runs compare numerically, everything else case-insensitively.
pub fn human_sort(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) if ac.is_ascii_digit() && bc.is_ascii_digit() => {
                let a_num = take_digits(&mut a_chars);
                let b_num = take_digits(&mut b_chars);

                match a_num.cmp(&b_num) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            (Some(ac), Some(bc)) => {
                a_chars.next();
                b_chars.next();
                let ac = ac.to_lowercase().next().unwrap_or(ac);
                let bc = bc.to_lowercase().next().unwrap_or(bc);

                match ac.cmp(&bc) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u64 {
    let mut value: u64 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
        chars.next();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_sort() {
        let mut names = vec!["img10.jpg", "img2.jpg", "Img1.jpg"];
        names.sort_by(|a, b| human_sort(a, b));
        assert_eq!(names, vec!["Img1.jpg", "img2.jpg", "img10.jpg"]);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("a.webp")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn test_alt_from_stem() {
        assert_eq!(alt_from_stem(Path::new("x/team-offsite_02.jpg")), "team offsite 02");
        assert_eq!(alt_from_stem(Path::new("plain.png")), "plain");
    }
}
