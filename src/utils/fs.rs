use std::path::{Path, PathBuf};

/// `<data_dir>/<user>.csv`, with path separators in the name neutralised.
pub fn user_data_file(data_dir: &Path, user: &str) -> PathBuf {
    data_dir.join(format!("{}.csv", file_stem_for(user)))
}

pub fn file_stem_for(user: &str) -> String {
    let stem: String = user
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|ch| ch == '.') {
        "_".to_string()
    } else {
        stem
    }
}

pub fn display_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
