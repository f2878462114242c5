use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Groups of file extensions offered by the file-type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    Images,
    Documents,
    Audio,
    Video,
    Archives,
}

impl FileCategory {
    pub const ALL: [FileCategory; 5] = [
        FileCategory::Images,
        FileCategory::Documents,
        FileCategory::Audio,
        FileCategory::Video,
        FileCategory::Archives,
    ];

    /// Extensions in this category, lower case with a leading dot
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileCategory::Images => &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp"],
            FileCategory::Documents => &[
                ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".csv", ".rtf",
            ],
            FileCategory::Audio => &[".mp3", ".wav", ".aac", ".ogg", ".flac"],
            FileCategory::Video => &[".mp4", ".mov", ".avi", ".mkv", ".webm"],
            FileCategory::Archives => &[".zip", ".rar", ".7z", ".tar", ".gz"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileCategory::Images => "Images",
            FileCategory::Documents => "Documents",
            FileCategory::Audio => "Audio",
            FileCategory::Video => "Video",
            FileCategory::Archives => "Archives",
        }
    }

    /// Finds the category an extension belongs to, if any
    pub fn of_extension(extension: &str) -> Option<FileCategory> {
        let extension = normalize_extension(extension);
        Self::ALL
            .into_iter()
            .find(|category| category.extensions().iter().any(|ext| *ext == extension))
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
                format!("unknown file category '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Lower-cases an extension and makes sure it starts with a dot
pub fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim().to_lowercase();
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{}", extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(FileCategory::of_extension(".PDF"), Some(FileCategory::Documents));
        assert_eq!(FileCategory::of_extension("7z"), Some(FileCategory::Archives));
        assert_eq!(FileCategory::of_extension(".exe"), None);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("images".parse::<FileCategory>(), Ok(FileCategory::Images));
        assert_eq!(" Video ".parse::<FileCategory>(), Ok(FileCategory::Video));
        assert!("fonts".parse::<FileCategory>().is_err());
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("JPG"), ".jpg");
        assert_eq!(normalize_extension(".Tar"), ".tar");
    }

    #[test]
    fn test_every_extension_is_normalized() {
        for category in FileCategory::ALL {
            for ext in category.extensions() {
                assert_eq!(&normalize_extension(ext), ext);
            }
        }
    }
}
