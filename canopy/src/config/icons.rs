//! Default icon names

/// Icon for nodes with children when nothing else applies.
pub const FOLDER_ICON: &str = "folder";

/// Icon for leaves and unknown categories.
pub const FALLBACK_ICON: &str = "description";

/// Maps a category tag to a default icon name (case-insensitive).
pub fn default_icon(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "folder" => FOLDER_ICON,
        "file" => "description",
        "document" => "article",
        "image" => "image",
        "config" => "settings",
        "executable" => "launch",
        "archive" => "archive",
        "video" => "video_file",
        "audio" => "audio_file",
        "code" => "code",
        "text" => "text_snippet",
        _ => FALLBACK_ICON,
    }
}
