//! Local video files: picking, validation and playback in an external player

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::ShopError;

/// Container extensions accepted as video
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mkv", "webm", "avi", "mov", "wmv", "flv", "mpg", "mpeg", "ts", "ogv", "3gp",
];

/// Handle to a user-selected video. Nothing is copied; the file is played
/// from where it lives for as long as the session runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResource {
    pub path: PathBuf,
    pub file_name: String,
}

impl VideoResource {
    pub fn from_path(path: PathBuf) -> Result<Self, ShopError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_video_file(&path) {
            return Err(ShopError::InvalidFileType(file_name));
        }
        Ok(Self { path, file_name })
    }
}

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Native file dialog filtered to video files. `None` when cancelled.
pub fn pick_video() -> Option<Result<VideoResource, ShopError>> {
    rfd::FileDialog::new()
        .set_title("Choose a video")
        .add_filter("Video", VIDEO_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
        .map(VideoResource::from_path)
}

/// Resolve the player command, falling back to ffplay
pub fn resolve_player(configured: &str) -> String {
    let player = configured.trim();
    let player = if player.is_empty() { "ffplay" } else { player }.to_string();

    // Auto-detect player paths on Windows
    #[cfg(target_os = "windows")]
    let player = {
        let p_lower = player.to_lowercase();
        let candidates: &[&str] = if p_lower == "vlc" || p_lower == "vlc.exe" {
            &[
                r"C:\Program Files\VideoLAN\VLC\vlc.exe",
                r"C:\Program Files (x86)\VideoLAN\VLC\vlc.exe",
            ]
        } else if p_lower == "mpv" || p_lower == "mpv.exe" {
            &[r"C:\Program Files\mpv\mpv.exe", r"C:\mpv\mpv.exe"]
        } else if p_lower == "ffplay" || p_lower == "ffplay.exe" {
            &[r"C:\ffmpeg\bin\ffplay.exe", r"C:\Program Files\ffmpeg\bin\ffplay.exe"]
        } else {
            &[]
        };
        candidates
            .iter()
            .find(|path| Path::new(path).exists())
            .map(|s| s.to_string())
            .unwrap_or(player)
    };

    player
}

/// Player arguments for a local file, with the movie title as window title
pub fn player_args(player: &str, video: &Path, title: &str) -> Vec<String> {
    let player_lower = player.to_lowercase();
    let file = video.to_string_lossy().into_owned();

    if player_lower.contains("ffplay") {
        vec![
            file,
            "-autoexit".to_string(),
            "-window_title".to_string(),
            title.to_string(),
        ]
    } else if player_lower.contains("mpv") {
        vec![file, format!("--title={}", title), "--keep-open=no".to_string()]
    } else if player_lower.contains("vlc") {
        vec![file, format!("--meta-title={}", title), "--play-and-exit".to_string()]
    } else {
        vec![file]
    }
}

/// Start the external player detached from our stdin/stdout
pub fn launch_player(player: &str, video: &Path, title: &str) -> std::io::Result<Child> {
    let mut cmd = Command::new(player);

    // On Windows, hide the console window for ffplay
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        if player.to_lowercase().contains("ffplay") {
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
    }

    cmd.args(player_args(player, video, title))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}
