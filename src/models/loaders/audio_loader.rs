use crate::error::FileError;
use crate::models::audio_file::AudioFile;
use std::path::Path;
use tokio::fs;

/// 根据扩展名推断声明的媒体类型
///
/// 只是给文件打一个"声明类型"，真正是否接受由入口校验决定。
pub fn guess_media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("mp3") => "audio/mp3",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// 从磁盘读取一个音频文件
pub async fn load_audio_file(path: &Path) -> Result<AudioFile, FileError> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| FileError::from_io(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!("已读取文件 {} ({} 字节)", name, bytes.len());

    Ok(AudioFile::new(name, guess_media_type(path), bytes))
}

/// 依次读取多个文件，读取失败的文件记录警告后跳过
pub async fn load_audio_files<P: AsRef<Path>>(paths: &[P]) -> Vec<AudioFile> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        match load_audio_file(path.as_ref()).await {
            Ok(file) => files.push(file),
            Err(e) => tracing::warn!("⚠️ 跳过文件: {}", e),
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type(Path::new("a.mp3")), "audio/mp3");
        assert_eq!(guess_media_type(Path::new("a.MP3")), "application/octet-stream");
        assert_eq!(guess_media_type(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(guess_media_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_load_audio_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.mp3");
        std::fs::write(&path, b"ID3fake").unwrap();

        let file = tokio_test::block_on(load_audio_file(&path)).unwrap();

        assert_eq!(file.name, "answer.mp3");
        assert_eq!(file.media_type, "audio/mp3");
        assert_eq!(file.bytes(), b"ID3fake");
    }

    #[tokio::test]
    async fn test_load_audio_files_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.mp3");
        std::fs::write(&present, b"x").unwrap();
        let missing = dir.path().join("b.mp3");

        let files = load_audio_files(&[present, missing]).await;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.mp3");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = load_audio_file(Path::new("/no/such/file.mp3")).await.unwrap_err();
        assert!(matches!(err, FileError::NotFound { .. }));
    }
}
