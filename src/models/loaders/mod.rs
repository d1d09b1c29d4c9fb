pub mod audio_loader;

pub use audio_loader::{guess_media_type, load_audio_file, load_audio_files};
