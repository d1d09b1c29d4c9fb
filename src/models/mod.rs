pub mod audio_file;
pub mod entry;
pub mod loaders;
pub mod score;
pub mod submission;

pub use audio_file::AudioFile;
pub use entry::{FileEntry, Row, RowId};
pub use loaders::{guess_media_type, load_audio_file, load_audio_files};
pub use score::{Band, RenderedScore, ScoreResult};
pub use submission::SubmissionRequest;
