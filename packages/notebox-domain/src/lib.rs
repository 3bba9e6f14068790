pub mod codec;
pub mod note;
pub mod note_id;

pub use codec::CodecError;
pub use note::{Note, NoteDraft, NotePatch, NoteView};
