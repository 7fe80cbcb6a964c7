mod note;
mod session;

pub use note::{CreateNoteRequest, Note, NoteFields, UpdateNoteRequest};
pub use session::Session;
