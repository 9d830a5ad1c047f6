pub mod docx_loader;

pub use docx_loader::{load_all_documents, load_document};
