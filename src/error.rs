// One error type for the whole viewer.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Document load error: {0}")]
    Load(String), // Fetching or parsing the document failed

    #[error("Page {page} is out of range (document has {count} pages)")]
    OutOfRange { page: u16, count: u16 }, // Asked for a page the document doesn't have

    #[error("Page render error: {0}")]
    Render(String), // Rasterizing the page failed

    #[error("Config error: {0}")]
    Config(String), // Config file unreadable or values invalid

    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
}
