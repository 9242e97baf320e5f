use common::requests::UploadResponse;

pub enum Msg {
    OpenFileDialog,
    FileSelected(web_sys::File),
    /// Result of the upload round-trip, tagged with the upload generation it
    /// belongs to. Stale generations are ignored.
    UploadFinished {
        seq: u32,
        result: Result<(UploadResponse, Vec<u8>), String>,
    },
    InputChanged(String),
    Submit,
    Select(usize),
    /// Text export: "docx", "pdf", or "html".
    Export(&'static str),
    /// Formatting-preserving export of the original binary.
    ExportBinary,
    ExportFinished {
        file_name: String,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
    ExportBlocked(Vec<String>),
    ExportFailed(String),
    /// The backend rejected a fill-value save; the session drops to
    /// local-only mode.
    SaveFailed(String),
    Reset,
}
