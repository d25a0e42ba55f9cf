use editor::export::CopyToken;
use editor::{DevicePreview, Mode, UploadTicket};

pub enum Msg {
    SetMode(Mode),
    SetDevice(DevicePreview),
    /// The user typed into the rendered document.
    VisualInput,
    /// Keystroke in the source view.
    CodeInput(String),
    EditorClick(web_sys::MouseEvent),
    ViewportChanged,
    DismissImage,
    ImageUrlInput(String),
    SubmitImageUrl,
    OpenFilePicker,
    FilePicked(Option<web_sys::File>),
    UploadRead {
        ticket: UploadTicket,
        bytes: Vec<u8>,
        mime: String,
    },
    Copy,
    Copied,
    CopyReset(CopyToken),
    Export,
    OpenSave,
    CloseSave,
    SaveNameInput(String),
    SubmitSave,
    OpenSend,
    CloseSend,
    SendRecipientInput(String),
    SendSubjectInput(String),
    SubmitSend,
    SendFinished,
    SendClosed,
    OpenMailClient,
}
