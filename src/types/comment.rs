use serde::{Deserialize, Serialize};

/// Free-form comment attached to the file or to one of its objects
/// (`CM_` line).
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Comment {
    /// Kind of object the comment refers to.
    pub object: CommentObject,
    /// Name or ID of the object. Empty for file-level comments; for signal
    /// comments this is `"<messageRef> <signalName>"` joined by one space.
    pub object_name: String,
    /// Comment text.
    pub text: String,
}

/// Kind of object a [`Comment`] refers to.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CommentObject {
    /// Comment on the file/network itself (`CM_ "…";`).
    #[default]
    File,
    /// Comment on a node (`CM_ BU_ …`).
    Node,
    /// Comment on a message (`CM_ BO_ …`).
    Message,
    /// Comment on a signal (`CM_ SG_ …`).
    Signal,
}
