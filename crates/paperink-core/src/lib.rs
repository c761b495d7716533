//! PaperInk Core Library
//!
//! Platform-agnostic document, storage and canvas logic for the PaperInk
//! note app. The host supplies the filesystem, the cloud account and the
//! input events; everything in between lives here.

pub mod bridge;
pub mod camera;
pub mod canvas;
pub mod document;
pub mod drawing;
pub mod manager;
pub mod preferences;
pub mod storage;
pub mod tools;
pub mod view_model;

pub use bridge::{BridgeRequest, CanvasDelegateBridge, LinkMetadata, PencilTapAction, ZoomTarget};
pub use camera::Camera;
pub use canvas::{CanvasEvent, CanvasView};
pub use document::{NoteDocument, NoteEntity, SaveOperation};
pub use drawing::{Drawing, Ink, SerializableColor, Stroke, StrokePoint};
pub use manager::DocumentManager;
pub use preferences::UserPreference;
pub use storage::{
    CloudAccount, FilePaths, FileSystem, LocalFileSystem, MemoryFileSystem, StorageError,
    StorageLocation, StorageResolver, StorageResult,
};
pub use tools::{EraserKind, InkKind, Tool, ToolPicker};
pub use view_model::CanvasViewModel;
