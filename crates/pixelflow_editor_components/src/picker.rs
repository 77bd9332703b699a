// SPDX-License-Identifier: MIT OR Apache-2.0
//! Platform directory-picker collaborator.

use std::path::PathBuf;

/// Outcome of a directory-picker invocation.
///
/// Cancellation is distinct from an empty selection; callers must treat
/// both as input-unchanged, but only one of them is a dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResponse {
    /// The user dismissed the dialog
    pub canceled: bool,
    /// Selected paths, in selection order
    pub file_paths: Vec<PathBuf>,
}

impl PickResponse {
    /// A dismissed dialog
    pub fn dismissed() -> Self {
        Self {
            canceled: true,
            file_paths: Vec::new(),
        }
    }

    /// A confirmed selection
    pub fn selected(file_paths: Vec<PathBuf>) -> Self {
        Self {
            canceled: false,
            file_paths,
        }
    }
}

/// A collaborator that asks the user to choose a directory.
///
/// The call suspends the invoking interaction until the user resolves or
/// dismisses the dialog; it never blocks the rest of the editor.
pub trait DirectoryPicker {
    /// Open the dialog, starting from `initial` when it is non-empty
    fn pick_directory(&self, initial: &str) -> PickResponse;
}

/// [`DirectoryPicker`] backed by the native platform dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDirectoryPicker;

impl DirectoryPicker for SystemDirectoryPicker {
    fn pick_directory(&self, initial: &str) -> PickResponse {
        let mut dialog = rfd::FileDialog::new().set_title("Select a directory");
        if !initial.is_empty() {
            dialog = dialog.set_directory(initial);
        }
        match dialog.pick_folder() {
            Some(path) => PickResponse::selected(vec![path]),
            None => PickResponse::dismissed(),
        }
    }
}
