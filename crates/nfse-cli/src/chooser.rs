//! Source folder selection.

use std::path::PathBuf;

/// Title of the native folder dialog.
pub const DIALOG_TITLE: &str = "Selecione a pasta com os PDFs";

/// Picks the folder to process. `None` means the user made no choice.
pub trait DirectoryChooser {
    fn choose_directory(&self) -> Option<PathBuf>;
}

/// Native folder dialog.
pub struct DialogChooser;

impl DirectoryChooser for DialogChooser {
    fn choose_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new().set_title(DIALOG_TITLE).pick_folder()
    }
}

/// A folder given up front, e.g. on the command line.
pub struct FixedDirectory(pub PathBuf);

impl DirectoryChooser for FixedDirectory {
    fn choose_directory(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}
