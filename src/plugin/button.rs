use std::path::Path;

/// Visual surface of a host-owned deck button.
///
/// Buttons are mutable resources owned by the host runtime; actions only
/// write display properties through this interface for the duration of a
/// press callback. Keeping the surface behind a trait means the action
/// layer can be exercised without a real deck attached.
pub trait DeckButton: Send {
    /// Replace the button's label text. An empty string clears the label.
    fn set_label(&mut self, text: &str);

    /// Replace the button's background with a local image file.
    fn set_background(&mut self, image: &Path);
}
