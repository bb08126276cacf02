mod tracked;

pub use tracked::{ChangeDetector, TrackedFile, TrackedFiles};
