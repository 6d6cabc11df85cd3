pub mod cover_letter;
pub mod resume;
pub mod sample;

pub use cover_letter::CoverLetterData;
pub use resume::ResumeData;

/// Returns `value` unless it is blank, in which case the sample text is used.
pub(crate) fn fallback_text(value: &str, sample: &str) -> String {
    if value.trim().is_empty() {
        sample.to_string()
    } else {
        value.to_string()
    }
}

/// Returns a copy of `value` unless it is empty, in which case the sample list is used.
pub(crate) fn fallback_list<T: Clone>(value: &[T], sample: impl FnOnce() -> Vec<T>) -> Vec<T> {
    if value.is_empty() {
        sample()
    } else {
        value.to_vec()
    }
}
