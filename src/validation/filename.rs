use super::{ValidationError, has_traversal_segment};

/// Longest accepted recording or config file name, in UTF-16 code units.
pub const MAX_FILE_NAME_LEN: usize = 255;

const FORBIDDEN_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Accepts a bare file name: no separator, no traversal, no control or
/// shell-hostile character, and not a reserved device name.
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InputType("File name is required".into()));
    }

    if name.contains(['/', '\\']) {
        return Err(ValidationError::Traversal(format!(
            "File name '{}' must not contain a path separator",
            name.escape_debug()
        )));
    }

    if has_traversal_segment(name) {
        return Err(ValidationError::Traversal(
            "File name must not be a parent directory reference".into(),
        ));
    }

    if let Some(c) = name
        .chars()
        .find(|c| c.is_control() || FORBIDDEN_CHARS.contains(c))
    {
        return Err(ValidationError::ForbiddenCharacter(format!(
            "File name contains the forbidden character '{}'",
            c.escape_debug()
        )));
    }

    // `split` always yields at least one item
    let stem = name.split('.').next().unwrap_or(name).to_uppercase();
    if RESERVED_NAMES.contains(&stem.as_str()) {
        return Err(ValidationError::ForbiddenCharacter(format!(
            "'{}' is a reserved device name",
            name
        )));
    }

    Ok(())
}

/// Same rules as [`validate_file_name`], bounded to [`MAX_FILE_NAME_LEN`].
pub fn validate_recording_file(name: &str) -> Result<(), ValidationError> {
    validate_file_name(name)?;

    if name.encode_utf16().count() > MAX_FILE_NAME_LEN {
        return Err(ValidationError::Range(format!(
            "Recording file name is too long (max {} characters)",
            MAX_FILE_NAME_LEN
        )));
    }

    Ok(())
}
