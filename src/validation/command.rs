use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Shapes that reject a command, most specific first so the reported
/// reason names the actual problem.
static DENYLIST: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"rm\s+-rf\s+/", "recursive deletion of the root directory"),
        (r"\|\s*(ba)?sh\b", "pipe into a shell"),
        (r"\$\(", "command substitution"),
        (r"`", "backtick command substitution"),
        (r"&&|\|\|", "command chaining"),
        (r"[;&|$()<>]", "shell metacharacter"),
        (r"[\r\n]", "line break"),
    ]
    .into_iter()
    .map(|(pattern, reason)| (Regex::new(pattern).expect("valid denylist pattern"), reason))
    .collect()
});

/// Gates a shell command before it can reach a process spawner.
///
/// `None` and blank input mean "no command" and are accepted as `Ok(None)`.
/// Anything matching the denylist is rejected; otherwise the trimmed
/// command is returned.
pub fn sanitize_command(command: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(command) = command else {
        return Ok(None);
    };

    if let Some((_, reason)) = DENYLIST.iter().find(|(re, _)| re.is_match(command)) {
        return Err(ValidationError::ForbiddenCharacter(format!(
            "Command contains potentially dangerous characters ({})",
            reason
        )));
    }

    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

/// Entry point for commands read from a YAML document, where the value may
/// not be a string at all.
pub fn sanitize_command_value(
    value: &serde_yaml::Value,
) -> Result<Option<String>, ValidationError> {
    match value {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::String(command) => sanitize_command(Some(command)),
        _ => Err(ValidationError::InputType("Command must be a string".into())),
    }
}
