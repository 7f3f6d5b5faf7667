use std::io::{IsTerminal, Read};

use super::errors::CliError;

/// How positional arguments and piped stdin combine into one prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Arguments win; stdin is only consulted when no arguments are given
    Simple,
    /// Arguments and stdin are captured independently and concatenated,
    /// argument text first
    Combine,
}

/// Resolve the effective prompt from arguments and/or piped stdin
pub fn resolve_prompt(args: &[String], mode: InputMode) -> Result<String, CliError> {
    // Simple mode never touches stdin when arguments are present
    if mode == InputMode::Simple && !args.is_empty() {
        return Ok(args.join(" "));
    }

    combine_parts(args, read_piped_stdin()?, mode)
}

/// Read stdin fully if it is a pipe; `None` when attached to a terminal or
/// when the piped content is empty after trimming
fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|err| CliError::Validation(format!("failed to read from stdin: {err}")))?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

fn combine_parts(
    args: &[String],
    stdin_content: Option<String>,
    mode: InputMode,
) -> Result<String, CliError> {
    let arg_text = (!args.is_empty()).then(|| args.join(" "));

    match mode {
        InputMode::Simple => arg_text.or(stdin_content).ok_or(CliError::NoInput),
        InputMode::Combine => match (arg_text, stdin_content) {
            (Some(prompt), Some(stdin_content)) => Ok(format!("{prompt}\n\n{stdin_content}")),
            (Some(prompt), None) => Ok(prompt),
            (None, Some(stdin_content)) => Ok(stdin_content),
            (None, None) => Err(CliError::NoInput),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_combine_joins_argument_and_stdin() {
        let result = combine_parts(
            &args(&["Analyze:"]),
            Some("file contents".to_string()),
            InputMode::Combine,
        )
        .unwrap();

        assert_eq!(result, "Analyze:\n\nfile contents");
    }

    #[test]
    fn test_combine_with_only_stdin() {
        let result =
            combine_parts(&[], Some("file contents".to_string()), InputMode::Combine).unwrap();
        assert_eq!(result, "file contents");
    }

    #[test]
    fn test_combine_with_only_argument() {
        let result = combine_parts(&args(&["Analyze:"]), None, InputMode::Combine).unwrap();
        assert_eq!(result, "Analyze:");
    }

    #[test]
    fn test_combine_with_neither_fails() {
        let err = combine_parts(&[], None, InputMode::Combine).unwrap_err();
        assert!(matches!(err, CliError::NoInput));
    }

    #[test]
    fn test_simple_joins_multiple_arguments_with_spaces() {
        let result = combine_parts(&args(&["what", "is", "rust"]), None, InputMode::Simple).unwrap();
        assert_eq!(result, "what is rust");
    }

    #[test]
    fn test_simple_prefers_arguments_over_stdin() {
        let result = combine_parts(
            &args(&["from args"]),
            Some("from pipe".to_string()),
            InputMode::Simple,
        )
        .unwrap();

        assert_eq!(result, "from args");
    }

    #[test]
    fn test_simple_falls_back_to_stdin() {
        let result = combine_parts(&[], Some("from pipe".to_string()), InputMode::Simple).unwrap();
        assert_eq!(result, "from pipe");
    }

    #[test]
    fn test_simple_with_neither_fails() {
        let err = combine_parts(&[], None, InputMode::Simple).unwrap_err();
        assert!(matches!(err, CliError::NoInput));
    }
}
