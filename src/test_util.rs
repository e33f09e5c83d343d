use crate::curl::{ParsedCommand, parse};

/// Runs a nom parser and compares its output, ignoring the remaining input.
pub fn generic_command_parse<F, I, T, E>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> Result<(I, T), E>,
    T: PartialEq + std::fmt::Debug,
    I: std::fmt::Debug + Copy,
    E: std::fmt::Debug,
{
    let result = parser(input);
    assert!(result.is_ok(), "input: ({:?})\r\nresult:\r\n{:#?}", input, result);
    let (_rest, res) = result.unwrap();
    pretty_assertions::assert_eq!(
        expect, res,
        "The expect:\r\n({:?}) should be same with the result:\r\n({:?})",
        expect, res
    );
}

/// Parses `command` and compares the whole record.
pub fn assert_parsed(command: &str, expect: ParsedCommand) {
    let parsed = parse(command);
    pretty_assertions::assert_eq!(expect, parsed, "command: ({})", command);
}
