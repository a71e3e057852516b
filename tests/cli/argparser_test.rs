/*!
 * Argument Parser Tests
 */

use kl_core::cli::{Argument, ArgumentParser};
use kl_core::ErrorKind;
use pretty_assertions::assert_eq;

fn lines(parser: &ArgumentParser) -> Vec<String> {
    parser.help().iter().map(|line| line.to_string()).collect()
}

#[test]
fn test_help_screen_layout() {
    let mut parser = ArgumentParser::new("tool", "Does things", "See the manual.");
    parser
        .add(Argument::new(Some('o'), "output", 1, "Output file"))
        .unwrap();
    parser
        .add(Argument::new(None, "dry-run", 0, "Print only"))
        .unwrap();

    assert_eq!(
        lines(&parser),
        vec![
            "Usage: tool [OPTIONS]...".to_string(),
            "Does things".to_string(),
            "Options:".to_string(),
            "  -h, --help            This help message".to_string(),
            "  -o, --output <VALUE>  Output file".to_string(),
            "      --dry-run         Print only".to_string(),
            "See the manual.".to_string(),
        ]
    );
}

#[test]
fn test_duplicate_short_and_long() {
    let mut parser = ArgumentParser::new("tool", "", "");
    parser.add(Argument::new(Some('v'), "verbose", 0, "")).unwrap();

    let short = parser.add(Argument::new(Some('v'), "version", 0, "")).unwrap_err();
    assert_eq!(short.kind(), ErrorKind::DuplicateIndex);
    assert_eq!(short.to_string(), "Duplicate index: v");

    let long = parser.add(Argument::new(Some('x'), "verbose", 0, "")).unwrap_err();
    assert_eq!(long.kind(), ErrorKind::DuplicateIndex);
    assert_eq!(parser.arguments().len(), 2);
}

#[test]
fn test_subparser_registry() {
    let mut parser = ArgumentParser::new("tool", "", "");
    parser.create_subparser("run").unwrap();
    parser.create_subparser("build").unwrap();
    assert_eq!(
        parser.create_subparser("run").unwrap_err().kind(),
        ErrorKind::DuplicateIndex
    );

    let features: Vec<String> = parser.features().iter().map(|f| f.to_string()).collect();
    assert_eq!(features, vec!["build".to_string(), "run".to_string()]);
    assert!(lines(&parser).contains(&"Commands:".to_string()));

    let run = parser.subparser("run").unwrap();
    assert_eq!(run.help()[0], "Usage: tool run [OPTIONS]...");
    assert_eq!(
        parser.subparser("missing").unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
}
