/*!
 * klhelp
 *
 * Prints the help screen of a sample command line, or of one of its
 * sub-commands when its name is given as the first argument.
 */

use tracing::info;

use kl_core::{init_tracing, span_operation, Argument, ArgumentParser, Text};

fn build_parser() -> kl_core::KlResult<ArgumentParser> {
    let mut parser = ArgumentParser::new(
        "klhelp",
        "Inspect the kl-core toolkit",
        "Set RUST_LOG=debug for allocation traces.",
    );
    parser.add(Argument::new(Some('v'), "verbose", 0, "Print more detail"))?;
    parser.add(Argument::new(Some('o'), "output", 1, "Write to a file"))?;

    let text = parser.create_subparser("text")?;
    text.add(Argument::new(Some('s'), "subtext", 2, "Print bytes [start, end)"))?;

    let array = parser.create_subparser("array")?;
    array.add(Argument::new(Some('n'), "count", 1, "Number of elements to push"))?;
    array.add(Argument::new(None, "reserve", 1, "Reserve capacity up front"))?;

    Ok(parser)
}

fn main() -> miette::Result<()> {
    init_tracing();

    let span = span_operation("klhelp");
    let parser = build_parser()?;

    let target = match std::env::args().nth(1) {
        Some(feature) => parser.subparser(&feature)?,
        None => &parser,
    };

    let lines = target.help();
    span.record_items(lines.len());
    info!(prog = %target.prog_name(), lines = lines.len(), "rendering help");

    for line in lines.iter() {
        println!("{}", line);
    }
    drop(span);

    let features: Vec<Text> = parser.features().into_iter().collect();
    info!(?features, "done");
    Ok(())
}
