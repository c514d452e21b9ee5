//! Verbosity demo
//!
//! Counts `-v` flags on the command line and reports at matching levels,
//! then repeats the run with bitmask categories into a temporary file.
//!
//! Run with: cargo run --example verbosity -- -vv

use verbosity_logger::prelude::*;

fn main() -> Result<()> {
    let verbosity = std::env::args()
        .skip(1)
        .filter(|arg| arg.starts_with("-v"))
        .map(|arg| arg.len() as i64 - 1)
        .sum::<i64>();

    let mut logger = Logger::builder()
        .labels([("v", 1), ("vv", 2), ("vvv", 3)])
        .threshold(verbosity)
        .prefix("demo: ")
        .sink(SpecialSink::Stdout)
        .build()?;

    report!(logger, format!("verbosity is {}", verbosity))?;
    report_label!(logger, "v", "shown with -v")?;
    report_label!(logger, "vv", "shown with -vv")?;
    report_label!(logger, "vvv", "shown with -vvv")?;

    report!(logger, "working", MessageArg::no_newline())?;
    for _ in 0..3 {
        report!(logger, Overlay::new().prefix(""), ".", MessageArg::no_newline())?;
    }
    report!(logger, Overlay::new().prefix(""), " done")?;

    // Category masks, written to a file
    let path = std::env::temp_dir().join("verbosity-demo.log");
    let mut categories = Logger::builder()
        .level_style(LevelStyle::Bitmask)
        .labels([("parse", 0b001), ("resolve", 0b010), ("emit", 0b100)])
        .threshold(0b101)
        .append(false)
        .sink(path.clone())
        .build()?;

    for (label, text) in [
        ("parse", "parsed 12 items"),
        ("resolve", "resolved 12 names"),
        ("emit", "wrote output"),
    ] {
        let fired = report_label!(categories, label, text)?;
        report!(logger, format!("{:<8} -> {:?}", label, fired))?;
    }
    categories.close()?;

    report!(logger, format!("category log: {}", path.display()))?;
    print!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
