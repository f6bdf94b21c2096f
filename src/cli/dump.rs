use std::time::Instant;

use polyominoes::{export, scheduler, History, Request};

use crate::{fail, finish_bar, unknown_bar, DumpOpts};

pub fn dump(opts: &DumpOpts) {
    let kind = opts.kind;
    let n = opts.n;

    let request = Request {
        enumeration: opts.enumeration.mode.into(),
        history: if opts.enumeration.no_history {
            History::Untracked
        } else {
            History::Tracked
        },
        parallel: opts.enumeration.parallel,
        ..Request::new([kind])
    };

    let bar = unknown_bar();
    bar.set_message(format!("Enumerating {kind} polyominoes of order {n}..."));

    let start = Instant::now();

    let shapes = match scheduler::shapes(kind, n, &request) {
        Ok(shapes) => shapes,
        Err(e) => {
            bar.abandon();
            fail(e)
        }
    };

    bar.set_message(format!("Writing {} shapes...", shapes.len()));

    let format = opts.format.into();
    let compression = opts.compression.into();

    let written = match &opts.output_path {
        Some(path) => export::write_file(&shapes, format, compression, path),
        None => bar.suspend(|| {
            export::write_shapes(&shapes, format, compression, std::io::stdout().lock())
        }),
    };

    match written {
        Ok(written) => finish_bar(
            &bar,
            start.elapsed(),
            &format!("Wrote {written} {kind} polyominoes (N = {n})"),
        ),
        Err(e) => {
            bar.abandon();
            fail(e)
        }
    }
}
