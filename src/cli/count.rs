use std::time::Instant;

use indicatif::ProgressBar;
use polyominoes::{oeis, scheduler::Entry, Entries, History, Kind, Request};

use crate::{fail, finish_bar, make_bar, CountOpts, TableFormat};

fn title(kind: Kind, format: TableFormat) -> String {
    match (format, kind.link()) {
        (TableFormat::Md, Some(link)) => format!("[{kind}]({link})"),
        _ => kind.to_string(),
    }
}

fn row(cells: &[String], format: TableFormat) -> String {
    match format {
        TableFormat::Csv => cells.join(","),
        TableFormat::Md => format!("| {} |", cells.join(" | ")),
    }
}

fn verify(entry: &Entry) -> Result<(), String> {
    let Some(expected) = entry
        .kind
        .reference()
        .and_then(|sequence| oeis::lookup(sequence, entry.order))
    else {
        return Ok(());
    };

    if expected == entry.count {
        Ok(())
    } else {
        Err(format!(
            "Found {} {} polyominoes of order {}, expected {expected}",
            entry.count, entry.kind, entry.order
        ))
    }
}

pub fn count(opts: &CountOpts) {
    let mut columns: Vec<Kind> = Vec::with_capacity(opts.columns.len());
    for kind in &opts.columns {
        if !columns.contains(kind) {
            columns.push(*kind);
        }
    }

    let request = Request {
        kinds: columns.clone(),
        min_order: opts.min_order,
        max_order: opts.max_order,
        enumeration: opts.enumeration.mode.into(),
        history: if opts.enumeration.no_history {
            History::Untracked
        } else {
            History::Tracked
        },
        parallel: opts.enumeration.parallel,
    };

    let bar = if opts.progress {
        make_bar(0)
    } else {
        ProgressBar::hidden()
    };

    let entries = match Entries::with_progress(&request, bar.clone()) {
        Ok(entries) => entries,
        Err(e) => fail(e),
    };

    let format = opts.format;
    let emit = |line: String| bar.suspend(|| println!("{line}"));

    let titles: Vec<String> = columns.iter().map(|kind| title(*kind, format)).collect();
    emit(row(&titles, format));

    if format == TableFormat::Md {
        emit(row(&vec!["---".to_string(); columns.len()], format));
    }

    let start = Instant::now();
    let mut cells: Vec<Option<u64>> = vec![None; columns.len()];
    let mut rows = 0;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                bar.abandon();
                fail(e)
            }
        };

        if opts.verify {
            if let Err(mismatch) = verify(&entry) {
                bar.abandon();
                fail(mismatch);
            }
        }

        if let Some(column) = columns.iter().position(|kind| *kind == entry.kind) {
            cells[column] = Some(entry.count);
        }

        if cells.iter().all(Option::is_some) {
            let line: Vec<String> = cells
                .iter_mut()
                .filter_map(Option::take)
                .map(|count| count.to_string())
                .collect();

            emit(row(&line, format));
            rows += 1;
        }
    }

    if opts.progress {
        finish_bar(&bar, start.elapsed(), &format!("Counted {rows} orders"));
    }
}
