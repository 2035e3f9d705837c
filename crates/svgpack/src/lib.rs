/*!
svgpack optimises the SVG assets of a web project and builds them into sprites.

A run goes through a list of [`Task`]s in order. Each task either optimises and copies the
SVGs of a directory, or compiles them into a `<symbol>` sprite. The first failure ends the run.

# Example

```no_run
use std::path::Path;
use svgpack::{run, task::Task};

let summary = run(&Task::defaults(), Path::new(".")).unwrap();
println!("{} files written", summary.files);
```
*/
use std::path::Path;

pub mod args;
pub mod config;
pub mod error;
pub mod fs;
pub mod process;
pub mod task;

pub use crate::error::Error;
pub use crate::task::Task;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// What a run has done
pub struct Summary {
    /// The number of tasks which ran to completion
    pub tasks: usize,
    /// The number of files written
    pub files: usize,
}

/// Runs each task in order, resolving their paths against `root`.
///
/// # Errors
///
/// When any task fails. Tasks after the failing task are never run.
pub fn run(tasks: &[Task], root: &Path) -> Result<Summary, Error> {
    let mut summary = Summary::default();
    for task in tasks {
        summary.files += task.run(root)?;
        summary.tasks += 1;
    }
    log::info!(
        "ran {} tasks, writing {} files",
        summary.tasks,
        summary.files
    );
    Ok(summary)
}

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
