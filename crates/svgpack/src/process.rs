//! The processors behind each [`TaskKind`](crate::task::TaskKind).
use std::path::Path;

use svgpack_optimiser::{optimise, Jobs};
use svgpack_sprite::{Config, Modes, SVGSpriter, ShapeConfig, SymbolMode};

use crate::{
    error::Error,
    fs::{self, file_name, read_svgs},
    task::Task,
};

/// Derives a shape's id from its file name, by removing the first `.svg`.
///
/// The match is case-sensitive, so `HOME.SVG` is kept as is.
pub fn rename_svg(name: &str) -> String {
    name.replacen(".svg", "", 1)
}

/// Optimises each SVG of the task's source directory with [`Jobs::baseline`], writing the
/// result under the same name in the task's output directory.
///
/// Returns the number of files written.
///
/// # Errors
///
/// When the output directory can't be created, or any file fails to be read, optimised, or
/// written. Files written before the failure are kept.
pub fn optimise_and_copy(task: &Task, root: &Path) -> Result<usize, Error> {
    let src_dir = root.join(&task.src_dir);
    let out_dir = root.join(&task.out_dir);
    fs::create_dir_all(&out_dir)?;

    let jobs = Jobs::baseline();
    let files = read_svgs(&src_dir)?;
    for path in &files {
        let source = fs::read(path)?;
        let optimised = optimise(&source, &jobs).map_err(|source| Error::OptimizationFailure {
            path: path.clone(),
            source,
        })?;
        fs::write(&out_dir.join(file_name(path)), &optimised)?;
    }
    log::debug!("{}: copied {} files", task.name, files.len());
    Ok(files.len())
}

/// Compiles the SVGs of the task's source directory into a symbol sprite, writing each
/// compiled resource under the task's output directory.
///
/// Returns the number of files written.
///
/// # Errors
///
/// When any file fails to be read, the sprite fails to compile, or a resource fails to be
/// written.
pub fn build_sprite(task: &Task, root: &Path) -> Result<usize, Error> {
    let src_dir = root.join(&task.src_dir);
    let sprite = task.sprite_config();
    let mut spriter = SVGSpriter::new(Config {
        dest: root.join(&task.out_dir),
        mode: Modes {
            symbol: Some(SymbolMode {
                sprite: sprite.sprite.clone(),
                inline: true,
                example: sprite.example,
                ..SymbolMode::default()
            }),
        },
        shape: ShapeConfig {
            id: rename_svg,
            transform: sprite.resolve_jobs(),
            ..ShapeConfig::default()
        },
    });

    for path in read_svgs(&src_dir)? {
        let contents = fs::read(&path)?;
        spriter.add(&path, &file_name(&path), &contents);
    }

    log::debug!("{}: compiling {} shapes", task.name, spriter.shapes().len());
    let result = spriter
        .compile()
        .map_err(|source| Error::SpriteCompilationFailure {
            task: task.name.clone(),
            source,
        })?;

    let mut written = 0;
    for (mode, resources) in &result {
        for (name, resource) in resources {
            if let Some(parent) = resource.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&resource.path, &resource.contents)?;
            log::info!(
                "{}: wrote {mode} {name} to {}",
                task.name,
                resource.path.display()
            );
            written += 1;
        }
    }
    Ok(written)
}

#[test]
fn shape_ids() {
    assert_eq!(rename_svg("home.svg"), "home");
    assert_eq!(rename_svg("home.icon.svg"), "home.icon");
    assert_eq!(rename_svg("HOME.SVG"), "HOME.SVG");
    assert_eq!(rename_svg("a.svg.svg"), "a.svg");
}
