use std::{fs, path::Path};

use pretty_assertions::assert_eq;
use svgpack::{
    process::{build_sprite, optimise_and_copy},
    run, Error, Summary, Task,
};

const STAR: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
    <!-- star -->
    <path fill="#ff0000" opacity="0.5" d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z"/>
</svg>
"##;

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
    <title>Logo</title>
    <rect width="32" height="32" fill="#FFFFFF" style="mix-blend-mode:multiply" opacity="0.8"/>
</svg>
"##;

fn write(root: &Path, path: &str, contents: &str) -> anyhow::Result<()> {
    let path = root.join(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn project() -> anyhow::Result<tempfile::TempDir> {
    let root = tempfile::tempdir()?;
    write(root.path(), "src/svg/icon/star.svg", STAR)?;
    write(root.path(), "src/svg/inline/logo.svg", LOGO)?;
    write(root.path(), "src/svg/full/logo.svg", LOGO)?;
    Ok(root)
}

#[test]
fn defaults() -> anyhow::Result<()> {
    let root = project()?;
    let summary = run(&Task::defaults(), root.path())?;
    assert_eq!(summary, Summary { tasks: 6, files: 6 });

    let icons = fs::read_to_string(root.path().join("templates/_svg/symbol/icon.symbol.svg"))?;
    assert_eq!(
        icons,
        r#"<svg xmlns="http://www.w3.org/2000/svg" style="position:absolute;width:0;height:0" aria-hidden="true"><symbol id="star" viewBox="0 0 24 24"><path fill="currentColor" d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z"/></symbol></svg>"#
    );

    let full = fs::read_to_string(root.path().join("templates/_svg/symbol/full.symbol.svg"))?;
    assert_eq!(
        full,
        r##"<svg xmlns="http://www.w3.org/2000/svg" style="position:absolute;width:0;height:0" aria-hidden="true"><symbol id="logo" viewBox="0 0 32 32"><rect width="32" height="32" fill="#fff" opacity="0.8" style="mix-blend-mode:multiply"/></symbol></svg>"##
    );

    let optimised_logo = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="32" height="32" fill="#fff" opacity="0.8" style="mix-blend-mode:multiply"/></svg>"##;
    for path in [
        "templates/_svg/inline/logo.svg",
        "src/static/svg/inline/logo.svg",
        "src/static/svg/full/logo.svg",
    ] {
        assert_eq!(fs::read_to_string(root.path().join(path))?, optimised_logo);
    }
    assert_eq!(
        fs::read_to_string(root.path().join("src/static/svg/icon/star.svg"))?,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="red" d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z" opacity="0.5"/></svg>"##
    );
    Ok(())
}

#[test]
fn copy_is_idempotent() -> anyhow::Result<()> {
    let root = project()?;
    let task = Task::optimise_and_copy("inline", "src/svg/inline", "out");
    optimise_and_copy(&task, root.path())?;
    let first = fs::read_to_string(root.path().join("out/logo.svg"))?;
    optimise_and_copy(&task, root.path())?;
    assert_eq!(fs::read_to_string(root.path().join("out/logo.svg"))?, first);

    let again = Task::optimise_and_copy("again", "out", "out-again");
    optimise_and_copy(&again, root.path())?;
    assert_eq!(
        fs::read_to_string(root.path().join("out-again/logo.svg"))?,
        first
    );
    Ok(())
}

#[test]
fn empty_source() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    fs::create_dir_all(root.path().join("src/svg/icon"))?;

    let sprite = Task::defaults().remove(0);
    assert_eq!(build_sprite(&sprite, root.path())?, 0);
    assert!(!root.path().join("templates").exists());

    let copy = Task::optimise_and_copy("copyIcon", "src/svg/icon", "out");
    assert_eq!(optimise_and_copy(&copy, root.path())?, 0);
    assert_eq!(fs::read_dir(root.path().join("out"))?.count(), 0);
    Ok(())
}

#[test]
fn halts_on_first_failure() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    write(root.path(), "a/one.svg", LOGO)?;
    write(root.path(), "c/three.svg", LOGO)?;
    fs::create_dir_all(root.path().join("b/bad.svg"))?;

    let tasks = [
        Task::optimise_and_copy("first", "a", "out/a"),
        Task::optimise_and_copy("second", "b", "out/b"),
        Task::optimise_and_copy("third", "c", "out/c"),
    ];
    match run(&tasks, root.path()) {
        Err(Error::ReadFailure { path, .. }) => assert_eq!(path, root.path().join("b/bad.svg")),
        result => panic!("expected a read failure, got {result:?}"),
    }
    assert!(root.path().join("out/a/one.svg").exists());
    assert!(!root.path().join("out/c").exists());
    Ok(())
}

#[test]
fn missing_source() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let result = run(&Task::defaults(), root.path());
    assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    Ok(())
}

#[test]
fn invalid_shape() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    write(
        root.path(),
        "src/svg/icon/broken.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%"/>"#,
    )?;
    let sprite = Task::defaults().remove(0);
    match build_sprite(&sprite, root.path()) {
        Err(Error::SpriteCompilationFailure { task, .. }) => assert_eq!(task, "icon"),
        result => panic!("expected a sprite failure, got {result:?}"),
    }
    Ok(())
}
