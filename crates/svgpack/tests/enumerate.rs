use std::fs;

use pretty_assertions::assert_eq;
use svgpack::{fs::read_svgs, Error};

#[test]
fn filters_by_extension() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for name in ["b.svg", "A.SVG", "c.Svg", "notes.txt", "image.png", "d.svgz"] {
        fs::write(dir.path().join(name), "")?;
    }
    fs::create_dir(dir.path().join("nested"))?;
    fs::write(dir.path().join("nested/e.svg"), "")?;

    let names = read_svgs(dir.path())?
        .iter()
        .map(|path| svgpack::fs::file_name(path))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["A.SVG", "b.svg", "c.Svg"]);
    Ok(())
}

#[test]
fn without_svgs() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("readme.md"), "")?;
    assert!(read_svgs(dir.path())?.is_empty());
    Ok(())
}

#[test]
fn missing_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing");
    match read_svgs(&missing) {
        Err(Error::DirectoryNotFound(path)) => assert_eq!(path, missing),
        result => panic!("expected a missing directory, got {result:?}"),
    }
    Ok(())
}
