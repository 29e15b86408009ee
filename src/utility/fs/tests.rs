// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::merge_copy_dir;

#[tokio::test]
async fn test_merge_copy_preserves_structure() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    std::fs::create_dir_all(src.join("classes")).unwrap();
    std::fs::write(src.join("package.xml"), "<Package/>").unwrap();
    std::fs::write(src.join("classes/Foo.cls"), "class Foo {}").unwrap();

    merge_copy_dir(&src, &dst).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(dst.join("package.xml")).unwrap(),
        "<Package/>"
    );
    assert_eq!(
        std::fs::read_to_string(dst.join("classes/Foo.cls")).unwrap(),
        "class Foo {}"
    );
}

#[tokio::test]
async fn test_merge_copy_overwrites_but_never_deletes() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::create_dir_all(&dst).unwrap();
    std::fs::write(src.join("shared.xml"), "new").unwrap();
    std::fs::write(dst.join("shared.xml"), "old").unwrap();
    std::fs::write(dst.join("keep.xml"), "keep").unwrap();

    merge_copy_dir(&src, &dst).await.unwrap();

    assert_eq!(std::fs::read_to_string(dst.join("shared.xml")).unwrap(), "new");
    assert_eq!(std::fs::read_to_string(dst.join("keep.xml")).unwrap(), "keep");
}

#[tokio::test]
async fn test_merge_copy_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    std::fs::create_dir_all(src.join("a/b")).unwrap();
    std::fs::write(src.join("a/b/deep.xml"), "x").unwrap();

    merge_copy_dir(&src, &dst).await.unwrap();
    merge_copy_dir(&src, &dst).await.unwrap();

    assert_eq!(std::fs::read_to_string(dst.join("a/b/deep.xml")).unwrap(), "x");
}
