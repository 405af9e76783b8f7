use super::*;

#[test]
fn normalize_strips_web_root_and_rejects_escapes() {
    assert_eq!(
        normalize_rel_path("/images/ezgif-frame-001.jpg").unwrap(),
        "images/ezgif-frame-001.jpg"
    );
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a/./b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/").is_err());
}

#[test]
fn memory_source_round_trips_by_normalized_key() {
    let mut src = MemorySource::new();
    src.insert("/images/a.jpg", vec![1, 2, 3]).unwrap();
    assert_eq!(src.len(), 1);
    assert_eq!(src.fetch("images/a.jpg").unwrap(), vec![1, 2, 3]);
    assert!(matches!(
        src.fetch("/images/b.jpg"),
        Err(ZenithError::Asset(_))
    ));
}

#[test]
fn dir_source_reads_under_root() {
    let tmp = std::env::temp_dir().join(format!(
        "zenith_dir_source_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(tmp.join("images")).unwrap();
    std::fs::write(tmp.join("images/f001.jpg"), b"abc").unwrap();

    let src = DirSource::new(&tmp);
    assert_eq!(src.fetch("/images/f001.jpg").unwrap(), b"abc".to_vec());
    assert!(src.fetch("/images/f002.jpg").is_err());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn http_source_joins_base_url() {
    let src = HttpSource::new("http://localhost:3000/");
    assert_eq!(
        src.url_for("/images/f001.jpg").unwrap(),
        "http://localhost:3000/images/f001.jpg"
    );
}
