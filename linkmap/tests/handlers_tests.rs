use linkmap::handlers::{load_dataset, resolve_data_dir};
use linkmap_core::Edge;
use linkmap_core::edgelist::{DATASET_FILE, dataset_path};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_resolve_data_dir_prefers_flag() {
    let flag = PathBuf::from("/tmp/linkmap-data");
    let resolved = resolve_data_dir(Some(&flag)).unwrap();
    assert_eq!(resolved, flag);
}

#[test]
fn test_resolve_data_dir_expands_tilde() {
    let flag = PathBuf::from("~/data/raw");
    let resolved = resolve_data_dir(Some(&flag)).unwrap();
    assert!(!resolved.display().to_string().starts_with('~'));
    assert!(resolved.display().to_string().ends_with("data/raw"));
}

#[test]
fn test_load_dataset_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dataset_path(dir.path());
    assert!(path.ends_with(DATASET_FILE));

    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "source_base_path,sink_base_path").unwrap();
    writeln!(file, "/childcare,/register-childminder").unwrap();
    writeln!(file, "/childcare,/childcare-costs").unwrap();
    drop(file);

    let resolved = resolve_data_dir(Some(&dir.path().to_path_buf())).unwrap();
    let edges = load_dataset(&resolved).unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0], Edge::new("/childcare", "/register-childminder"));
}

#[test]
fn test_load_dataset_missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset(dir.path()).unwrap_err();
    assert!(err.to_string().contains(DATASET_FILE));
}
