use std::fs;
use std::path::PathBuf;

use madcmd::MadError;
use madcmd::models::{list_models, model_list};
use madcmd::settings::Settings;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("madcmd-models-{}-{}", name, std::process::id()));
    // Ensure clean start
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create dir");
    dir
}

#[test]
fn json_files_are_listed_by_stem() {
    let dir = scratch_dir("stems");
    fs::write(dir.join("lhc.json"), "{}").unwrap();
    fs::write(dir.join("LHC2.JSON"), "{}").unwrap();
    fs::write(dir.join("readme.txt"), "").unwrap();
    let mut models = list_models(&dir).expect("listing");
    models.sort();
    assert_eq!(models, vec!["LHC2".to_string(), "lhc".to_string()]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn directories_are_ignored() {
    let dir = scratch_dir("subdirs");
    fs::create_dir(dir.join("nested.json")).unwrap();
    fs::write(dir.join("sps.json"), "{}").unwrap();
    fs::write(dir.join(".json"), "{}").unwrap();
    assert_eq!(list_models(&dir).unwrap(), vec!["sps".to_string()]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_is_a_filesystem_error() {
    let dir = std::env::temp_dir().join("madcmd-models-does-not-exist");
    let err = list_models(&dir).unwrap_err();
    assert!(matches!(err, MadError::Io(_)));
}

#[test]
fn packaged_models_are_listed() {
    let models = model_list(&Settings::default()).expect("packaged models");
    assert!(models.contains(&"lhc".to_string()));
}
