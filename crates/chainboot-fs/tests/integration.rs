use chainboot_fs::{ManagedPath, ScratchFile, clear_store, default_managed_paths};
use tempfile::tempdir;

fn seed_store(root: &std::path::Path) {
    std::fs::create_dir_all(root.join("txleveldb/archive")).unwrap();
    std::fs::write(root.join("txleveldb/CURRENT"), "MANIFEST-000002").unwrap();
    std::fs::write(root.join("txleveldb/archive/000003.ldb"), vec![7u8; 4096]).unwrap();
    std::fs::write(root.join("blk0001.dat"), vec![1u8; 2048]).unwrap();
}

#[test]
fn test_clear_store_twice_is_idempotent() {
    let dir = tempdir().unwrap();
    seed_store(dir.path());

    clear_store(dir.path(), &default_managed_paths()).unwrap();
    clear_store(dir.path(), &default_managed_paths()).unwrap();

    assert!(!dir.path().join("txleveldb").exists());
    assert!(!dir.path().join("blk0001.dat").exists());
}

#[test]
fn test_clear_store_on_empty_root() {
    let dir = tempdir().unwrap();
    clear_store(dir.path(), &default_managed_paths()).unwrap();
}

#[test]
fn test_clear_store_rejects_escaping_name() {
    let dir = tempdir().unwrap();
    let managed = vec![ManagedPath::file("../outside.dat")];
    assert!(clear_store(dir.path(), &managed).is_err());
}

#[test]
fn test_scratch_file_inside_store_survives_clear() {
    let dir = tempdir().unwrap();
    seed_store(dir.path());
    let scratch = ScratchFile::prepare(dir.path().join("BootstrapChain.zip")).unwrap();
    std::fs::write(scratch.path(), "zip").unwrap();

    clear_store(dir.path(), &default_managed_paths()).unwrap();
    assert!(scratch.path().exists());

    drop(scratch);
    assert!(!dir.path().join("BootstrapChain.zip").exists());
}
