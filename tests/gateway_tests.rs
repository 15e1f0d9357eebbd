//! Tests for PersistenceGateway
//!
//! These tests verify:
//! - Save/load preserves records and their order
//! - Missing, empty, and malformed files are reported as storage errors
//! - Unknown and missing fields are rejected on load
//! - Saves replace content in full and leave no temp file behind
//! - Independent savers on one file never fail each other

use std::fs;
use std::path::PathBuf;
use std::thread;

use rollbook::config::Durability;
use rollbook::storage::PersistenceGateway;
use rollbook::{Book, Grade, RollbookError, Student};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    (temp_dir, path)
}

fn sample_students() -> Vec<Student> {
    vec![
        Student::new("Ada", 3000, Grade::C),
        Student::new("Bob", 1000, Grade::A),
        Student::new("Cy", 5000, Grade::B),
    ]
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_save_then_load_preserves_order() {
    let (_temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    // Deliberately unsorted: the gateway must not reorder
    let students = sample_students();
    gateway.save(&students).unwrap();

    assert_eq!(gateway.load().unwrap(), students);
}

#[test]
fn test_save_load_save_is_idempotent() {
    let (_temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    gateway.save(&sample_students()).unwrap();
    let first = fs::read(&path).unwrap();

    let loaded = gateway.load().unwrap();
    gateway.save(&loaded).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_save_empty_collection() {
    let (_temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::BufferedOnly);

    gateway.save(&[]).unwrap();

    assert!(gateway.load().unwrap().is_empty());
    // "[]" plus newline is not zero bytes, so no re-bootstrap
    assert!(!gateway.is_empty());
}

#[test]
fn test_book_round_trip() {
    let (_temp, path) = setup_temp_file("books.json");
    let gateway = PersistenceGateway::<Book>::open(&path, Durability::Fsync);

    let books = vec![
        Book::new("Dune", "Frank Herbert", 1965),
        Book::new("dune", "Someone Else", 2001),
    ];
    gateway.save(&books).unwrap();

    assert_eq!(gateway.load().unwrap(), books);
}

// =============================================================================
// File Format Tests
// =============================================================================

#[test]
fn test_persisted_field_names_and_layout() {
    let (_temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    gateway.save(&[Student::new("Ada", 1000, Grade::A)]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let expected = "[\n    {\n        \"name\": \"Ada\",\n        \"roll_number\": 1000,\n        \"grade\": \"A\"\n    }\n]\n";
    assert_eq!(text, expected);
}

#[test]
fn test_loads_hand_written_file() {
    let (_temp, path) = setup_temp_file("students.json");
    fs::write(
        &path,
        r#"[{"name": "Zed", "roll_number": 4242, "grade": "E"}]"#,
    )
    .unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    assert_eq!(
        gateway.load().unwrap(),
        vec![Student::new("Zed", 4242, Grade::E)]
    );
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_storage_error() {
    let (_temp, path) = setup_temp_file("absent.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    let err = gateway.load().unwrap_err();
    assert!(matches!(err, RollbookError::Storage(_)));
    assert!(err.is_storage());
}

#[test]
fn test_load_malformed_json() {
    let (_temp, path) = setup_temp_file("students.json");
    fs::write(&path, "[{\"name\": \"Ada\", ").unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    let err = gateway.load().unwrap_err();

    assert!(matches!(err, RollbookError::Serialization(_)));
    assert!(err.is_storage());
}

#[test]
fn test_load_rejects_unknown_field() {
    let (_temp, path) = setup_temp_file("students.json");
    fs::write(
        &path,
        r#"[{"name": "Ada", "roll_number": 1000, "grade": "A", "age": 20}]"#,
    )
    .unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    assert!(matches!(
        gateway.load(),
        Err(RollbookError::Serialization(_))
    ));
}

#[test]
fn test_load_rejects_missing_field() {
    let (_temp, path) = setup_temp_file("students.json");
    fs::write(&path, r#"[{"name": "Ada", "roll_number": 1000}]"#).unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    assert!(matches!(
        gateway.load(),
        Err(RollbookError::Serialization(_))
    ));
}

#[test]
fn test_load_rejects_invalid_grade() {
    let (_temp, path) = setup_temp_file("students.json");
    fs::write(
        &path,
        r#"[{"name": "Ada", "roll_number": 1000, "grade": "Z"}]"#,
    )
    .unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    assert!(matches!(
        gateway.load(),
        Err(RollbookError::Serialization(_))
    ));
}

#[test]
fn test_load_zero_byte_file_fails() {
    let (_temp, path) = setup_temp_file("students.json");
    fs::write(&path, "").unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    assert!(gateway.is_empty());
    assert!(gateway.load().unwrap_err().is_storage());
}

// =============================================================================
// Overwrite Tests
// =============================================================================

#[test]
fn test_save_replaces_previous_content() {
    let (_temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    gateway.save(&sample_students()).unwrap();
    let replacement = vec![Student::new("Solo", 7777, Grade::D)];
    gateway.save(&replacement).unwrap();

    assert_eq!(gateway.load().unwrap(), replacement);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    gateway.save(&sample_students()).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["students.json".to_string()]);
}

#[test]
fn test_save_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("deeper").join("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    gateway.save(&sample_students()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_failed_rename_leaves_target_and_no_temp_file() {
    let (temp, path) = setup_temp_file("students.json");

    // A non-empty directory squatting on the target makes the rename fail
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep.txt"), "untouched").unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    let result = gateway.save(&sample_students());

    assert!(matches!(result, Err(RollbookError::Storage(_))));
    assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "untouched");

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["students.json".to_string()]);
}

#[test]
fn test_existing_tmp_named_file_does_not_block_save() {
    let (temp, path) = setup_temp_file("students.json");
    fs::create_dir(temp.path().join("students.json.tmp")).unwrap();

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    gateway.save(&sample_students()).unwrap();

    assert_eq!(gateway.load().unwrap(), sample_students());
}

// =============================================================================
// Concurrent Save Tests
// =============================================================================

#[test]
fn test_concurrent_savers_on_one_file_all_succeed() {
    let (_temp, path) = setup_temp_file("students.json");

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let path = path.clone();
            thread::spawn(move || {
                // Each thread has its own gateway, like separate processes
                let gateway = PersistenceGateway::<Student>::open(&path, Durability::BufferedOnly);
                let mut failures = 0;
                for i in 0..25u32 {
                    let students = vec![Student::new("Writer", 1000 + t * 100 + i, Grade::B)];
                    if gateway.save(&students).is_err() {
                        failures += 1;
                    }
                    // Whatever is on disk is always one complete save
                    if gateway.load().map(|s| s.len()).unwrap_or(0) != 1 {
                        failures += 1;
                    }
                }
                failures
            })
        })
        .collect();

    let failures: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(failures, 0);

    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);
    assert_eq!(gateway.load().unwrap().len(), 1);
}

#[test]
fn test_is_empty_tracks_file_state() {
    let (_temp, path) = setup_temp_file("students.json");
    let gateway = PersistenceGateway::<Student>::open(&path, Durability::Fsync);

    assert!(gateway.is_empty());
    gateway.save(&sample_students()).unwrap();
    assert!(!gateway.is_empty());
    assert_eq!(gateway.path(), path.as_path());
}
