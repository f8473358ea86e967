use tred_app::driver::EditorDriver;

#[test]
fn e2e_boot_001_initial_state_is_empty() {
    let driver = EditorDriver::default();
    let snapshot = driver.snapshot();

    assert_eq!(snapshot.unit_count, 0);
    assert_eq!(snapshot.selected, None);
    assert_eq!(snapshot.comment_text, "");
    assert!(!snapshot.comment_enabled);
    assert!(!snapshot.location_visible);
    assert!(snapshot.comment_dock_shown);
    assert!(!snapshot.dirty);
}
